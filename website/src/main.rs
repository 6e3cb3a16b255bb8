use matsu::{BuildOptions, BuildOutput, build_site};
use matsu_website::{BASE, BASE_URL, layout::layout, routes, views::NotFound};

fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
    build_site(
        routes(),
        BuildOptions {
            base_url: Some(BASE_URL.to_string()),
            base: Some(BASE.to_string()),
            layout,
            not_found: Some(Box::new(NotFound)),
            not_found_title: "matsu.fi - Not Found".to_string(),
            ..Default::default()
        },
    )
}
