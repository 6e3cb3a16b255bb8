use std::{
    fs, io,
    path::{Path, PathBuf},
    time::Instant,
};

use colored::Colorize;
use log::{debug, info, trace, warn};

use crate::{
    BuildOptions, BuildOutput,
    build::options::PageShell,
    components::ComponentRegistry,
    errors::BuildError,
    inspect::inspect_markup,
    logging::{FormatElapsedTimeOptions, format_elapsed_time, print_title},
    navigation::Navigator,
    renderer::{HtmlRenderer, MountNode, MountTarget},
    route::{RouteDescriptor, RouteTable},
    router::{BoxedView, DefaultNotFound, render_route},
    routing::{Location, RouteParams, with_base},
};

pub mod metadata;
pub mod options;

pub fn execute_build(
    routes: Vec<RouteDescriptor>,
    mut options: BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    let build_start = Instant::now();
    let mut build_metadata =
        BuildOutput::new(build_start, &options.output_dir, options.base.as_deref());

    let table = RouteTable::new(routes)?;
    let navigator = Navigator::new(
        options.base_url.as_deref().unwrap_or("http://localhost"),
        options.base.as_deref(),
    )?;

    trace!(target: "build", "Setting up required directories...");
    if options.clean_output_dir {
        match fs::remove_dir_all(&options.output_dir) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                return Err(BuildError::WriteFailed {
                    path: options.output_dir.clone(),
                    source: e,
                }
                .into());
            }
            _ => {}
        }
    }

    info!(target: "build", "Output directory: {}", options.output_dir.display());

    print_title("generating pages");
    let pages_start = Instant::now();

    let route_format_options = FormatElapsedTimeOptions {
        relative: true,
        ..Default::default()
    };

    let mut components = ComponentRegistry::new();
    let mut used_elements: Vec<String> = Vec::new();
    let mut page_count = 0;

    for route in table.iter() {
        if route.is_dynamic() {
            warn!(target: "build", "{} is a dynamic route, its pages cannot be known ahead of time. No page will be generated for it.", route.path().bold());
            continue;
        }

        let route_start = Instant::now();
        let path = Location::parse(route.path(), None).path;

        let body = render_page(route, &path, navigator.base(), &mut components)?;
        inspect_page(&body, &path, &table, &navigator, &mut used_elements);

        let file_path = page_file_path(&options.output_dir, &path);
        let page = (options.layout)(&PageShell {
            title: route.title(),
            body: &body,
            path: &path,
            base: navigator.base(),
            base_url: options.base_url.as_deref(),
        });
        write_route_file(page.into_string().as_bytes(), &file_path)?;

        info!(target: "pages", "{} -> {} {}", path, file_path.to_string_lossy().dimmed(), format_elapsed_time(route_start.elapsed(), &route_format_options));

        build_metadata.add_page(route.path(), &file_path, route.title());
        page_count += 1;
    }

    let not_found = match options.not_found.take() {
        Some(view) => RouteDescriptor::new("/404", BoxedView(view)),
        None => RouteDescriptor::new("/404", DefaultNotFound),
    };
    let body = render_page(&not_found, "/404", navigator.base(), &mut components)?;
    inspect_page(&body, "/404", &table, &navigator, &mut used_elements);

    let not_found_path = options.output_dir.join("404.html");
    let page = (options.layout)(&PageShell {
        title: Some(options.not_found_title.as_str()),
        body: &body,
        path: "/404",
        base: navigator.base(),
        base_url: options.base_url.as_deref(),
    });
    write_route_file(page.into_string().as_bytes(), &not_found_path)?;
    info!(target: "pages", "404 -> {}", not_found_path.to_string_lossy().dimmed());
    build_metadata.not_found_page = Some(not_found_path.to_string_lossy().to_string());

    for element in used_elements
        .iter()
        .filter(|element| !components.is_defined(element))
    {
        warn!(target: "components", "<{}> is used in the output but no view defines it, it will render as an unknown element", element);
    }

    info!(target: "pages", "{}", format!("generated {} pages in {}", page_count, format_elapsed_time(pages_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());

    if options.static_dir.exists() {
        let assets_start = Instant::now();
        print_title("copying assets");

        copy_recursively(
            &options.static_dir,
            &options.output_dir,
            &mut build_metadata,
        )?;

        info!(target: "build", "{}", format!("Assets copied in {}", format_elapsed_time(assets_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());
    }

    build_metadata.finish(build_start.elapsed());

    if let Some(manifest_path) = &options.manifest_path {
        build_metadata
            .write_manifest(manifest_path)
            .map_err(|source| BuildError::WriteFailed {
                path: manifest_path.clone(),
                source,
            })?;
        debug!(target: "build", "Manifest written to {}", manifest_path.display());
    }

    info!(target: "SKIP_FORMAT", "{}", "");
    info!(target: "build", "{}", format!("Build completed in {}", format_elapsed_time(build_start.elapsed(), &FormatElapsedTimeOptions::default())).bold());

    Ok(build_metadata)
}


fn render_page(
    route: &RouteDescriptor,
    path: &str,
    base: Option<&str>,
    components: &mut ComponentRegistry,
) -> Result<String, BuildError> {
    let mut node = MountNode::new("body");
    render_route(
        route,
        &RouteParams::default(),
        path,
        base,
        components,
        &mut HtmlRenderer,
        &mut node,
    )
    .map_err(|failure| BuildError::RenderFailed {
        route: route.path().to_string(),
        message: failure.to_string(),
    })?;

    Ok(node.inner_html().to_string())
}

/// Warns about in-app links that match no route, and records the custom elements used by the page.
fn inspect_page(
    body: &str,
    path: &str,
    table: &RouteTable,
    navigator: &Navigator,
    used_elements: &mut Vec<String>,
) {
    let summary = match inspect_markup(body) {
        Ok(summary) => summary,
        Err(e) => {
            warn!(target: "build", "Could not inspect the output of {}: {}", path, e);
            return;
        }
    };

    let current = with_base(path, navigator.base());
    for anchor in &summary.anchors {
        let Ok(href) = navigator.intercept(&current, &anchor.click()) else {
            continue;
        };

        if table.find(&Location::parse(&href, navigator.base())).is_none() {
            warn!(target: "build", "{} links to {}, which matches no route", path, anchor.href.bold());
        }
    }

    for element in summary.custom_elements {
        if !used_elements.contains(&element) {
            used_elements.push(element);
        }
    }
}

fn page_file_path(output_dir: &Path, path: &str) -> PathBuf {
    match path.trim_start_matches('/') {
        "" => output_dir.join("index.html"),
        rest => output_dir.join(rest).join("index.html"),
    }
}

fn copy_recursively(
    source: &Path,
    destination: &Path,
    build_metadata: &mut BuildOutput,
) -> Result<(), BuildError> {
    let copy_failed = |path: &Path| {
        let path = path.to_path_buf();
        move |source: io::Error| BuildError::CopyFailed { path, source }
    };

    fs::create_dir_all(destination).map_err(copy_failed(destination))?;
    for entry in fs::read_dir(source).map_err(copy_failed(source))? {
        let entry = entry.map_err(copy_failed(source))?;
        let entry_path = entry.path();
        let target = destination.join(entry.file_name());

        if entry
            .file_type()
            .map_err(copy_failed(&entry_path))?
            .is_dir()
        {
            copy_recursively(&entry_path, &target, build_metadata)?;
        } else {
            fs::copy(&entry_path, &target).map_err(copy_failed(&entry_path))?;
            build_metadata.add_static_file(&target, &entry_path);
        }
    }
    Ok(())
}

fn write_route_file(content: &[u8], file_path: &Path) -> Result<(), BuildError> {
    let write_failed = |source| BuildError::WriteFailed {
        path: file_path.to_path_buf(),
        source,
    };

    if let Some(parent_dir) = file_path.parent() {
        fs::create_dir_all(parent_dir).map_err(write_failed)?;
    }

    fs::write(file_path, content).map_err(write_failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::route::RenderThunk;
    use maud::{Markup, html};

    struct BackButton;

    impl Component for BackButton {
        const TAG: &'static str = "back-button";

        fn template(&self) -> Markup {
            html! { a href="/" { "cd .." } }
        }
    }

    fn site() -> Vec<RouteDescriptor> {
        vec![
            RouteDescriptor::from_fn("/", |_| {
                Ok(RenderThunk::new(|| {
                    html! { main { a href="/projects" { "Projects" } } }
                }))
            })
            .with_title("matsu.fi - Home"),
            RouteDescriptor::from_fn("/projects", |ctx| {
                ctx.components.define::<BackButton>()?;
                Ok(RenderThunk::new(|| {
                    html! { main { (BackButton.render_element()) h1 { "Projects" } } }
                }))
            })
            .with_title("matsu.fi - Projects"),
        ]
    }

    fn options(root: &Path) -> BuildOptions {
        BuildOptions {
            output_dir: root.join("dist"),
            static_dir: root.join("static"),
            manifest_path: Some(root.join("manifest.json")),
            ..Default::default()
        }
    }

    #[test]
    fn test_build_writes_one_file_per_route() {
        let dir = tempfile::tempdir().unwrap();

        let output = execute_build(site(), options(dir.path())).unwrap();

        let index = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(index.contains("<title>matsu.fi - Home</title>"));
        assert!(index.contains(r#"<a href="/projects">Projects</a>"#));

        let projects = fs::read_to_string(dir.path().join("dist/projects/index.html")).unwrap();
        assert!(projects.contains("<title>matsu.fi - Projects</title>"));
        assert!(projects.contains("<back-button><template shadowrootmode=\"open\">"));

        let not_found = fs::read_to_string(dir.path().join("dist/404.html")).unwrap();
        assert!(not_found.contains("<title>Not Found</title>"));
        assert!(not_found.contains("404 - Not Found"));

        assert_eq!(output.pages.len(), 2);
        assert_eq!(output.pages[1].route, "/projects");
        assert!(output.not_found_page.is_some());
    }

    #[test]
    fn test_build_copies_static_files_and_writes_manifest() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("static/fonts")).unwrap();
        fs::write(dir.path().join("static/favicon.svg"), "<svg></svg>").unwrap();
        fs::write(dir.path().join("static/fonts/font.woff2"), "font").unwrap();

        let output = execute_build(site(), options(dir.path())).unwrap();

        assert!(dir.path().join("dist/favicon.svg").exists());
        assert!(dir.path().join("dist/fonts/font.woff2").exists());
        assert_eq!(output.static_files.len(), 2);

        let manifest: serde_json::Value = serde_json::from_str(
            &fs::read_to_string(dir.path().join("manifest.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(manifest["pages"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_build_cleans_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("dist/old")).unwrap();
        fs::write(dir.path().join("dist/old/index.html"), "stale").unwrap();

        execute_build(site(), options(dir.path())).unwrap();

        assert!(!dir.path().join("dist/old").exists());
        assert!(dir.path().join("dist/index.html").exists());
    }

    #[test]
    fn test_build_skips_dynamic_routes() {
        let dir = tempfile::tempdir().unwrap();
        let mut routes = site();
        routes.push(RouteDescriptor::from_fn("/talks/[year]", |_| {
            Ok(RenderThunk::new(|| "<p>talk</p>"))
        }));

        let output = execute_build(routes, options(dir.path())).unwrap();

        assert_eq!(output.pages.len(), 2);
        assert!(!dir.path().join("dist/talks").exists());
    }

    #[test]
    fn test_failing_route_aborts_the_build() {
        let dir = tempfile::tempdir().unwrap();
        let mut routes = site();
        routes.push(RouteDescriptor::from_fn("/speaking", |_| {
            Err("talks could not be loaded".into())
        }));

        let err = execute_build(routes, options(dir.path())).unwrap_err();

        match err.downcast_ref::<BuildError>() {
            Some(BuildError::RenderFailed { route, message }) => {
                assert_eq!(route, "/speaking");
                assert!(message.contains("talks could not be loaded"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_base_is_in_canonical_urls_not_file_paths() {
        let dir = tempfile::tempdir().unwrap();
        let options = BuildOptions {
            base_url: Some("https://matsuuu.github.io".into()),
            base: Some("/matsu.fi".into()),
            ..options(dir.path())
        };

        execute_build(site(), options).unwrap();

        assert!(dir.path().join("dist/projects/index.html").exists());
        let index = fs::read_to_string(dir.path().join("dist/index.html")).unwrap();
        assert!(index.contains(r#"rel="canonical" href="https://matsuuu.github.io/matsu.fi/""#));
        let projects = fs::read_to_string(dir.path().join("dist/projects/index.html")).unwrap();
        assert!(projects.contains(r#"rel="canonical" href="https://matsuuu.github.io/matsu.fi/projects""#));
    }

    #[test]
    fn test_page_file_path() {
        let dist = Path::new("dist");
        assert_eq!(page_file_path(dist, "/"), PathBuf::from("dist/index.html"));
        assert_eq!(
            page_file_path(dist, "/projects"),
            PathBuf::from("dist/projects/index.html")
        );
    }
}
