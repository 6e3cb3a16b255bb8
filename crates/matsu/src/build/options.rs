use std::{env, path::PathBuf};

use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::{maud::generator, route::View, routing::with_base};

/// What a [`Layout`] receives for every prerendered page.
pub struct PageShell<'a> {
    /// Title of the route, or the not-found title for `404.html`.
    pub title: Option<&'a str>,
    /// The view's markup, already rendered.
    pub body: &'a str,
    /// Path of the page, without the site base.
    pub path: &'a str,
    /// Path prefix the site is served under, as in [`BuildOptions::base`].
    pub base: Option<&'a str>,
    pub base_url: Option<&'a str>,
}

impl PageShell<'_> {
    /// Absolute URL the page is served at, `None` when no base URL is configured.
    pub fn canonical_url(&self) -> Option<String> {
        self.base_url.map(|base_url| {
            format!(
                "{}{}",
                base_url.trim_end_matches('/'),
                with_base(self.path, self.base)
            )
        })
    }
}

/// Wraps the markup of a view into a full HTML document.
pub type Layout = fn(&PageShell<'_>) -> Markup;

/// The layout used when [`BuildOptions::layout`] is not set to something else.
pub fn default_layout(page: &PageShell<'_>) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (generator())
                @if let Some(title) = page.title {
                    title { (title) }
                }
                @if let Some(canonical) = page.canonical_url() {
                    link rel="canonical" href=(canonical);
                }
            }
            body {
                (PreEscaped(page.body))
            }
        }
    }
}

/// Matsu build options. Should be passed to [`build_site()`](crate::build_site()).
///
/// ## Examples
/// ```rust
/// use matsu::BuildOptions;
///
/// let options = BuildOptions {
///     base_url: Some("https://matsuuu.github.io".into()),
///     base: Some("/matsu.fi".into()),
///     output_dir: "public".into(),
///     ..Default::default()
/// };
/// ```
pub struct BuildOptions {
    /// Base URL for the site, e.g. `https://example.com`. Used for canonical URLs in the default layout.
    pub base_url: Option<String>,

    /// Path prefix the site is served under, e.g. `/matsu.fi`. In-app links in the output are expected to carry it.
    pub base: Option<String>,

    pub output_dir: PathBuf,
    pub static_dir: PathBuf,

    /// Whether to clean the output directory before building.
    pub clean_output_dir: bool,

    pub layout: Layout,

    /// View rendered to `404.html`. Defaults to the router's built-in not-found view.
    pub not_found: Option<Box<dyn View>>,

    pub not_found_title: String,

    /// Where the JSON build manifest is written, `None` to skip it.
    /// Defaults to `target/matsu/manifest.json`, respecting `CARGO_TARGET_DIR`.
    pub manifest_path: Option<PathBuf>,
}

/// Provides default values for [`crate::build_site()`].
impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            base_url: None,
            base: None,
            output_dir: "dist".into(),
            static_dir: "static".into(),
            clean_output_dir: true,
            layout: default_layout,
            not_found: None,
            not_found_title: "Not Found".to_string(),
            manifest_path: Some(default_manifest_path()),
        }
    }
}

pub fn default_manifest_path() -> PathBuf {
    let target_dir = env::var("CARGO_TARGET_DIR").unwrap_or_else(|_| "target".to_string());
    PathBuf::from(target_dir).join("matsu/manifest.json")
}
