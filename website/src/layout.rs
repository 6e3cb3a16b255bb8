use maud::{DOCTYPE, Markup, PreEscaped, html};
use matsu::PageShell;
use matsu::maud::generator;

const DESCRIPTION: &str = "Matias \"Matsu\" Huhta, Senior Software Engineer focusing on Developer Experience.";

const STYLES: &str = r#"
html, body { height: 100%; margin: 0; }
body { background: #1c1e26; color: #fff; font-family: ui-monospace, monospace; }
a { color: inherit; }
.glow-text { color: #ff38a2; text-shadow: 0 0 8px #ff38a2; }
.glow { background: #87c095; box-shadow: 0 0 8px #87c095; }
.glow-hover:hover { box-shadow: 0 0 12px #ff38a2; }
"#;

pub fn layout(page: &PageShell<'_>) -> Markup {
    let title = page.title.unwrap_or("matsu.fi");

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                (generator())
                title { (title) }
                meta name="description" content=(DESCRIPTION);
                meta property="og:title" content=(title);
                meta property="og:description" content=(DESCRIPTION);
                meta property="og:type" content="website";
                @if let Some(canonical) = page.canonical_url() {
                    link rel="canonical" href=(canonical);
                }
                style { (PreEscaped(STYLES)) }
            }
            body {
                (PreEscaped(page.body))
            }
        }
    }
}
