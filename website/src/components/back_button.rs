use maud::{Markup, html};
use matsu::components::Component;

const STYLES: &str = r#"
.blinker {
    width: 1ch;
    height: 2ch;
    background: #ff38a2;
    animation: 1.6s ease-in-out blink infinite;
}

@keyframes blink {
    0% { opacity: 1; }
    50% { opacity: 0; }
    100% { opacity: 1; }
}
"#;

/// A terminal-style `cd ..` link with a blinking cursor.
pub struct BackButton {
    pub to: String,
}

impl BackButton {
    pub fn new(to: impl Into<String>) -> Self {
        Self { to: to.into() }
    }
}

impl Default for BackButton {
    fn default() -> Self {
        Self::new("/")
    }
}

impl Component for BackButton {
    const TAG: &'static str = "back-button";

    fn styles() -> Option<&'static str> {
        Some(STYLES)
    }

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("to", self.to.clone())]
    }

    fn template(&self) -> Markup {
        html! {
            a.text-white.inline-flex.gap-1.items-center href=(self.to) {
                span."text-[#87c095]" { "cd" } " .."
                div.blinker {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_back_button_links_to_target() {
        let html = BackButton::new("/matsu.fi/").render_element().into_string();

        assert!(html.starts_with(
            r#"<back-button to="/matsu.fi/"><template shadowrootmode="open"><style>"#
        ));
        assert!(html.contains(r#"href="/matsu.fi/""#));
        assert!(html.contains("@keyframes blink"));
    }
}
