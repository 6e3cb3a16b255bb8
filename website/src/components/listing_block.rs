use maud::{Markup, html};
use matsu::components::Component;

const CLASSES: &str =
    "w-full h-full flex flex-col text-white justify-center p-4 border-1 border-white gap-4 glow-hover";

/// A bordered card for a project, job or talk. Links out in a new tab when it has an `href`.
pub struct ListingBlock {
    pub href: Option<String>,
    pub img: Option<String>,
    pub content: Markup,
}

impl ListingBlock {
    pub fn new(content: Markup) -> Self {
        Self {
            href: None,
            img: None,
            content,
        }
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn img(mut self, img: impl Into<String>) -> Self {
        self.img = Some(img.into());
        self
    }

    fn inner(&self) -> Markup {
        html! {
            @if let Some(img) = &self.img {
                div.w-20 { img.w-full src=(img); }
            }
            slot {}
        }
    }
}

impl Component for ListingBlock {
    const TAG: &'static str = "listing-block";

    fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attributes = vec![("class", "flex".to_string())];
        if let Some(href) = &self.href {
            attributes.push(("href", href.clone()));
        }
        if let Some(img) = &self.img {
            attributes.push(("img", img.clone()));
        }
        attributes
    }

    fn template(&self) -> Markup {
        html! {
            @if let Some(href) = &self.href {
                a class=(CLASSES) href=(href) target="_blank" { (self.inner()) }
            } @else {
                div class=(CLASSES) { (self.inner()) }
            }
        }
    }

    fn children(&self) -> Option<Markup> {
        Some(self.content.clone())
    }
}
