use maud::{Markup, html};
use matsu::components::Component;

use crate::icons::Icon;

/// A square navigation tile with an icon and a label.
pub struct DataBlock {
    pub label: String,
    pub icon: Icon,
    pub href: String,
}

impl DataBlock {
    pub fn new(label: impl Into<String>, icon: Icon, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            icon,
            href: href.into(),
        }
    }
}

impl Component for DataBlock {
    const TAG: &'static str = "data-block";

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![
            ("class", "flex aspect-square basis-1/2".to_string()),
            ("label", self.label.clone()),
        ]
    }

    fn template(&self) -> Markup {
        html! {
            a class="w-full h-full flex flex-col text-white text-center items-center justify-center p-4 border-1 border-white glow-hover"
                href=(self.href) {
                (self.icon)
                p { (self.label) }
            }
        }
    }
}
