use maud::{Markup, html};
use matsu::components::Component;

use crate::icons::Icon;

pub struct HelloWorld {
    pub name: String,
}

impl Default for HelloWorld {
    fn default() -> Self {
        Self {
            name: "World".to_string(),
        }
    }
}

impl Component for HelloWorld {
    const TAG: &'static str = "hello-world";

    fn attributes(&self) -> Vec<(&'static str, String)> {
        vec![("name", self.name.clone())]
    }

    fn template(&self) -> Markup {
        html! {
            p.text-xl.font-bold { "Hello " (self.name) }
            (Icon::House)
        }
    }
}
