use maud::{Markup, Render, html};

use crate::{GENERATOR, components::Component, route::RenderResult};

/// Can be used to create a generator tag in the output HTML. See [`GENERATOR`](crate::GENERATOR).
pub fn generator() -> Markup {
    html! {
        meta name="generator" content=(GENERATOR);
    }
}

/// Wraps a component so it can be spliced into `html!` directly, e.g. `(element(&BackButton::default()))`.
pub fn element<C: Component>(component: &C) -> Element<'_, C> {
    Element(component)
}

pub struct Element<'a, C: Component>(&'a C);

impl<C: Component> Render for Element<'_, C> {
    fn render(&self) -> Markup {
        self.0.render_element()
    }
}

impl From<maud::Markup> for RenderResult {
    fn from(val: maud::Markup) -> Self {
        RenderResult::Text(val.into_string())
    }
}
