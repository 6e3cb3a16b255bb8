use maud::html;
use matsu::maud::element;
use matsu::route::prelude::*;

use crate::components::BackButton;

/// Shown for every path no route matches, and prerendered to `404.html`.
pub struct NotFound;

impl View for NotFound {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        ctx.components.define::<BackButton>()?;

        let back = BackButton::new(ctx.href("/"));
        let path = ctx.current_path.to_string();

        Ok(RenderThunk::new(move || {
            html! {
                div class="flex flex-col h-full gap-2 mt-[20vh] md:max-w-[60vw] mx-8 md:mx-auto text-white" {
                    (element(&back))
                    h1.font-semibold.text-2xl { "404 - Not Found" }
                    p { "Nothing lives at " code { (path) } ", try one of the doors on the front page." }
                }
            }
        }))
    }
}
