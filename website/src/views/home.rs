use maud::html;
use matsu::maud::element;
use matsu::route::prelude::*;

use crate::components::DataBlock;
use crate::icons::Icon;

#[route("/", title = "matsu.fi - Home")]
pub struct Home;

impl View for Home {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        ctx.components.define::<DataBlock>()?;

        let projects = DataBlock::new("Projects", Icon::Workflow, ctx.href("/projects"));
        let work = DataBlock::new("Work", Icon::Monitor, ctx.href("/work"));
        let speaking = DataBlock::new("Speaking", Icon::Megaphone, ctx.href("/speaking"));
        let me = DataBlock::new("Me", Icon::User, ctx.href("/me"));

        Ok(RenderThunk::new(move || {
            html! {
                div class="flex md:justify-between justify-center md:items-center h-full gap-8 mx-8 md:flex-row flex-col md:max-w-[60vw] md:mx-auto mt-[20vh]" {
                    div.flex.flex-col {
                        h1.text-2xl.text-white { "Matias " b.glow-text.offset-2 { "\"Matsu\"" } " Huhta" }
                        p.text-2xl.text-white { "Senior Software Engineer" }

                        div.flex.flex-nowrap.items-center.gap-2 {
                            div.rounded-full.w-3.h-3.glow {}
                            p.text-white {
                                "Currently on my " span.glow-text.offset-1 { "Developer Experience" } " Era @ "
                                span.glow-text.offset-2 { "n8n" }
                            }
                        }
                    }
                    div class="flex flex-col basis-1/3 gap-2 md:mx-0 mx-8" {
                        div.flex.gap-2 {
                            (element(&projects))
                            (element(&work))
                        }
                        div.flex.gap-2 {
                            (element(&speaking))
                            (element(&me))
                        }
                    }
                }
            }
        }))
    }
}
