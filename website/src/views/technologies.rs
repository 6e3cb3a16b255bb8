use maud::html;
use matsu::route::prelude::*;

const STACK: &[&str] = &["Lit", "Tailwind", "Suunta", "Lucide", "Vite", "WebAwesome"];

#[route("/technologies", title = "matsu.fi - Technologies")]
pub struct Technologies;

impl View for Technologies {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        let home = ctx.href("/");

        Ok(RenderThunk::new(move || {
            html! {
                div.flex.flex-col.items-center.justify-center.h-full.gap-2 {
                    h3.font-semibold.text-2xl.text-white { "🔨" }
                    h1.font-semibold.text-2xl.text-white { "Technologies" }

                    ul.text-center.font-bold.text-cyan-800 {
                        @for technology in STACK {
                            li { (technology) }
                        }
                    }

                    a.underline href=(home) { "Take me back" }
                    a.underline href="https://github.com/Matsuuu/frontend-template" { "🔗 Take me to the source" }
                }
            }
        }))
    }
}
