use maud::html;
use matsu::maud::element;
use matsu::route::prelude::*;

use crate::components::BackButton;
use crate::icons::Icon;

const SOCIALS: &[(&str, &str)] = &[
    ("GitHub", "https://github.com/Matsuuu"),
    ("LinkedIn", "https://www.linkedin.com/in/matias-huhta-b0b159106/"),
    ("Youtube", "https://www.youtube.com/channel/UC3ySWW7VRZB7Kb_kFP1uDkQ"),
];

#[route("/me", title = "matsu.fi - Me")]
pub struct Me;

impl View for Me {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        ctx.components.define::<BackButton>()?;

        let back = BackButton::new(ctx.href("/"));

        Ok(RenderThunk::new(move || {
            html! {
                div class="flex flex-col h-full gap-2 mt-[20vh] md:max-w-[60vw] mx-8 md:mx-auto" {
                    (element(&back))
                    div class="flex justify-between md:gap-18 gap-10 md:flex-row flex-col" {
                        div.flex.flex-col.gap-2 {
                            h1.font-semibold.text-2xl.text-white.inline-flex.items-center.gap-1 {
                                (Icon::User) " Me"
                            }
                        }

                        div.flex.flex-col.gap-4.text-white {
                            h1.text-2xl.font-semibold {
                                "I'm Matias " span.glow-text.offset-1 { "\"Matsu\"" } " Huhta"
                            }
                            p { "A passionate Developer Experience -oriented senior engineer from Finland" }
                            p {
                                "When I'm not working, I'm most likely brewing. "
                                a.glow-text href="https://www.instagram.com/matsu_brewing/" {
                                    "Check out Matsu Brewing for more of that."
                                }
                            }

                            p { "You can find me online at" }

                            ul {
                                @for (label, href) in SOCIALS {
                                    li class="underline hover:text-primary transition" {
                                        a target="_blank" href=(href) { (label) }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }
}
