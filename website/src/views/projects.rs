use maud::html;
use matsu::maud::element;
use matsu::route::prelude::*;

use crate::components::{BackButton, ListingBlock};
use crate::icons::Icon;

#[route("/projects", title = "matsu.fi - Projects")]
pub struct Projects;

impl View for Projects {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        ctx.components.define::<BackButton>()?;
        ctx.components.define::<ListingBlock>()?;

        let back = BackButton::new(ctx.href("/"));

        Ok(RenderThunk::new(move || {
            let listings = [
                ListingBlock::new(html! {
                    h2.text-xl.font-semibold.text-green-600 { "Web Component Devtools" }
                    p {
                        "Web Component DevTools is aimed at all developers working with Web Components. The tooling \
                         provided creates a new Chrome Devtools panel, which allows a quick look at the custom \
                         elements on the current page, and enables modification of attributes and properties of said \
                         components."
                    }
                })
                .href("https://github.com/Matsuuu/web-component-devtools")
                .img("https://matsuuu.github.io/web-component-devtools/73c3b3ad.png"),
                ListingBlock::new(html! {
                    h2.text-xl.font-semibold.pinkmare { "Pinkmare" }
                    p {
                        "Pinkmare is a color scheme that grew from a need to have something that was at the same time \
                         pretty, but also easy on the eyes."
                    }
                    p {
                        "This theme is dominant in a lot of my workflow from my terminal and neovim themes to even \
                         this website."
                    }
                })
                .href("https://github.com/Matsuuu/pinkmare"),
                ListingBlock::new(html! {
                    h2.text-xl.font-semibold.text-blue-300 { "Suunta" }
                    p { "A simple SPA routing and state management library for everyday use" }
                    p {
                        "Suunta grew from a need to have a stable solution for managing routing, views, state and \
                         forms in a frameworkless environment."
                    }
                    p {
                        "I mostly work around web components and vanilla environments, and needed a setup that \
                         provided framework-like features fitting for my needs."
                    }
                })
                .href("https://github.com/Matsuuu/suunta")
                .img("https://github.com/Matsuuu/suunta/raw/main/assets/suunta-banner.png"),
                ListingBlock::new(html! {
                    h2.text-xl.font-semibold.text-amber-400 { "Custom Elements LanguageServer" }
                    p {
                        "The CELS was a passion project of mine: Creating the first Language Server implementation \
                         for Custom Elements and Web Components."
                    }
                    p {
                        "The project was bootstrapped from pretty much non-existing editor support for these \
                         technologies and was able to find it's userbase."
                    }
                    p { b { "This project was archived due to lack of time and other projects superseding it" } }
                })
                .href("https://github.com/Matsuuu/custom-elements-language-server"),
            ];

            html! {
                div class="flex flex-col h-full gap-2 mx-auto mt-[20vh] md:max-w-[60vw]" {
                    (element(&back))
                    div.flex.justify-between.gap-18 {
                        div.flex.flex-col.gap-2 {
                            h1.font-semibold.text-2xl.text-white.inline-flex.items-center.gap-1 {
                                (Icon::Workflow) " Projects"
                            }
                        }

                        div.flex.flex-col.gap-4 {
                            @for listing in &listings {
                                (element(listing))
                            }
                        }
                    }
                }
            }
        }))
    }
}
