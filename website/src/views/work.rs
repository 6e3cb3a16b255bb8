use maud::html;
use matsu::maud::element;
use matsu::route::prelude::*;

use crate::components::{BackButton, ListingBlock};
use crate::icons::Icon;

#[route("/work", title = "matsu.fi - Work")]
pub struct Work;

impl View for Work {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        ctx.components.define::<BackButton>()?;
        ctx.components.define::<ListingBlock>()?;

        let back = BackButton::new(ctx.href("/"));
        let n8n_logo = ctx.href("/n8n-white.svg");
        let siili_logo = ctx.href("/siili.svg");

        Ok(RenderThunk::new(move || {
            let listings = [
                ListingBlock::new(html! {
                    object.max-w-50 data=(n8n_logo) type="image/svg+xml" {}
                    h2.text-xl.font-semibold { "Senior Software Engineer DX @ n8n" }
                    p {
                        "Focusing on all things Developer Experience. From enhancing local development speed and \
                         feedback loops to providing better tooling."
                    }
                    p {
                        "My goal is to make every engineer in the company more efficient and make their day to day \
                         work more enjoyable."
                    }
                })
                .href("https://n8n.io/"),
                ListingBlock::new(html! {
                    h2.text-xl.font-semibold { "CTO, Tech Lead @ Simplr" }
                    p { "Founded and lead the technical side of a small software consultancy." }
                    p {
                        "Day to day work consisted of moving customer projects forward and enhancing developer \
                         experience across all of our client's teams."
                    }
                })
                .href("https://simplr.fi/")
                .img("https://simplr.fi/wp-content/uploads/2025/09/Simplr_muki-scaled.png"),
                ListingBlock::new(html! {
                    object.max-w-30 data=(siili_logo) type="image/svg+xml" {}
                    h2.text-xl.font-semibold { "Consultant @ Siili Solutions" }
                    p { "A hands-on consultant on national projects." }
                })
                .href("https://www.siili.com/"),
                ListingBlock::new(html! {
                    h2.text-xl.font-semibold { "And plenty more" }
                    p { "Listing everything here would be a mess so you can check the rest at LinkedIn" }
                })
                .href("https://www.linkedin.com/in/matias-huhta-b0b159106/?skipRedirect=true"),
            ];

            html! {
                div class="flex flex-col h-full gap-2 mt-[20vh] md:max-w-[60vw] mx-8 md:mx-auto" {
                    (element(&back))
                    div class="flex justify-between md:gap-18 gap-10 md:flex-row flex-col" {
                        div.flex.flex-col.gap-2 {
                            h1.font-semibold.text-2xl.text-white.inline-flex.items-center.gap-1 {
                                (Icon::Monitor) " Work"
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
