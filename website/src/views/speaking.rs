use maud::html;
use matsu::maud::element;
use matsu::route::prelude::*;

use crate::components::{BackButton, ListingBlock};
use crate::icons::Icon;

struct Talk {
    title: &'static str,
    event: &'static str,
    recording: Option<&'static str>,
}

const fn talk(title: &'static str, event: &'static str, recording: Option<&'static str>) -> Talk {
    Talk {
        title,
        event,
        recording,
    }
}

// Newest first.
const TALKS: &[Talk] = &[
    talk("Exploring the View Transitions API", "Turku <3 Frontend September 2025", None),
    talk(
        "Code-First Design with Zod and OpenAPI - Writing API's that spark joy",
        "Future Frontend April Meetup 2025",
        Some("https://www.youtube.com/watch?v=IwuXGD5PDSY"),
    ),
    talk("You might not need a framework", "Turku <3 Frontend November 2024", None),
    talk(
        "Towards greater development experience through Web Platform API's",
        "TampereJS June 2024",
        None,
    ),
    talk(
        "ALL YOUR FRONTEND ARE BELONG TO US - CRAWLING THROUGH JAVASCRIPT USING AST'S",
        "Disobey 2024",
        Some("https://www.youtube.com/watch?v=-L1UlmMoLc0"),
    ),
    talk("Writing Javascript, but with types!", "Turku <3 Frontend October Meetup 2023", None),
    talk(
        "Towards greater development experience through Web Platform API's",
        "WordCamp Finland 2023",
        Some("https://wordpress.tv/2024/08/11/towards-greater-development-experience-through-web-platform-apis/"),
    ),
    talk(
        "Towards buildless environments through Import Maps",
        "Turku <3 Frontend April meetup 2023",
        None,
    ),
    talk("The Future of Development Tooling - Sharing is Caring", "FooConf 2023", None),
    talk(
        "Let's write a Language Server!",
        "Turku <3 Frontend November meetup 2022",
        Some("https://www.youtube.com/watch?v=otTm4W5VWu4"),
    ),
    talk(
        "You might not need a mouse",
        "Aurajoki Overflow November meetup 2022",
        Some("https://www.youtube.com/watch?v=8OwnSr9Mnko"),
    ),
    talk(
        "Avoiding vendor lock-in through Web Components",
        "React Finland 2022",
        Some("https://www.youtube.com/watch?v=oy1hiAO5Cl0"),
    ),
    talk("Writing Javascript, but with types!", "HelsinkiJS November meetup 2021", None),
    talk(
        "Web Components: Utilizing the Web Platform",
        "Turku <3 Frontend October meetup 2021",
        Some("https://www.youtube.com/watch?v=V3PqSabh7b0"),
    ),
    talk(
        "Web Components in React",
        "React Finland 2021",
        Some("https://www.youtube.com/watch?v=fgtS_nfMOtw"),
    ),
];

impl Talk {
    fn listing(&self) -> ListingBlock {
        let block = ListingBlock::new(html! {
            h2.text-xl.font-semibold.text-link { (self.title) }
            p.text-lg { (self.event) }
            @if self.recording.is_none() {
                p.text-base.font-semibold { "No recording available" }
            }
        });

        match self.recording {
            Some(recording) => block.href(recording),
            None => block,
        }
    }
}

#[route("/speaking", title = "matsu.fi - Speaking")]
pub struct Speaking;

impl View for Speaking {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        ctx.components.define::<BackButton>()?;
        ctx.components.define::<ListingBlock>()?;

        let back = BackButton::new(ctx.href("/"));

        Ok(RenderThunk::new(move || {
            html! {
                div class="flex flex-col h-full gap-2 mt-[20vh] md:max-w-[60vw] mx-8 md:mx-auto" {
                    (element(&back))
                    div class="flex justify-between md:gap-18 gap-10 md:flex-row flex-col" {
                        div.flex.flex-col.gap-2 {
                            h1.font-semibold.text-2xl.text-white.inline-flex.items-center.gap-1 {
                                (Icon::Megaphone) " Speaking"
                            }
                        }

                        div.flex.flex-col.gap-4 {
                            @for entry in TALKS {
                                (element(&entry.listing()))
                            }
                        }
                    }
                }
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_talks_without_recording_are_not_links() {
        let unrecorded = TALKS[0].listing().render_element().into_string();
        assert!(unrecorded.contains("No recording available"));
        assert!(!unrecorded.contains("<a "));

        let recorded = TALKS[1].listing().render_element().into_string();
        assert!(recorded.contains(r#"href="https://www.youtube.com/watch?v=IwuXGD5PDSY""#));
        assert!(!recorded.contains("No recording available"));
    }
}
