//! Read-only scanning of rendered markup.
use lol_html::{RewriteStrSettings, element, errors::RewritingError, rewrite_str};

use crate::navigation::AnchorClick;

/// An `<a href>` element found in rendered markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub target: Option<String>,
    pub download: bool,
}

impl Anchor {
    /// Simulates a plain left click on this anchor.
    pub fn click(&self) -> AnchorClick {
        AnchorClick::from(self)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkupSummary {
    pub anchors: Vec<Anchor>,
    /// Custom element names, in order of first appearance.
    pub custom_elements: Vec<String>,
}

pub fn inspect_markup(html: &str) -> Result<MarkupSummary, RewritingError> {
    let mut anchors = Vec::new();
    let mut custom_elements: Vec<String> = Vec::new();

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("a[href]", |el| {
                    anchors.push(Anchor {
                        href: el.get_attribute("href").unwrap_or_default(),
                        target: el.get_attribute("target"),
                        download: el.has_attribute("download"),
                    });
                    Ok(())
                }),
                element!("*", |el| {
                    let name = el.tag_name().to_ascii_lowercase();
                    if name.contains('-') && !custom_elements.contains(&name) {
                        custom_elements.push(name);
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(MarkupSummary {
        anchors,
        custom_elements,
    })
}
