//! Committing view output into the page.
use log::warn;

use crate::inspect::{Anchor, inspect_markup};
use crate::route::{RenderThunk, RouteDescriptor};

/// The node every view is rendered under.
pub trait MountTarget {
    /// Replaces everything under the node with `html`.
    fn replace_children(&mut self, html: String);

    fn inner_html(&self) -> &str;
}

/// In-memory mount node, standing in for a DOM element outside of a browser.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MountNode {
    selector: String,
    html: String,
    commits: usize,
}

impl MountNode {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            html: String::new(),
            commits: 0,
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// How many times content was committed into the node.
    pub fn commits(&self) -> usize {
        self.commits
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.html.contains(needle)
    }

    pub fn anchors(&self) -> Vec<Anchor> {
        match inspect_markup(&self.html) {
            Ok(summary) => summary.anchors,
            Err(e) => {
                warn!(target: "router", "Could not inspect the content of {}: {}", self.selector, e);
                Vec::new()
            }
        }
    }

    /// Finds the first anchor whose `href` attribute is exactly `href`.
    pub fn find_anchor(&self, href: &str) -> Option<Anchor> {
        self.anchors().into_iter().find(|anchor| anchor.href == href)
    }
}

impl MountTarget for MountNode {
    fn replace_children(&mut self, html: String) {
        self.html = html;
        self.commits += 1;
    }

    fn inner_html(&self) -> &str {
        &self.html
    }
}

/// Resolves a render thunk and commits its output into the mount target.
///
/// Implementations must resolve the thunk before touching the target: when the thunk fails, the target has to keep
/// showing the previous view. Closures with the same signature as [`Renderer::render`] are renderers too.
pub trait Renderer<T: MountTarget> {
    fn render(
        &mut self,
        view: RenderThunk,
        route: &RouteDescriptor,
        target: &mut T,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

impl<T, F> Renderer<T> for F
where
    T: MountTarget,
    F: FnMut(RenderThunk, &RouteDescriptor, &mut T) -> Result<(), Box<dyn std::error::Error>>,
{
    fn render(
        &mut self,
        view: RenderThunk,
        route: &RouteDescriptor,
        target: &mut T,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self(view, route, target)
    }
}

/// Default renderer, replacing the whole content of the target with the view's markup.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl<T: MountTarget> Renderer<T> for HtmlRenderer {
    fn render(
        &mut self,
        view: RenderThunk,
        _route: &RouteDescriptor,
        target: &mut T,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let html = view.render().into_result()?;
        target.replace_children(html);
        Ok(())
    }
}
