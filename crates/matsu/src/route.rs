//! Core traits and structs to define the routes of your site.
//!
//! Every view implements the [`View`] trait. Views are attached to a path through a [`RouteDescriptor`], usually
//! created by the [`route`](crate::route::prelude::route) attribute and the [`routes!`](crate::routes) macro, and
//! collected into a [`RouteTable`] that the [`Router`](crate::router::Router) dispatches against.
use crate::components::ComponentRegistry;
use crate::errors::ConfigError;
use crate::routing::{
    Location, RouteParams, Segment, is_dynamic, match_pattern, parse_pattern, pattern_key,
    with_base,
};
use rustc_hash::FxHashSet;

/// The output of a render thunk, either markup as text or an error.
///
/// Typically built through the [`Into<RenderResult>`](std::convert::Into) implementations for strings, [`maud::Markup`]
/// and results. End users should rarely need to interact with this enum directly.
pub enum RenderResult {
    Text(String),
    Err(Box<dyn std::error::Error>),
}

impl RenderResult {
    pub fn into_result(self) -> Result<String, Box<dyn std::error::Error>> {
        match self {
            RenderResult::Text(text) => Ok(text),
            RenderResult::Err(e) => Err(e),
        }
    }
}

impl<T> From<Result<T, Box<dyn std::error::Error>>> for RenderResult
where
    T: Into<RenderResult>,
{
    fn from(val: Result<T, Box<dyn std::error::Error>>) -> Self {
        match val {
            Ok(s) => s.into(),
            Err(e) => RenderResult::Err(e),
        }
    }
}

impl From<String> for RenderResult {
    fn from(val: String) -> Self {
        RenderResult::Text(val)
    }
}

impl From<&str> for RenderResult {
    fn from(val: &str) -> Self {
        RenderResult::Text(val.to_string())
    }
}

/// A deferred render, returned by [`View::prepare`]. Calling [`RenderThunk::render`] produces the view's markup.
pub struct RenderThunk(Box<dyn FnOnce() -> RenderResult>);

impl RenderThunk {
    pub fn new<F, R>(render: F) -> Self
    where
        F: FnOnce() -> R + 'static,
        R: Into<RenderResult>,
    {
        Self(Box::new(move || render().into()))
    }

    pub fn render(self) -> RenderResult {
        (self.0)()
    }
}

impl std::fmt::Debug for RenderThunk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("RenderThunk")
    }
}

pub type PrepareResult = Result<RenderThunk, Box<dyn std::error::Error>>;

/// Allows a view to access route parameters and register the components it renders.
///
/// ## Example
/// ```rust
/// use matsu::route::prelude::*;
/// use maud::html;
///
/// #[route("/me", title = "Me")]
/// pub struct Me;
///
/// impl View for Me {
///     fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
///         let home = ctx.href("/");
///         Ok(RenderThunk::new(move || html! { a href=(home) { "cd .." } }))
///     }
/// }
/// ```
pub struct ViewContext<'a> {
    pub params: &'a RouteParams,
    pub components: &'a mut ComponentRegistry,
    /// The path being dispatched, without the site base, e.g. `/projects`.
    pub current_path: &'a str,
    /// The site base, e.g. `Some("/matsu.fi")`.
    pub base: Option<&'a str>,
}

impl ViewContext<'_> {
    /// Prefixes a root-relative in-app path with the site base.
    pub fn href(&self, path: &str) -> String {
        with_base(path, self.base)
    }

    pub fn param(&self, key: &str) -> Option<&str> {
        self.params.get(key)
    }
}

/// Must be implemented by every view of your site.
///
/// Preparing a view is the place to register the components it depends on, the actual markup is produced later,
/// when the router decides to call the returned [`RenderThunk`].
pub trait View {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult;
}

struct FnView<F>(F);

impl<F> View for FnView<F>
where
    F: Fn(&mut ViewContext<'_>) -> PrepareResult,
{
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        (self.0)(ctx)
    }
}

#[doc(hidden)]
/// Used internally by Matsu and should not be implemented by the user.
/// We expose it because [`matsu_macros::route`] implements it for the user behind the scenes.
pub trait InternalRoute {
    fn route_raw(&self) -> String;

    fn title(&self) -> Option<String> {
        None
    }
}

/// One navigable destination: a path, the view rendered for it and the document title to apply.
pub struct RouteDescriptor {
    path: String,
    title: Option<String>,
    view: Box<dyn View>,
    pattern: Vec<Segment>,
}

impl RouteDescriptor {
    pub fn new(path: impl Into<String>, view: impl View + 'static) -> Self {
        let path = path.into();
        let pattern = parse_pattern(&path);

        Self {
            path,
            title: None,
            view: Box::new(view),
            pattern,
        }
    }

    /// Builds a descriptor from a closure, handy for small views and tests.
    pub fn from_fn<F>(path: impl Into<String>, prepare: F) -> Self
    where
        F: Fn(&mut ViewContext<'_>) -> PrepareResult + 'static,
    {
        Self::new(path, FnView(prepare))
    }

    /// Builds a descriptor from a view annotated with the [`route`](crate::route::prelude::route) attribute.
    pub fn from_route<R>(route: R) -> Self
    where
        R: View + InternalRoute + 'static,
    {
        let path = route.route_raw();
        let title = route.title();
        let mut descriptor = Self::new(path, route);
        descriptor.title = title;
        descriptor
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn view(&self) -> &dyn View {
        self.view.as_ref()
    }

    pub fn is_dynamic(&self) -> bool {
        is_dynamic(&self.pattern)
    }

    /// The normalized pattern of the route. Two routes with the same key are duplicates.
    pub fn key(&self) -> String {
        pattern_key(&self.pattern)
    }
}

impl std::fmt::Debug for RouteDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteDescriptor")
            .field("path", &self.path)
            .field("title", &self.title)
            .finish()
    }
}

/// An ordered, validated and immutable list of routes.
///
/// Static routes always win over dynamic ones. Among dynamic routes, the first one in table order that matches wins.
#[derive(Debug)]
pub struct RouteTable {
    routes: Vec<RouteDescriptor>,
}

impl RouteTable {
    pub fn new(routes: Vec<RouteDescriptor>) -> Result<Self, ConfigError> {
        if routes.is_empty() {
            return Err(ConfigError::EmptyRouteTable);
        }

        let mut seen = FxHashSet::default();
        for route in &routes {
            if !route.path.starts_with('/') {
                return Err(ConfigError::InvalidPath {
                    path: route.path.clone(),
                });
            }

            if !seen.insert(route.key()) {
                return Err(ConfigError::DuplicatePath {
                    path: route.path.clone(),
                });
            }
        }

        Ok(Self { routes })
    }

    pub fn find(&self, location: &Location) -> Option<(usize, RouteParams)> {
        let exact = self
            .routes
            .iter()
            .position(|route| {
                !route.is_dynamic() && match_pattern(&route.pattern, &location.path).is_some()
            });

        if let Some(index) = exact {
            return Some((index, RouteParams::default()));
        }

        self.routes
            .iter()
            .enumerate()
            .filter(|(_, route)| route.is_dynamic())
            .find_map(|(index, route)| {
                match_pattern(&route.pattern, &location.path).map(|params| (index, params))
            })
    }

    pub fn get(&self, index: usize) -> Option<&RouteDescriptor> {
        self.routes.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RouteDescriptor> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

pub mod prelude {
    //! Re-exports of the most commonly used types and traits for defining views.
    //!
    //! This module is meant to be glob imported in your views files.
    //!
    //! ## Example
    //! ```rust
    //! use matsu::route::prelude::*;
    //! ```
    pub use super::{
        PrepareResult, RenderResult, RenderThunk, RouteDescriptor, RouteTable, View, ViewContext,
    };
    pub use crate::components::{Component, ComponentRegistry};
    pub use crate::routing::RouteParams;
    pub use matsu_macros::route;
}
