//! The client-side router: matches locations against the route table and renders the matched view.
//!
//! ## Example
//! ```rust
//! use matsu::prelude::*;
//! use maud::html;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut router = Router::builder()
//!         .routes(vec![
//!             RouteDescriptor::from_fn("/", |_| Ok(RenderThunk::new(|| html! { h1 { "Home" } })))
//!                 .with_title("Home"),
//!             RouteDescriptor::from_fn("/projects", |_| {
//!                 Ok(RenderThunk::new(|| html! { h1 { "Projects" } }))
//!             })
//!             .with_title("Projects"),
//!         ])
//!         .target(MountNode::new("body"))
//!         .build()?;
//!
//!     router.start("/")?;
//!     assert_eq!(router.document_title(), Some("Home"));
//!
//!     router.navigate("/projects")?;
//!     assert_eq!(router.target().inner_html(), "<h1>Projects</h1>");
//!     Ok(())
//! }
//! ```
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::time::Instant;

use log::{debug, error, info, warn};
use maud::html;

use crate::components::ComponentRegistry;
use crate::errors::{ConfigError, NavigationError, RenderFailure, RenderStage, RouterError};
use crate::logging::{FormatElapsedTimeOptions, format_elapsed_time};
use crate::navigation::{History, IgnoreReason, NavigationEvent, Navigator};
use crate::renderer::{HtmlRenderer, MountNode, MountTarget, Renderer};
use crate::route::{
    PrepareResult, RenderThunk, RouteDescriptor, RouteTable, View, ViewContext,
};
use crate::routing::{Location, RouteParams};

/// Router configuration.
///
/// ## Example
/// ```rust
/// use matsu::router::RouterOptions;
///
/// let options = RouterOptions {
///     origin: "https://matsuuu.github.io".to_string(),
///     base: Some("/matsu.fi".to_string()),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Origin the site is served from. Links to other origins are left to the browser.
    pub origin: String,
    /// Path prefix the site is served under, e.g. `/matsu.fi`. Stripped from locations before matching.
    pub base: Option<String>,
    /// Document title while the not-found view is shown.
    pub not_found_title: String,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            origin: "http://localhost".to_string(),
            base: None,
            not_found_title: "Not Found".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    /// Built, not started yet.
    Idle,
    /// Started, handling navigation.
    Active,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The route at `route` in the table was rendered.
    Rendered { path: String, route: usize },
    /// Nothing matched, the not-found view was rendered.
    NotFound { path: String },
    /// The view failed, the previous content was kept.
    Failed { path: String, stage: RenderStage },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Dispatched(DispatchOutcome),
    /// The event was left to the browser.
    Ignored(IgnoreReason),
}

pub type ErrorHook = Box<dyn FnMut(&RenderFailure)>;
pub type NotFoundHook = Box<dyn FnMut(&NavigationError)>;

/// Rendered when no route matches, unless [`RouterBuilder::not_found`] sets another view.
pub struct DefaultNotFound;

impl View for DefaultNotFound {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        let path = ctx.current_path.to_string();
        let home = ctx.href("/");

        Ok(RenderThunk::new(move || {
            html! {
                main.not-found {
                    h1 { "404 - Not Found" }
                    p { "Nothing lives at " code { (path) } "." }
                    a href=(home) { "Take me back" }
                }
            }
        }))
    }
}

pub struct RouterBuilder<T: MountTarget> {
    routes: Vec<RouteDescriptor>,
    renderer: Option<Box<dyn Renderer<T>>>,
    target: Option<T>,
    options: RouterOptions,
    components: ComponentRegistry,
    not_found: Option<Box<dyn View>>,
    on_error: Option<ErrorHook>,
    on_not_found: Option<NotFoundHook>,
}

impl<T: MountTarget> Default for RouterBuilder<T> {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            renderer: None,
            target: None,
            options: RouterOptions::default(),
            components: ComponentRegistry::new(),
            not_found: None,
            on_error: None,
            on_not_found: None,
        }
    }
}

impl<T: MountTarget> RouterBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn routes(mut self, routes: Vec<RouteDescriptor>) -> Self {
        self.routes = routes;
        self
    }

    pub fn renderer(mut self, renderer: impl Renderer<T> + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn target(mut self, target: T) -> Self {
        self.target = Some(target);
        self
    }

    pub fn options(mut self, options: RouterOptions) -> Self {
        self.options = options;
        self
    }

    /// Starts from an existing registry, for components the page shell already uses.
    pub fn components(mut self, components: ComponentRegistry) -> Self {
        self.components = components;
        self
    }

    pub fn not_found(mut self, view: impl View + 'static) -> Self {
        self.not_found = Some(Box::new(view));
        self
    }

    /// Called once for every dispatch whose view fails.
    pub fn on_error(mut self, hook: impl FnMut(&RenderFailure) + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    /// Called once for every dispatch that matches no route, before the not-found view is rendered.
    pub fn on_not_found(mut self, hook: impl FnMut(&NavigationError) + 'static) -> Self {
        self.on_not_found = Some(Box::new(hook));
        self
    }

    pub fn build(self) -> Result<Router<T>, ConfigError> {
        let table = RouteTable::new(self.routes)?;
        let target = self.target.ok_or(ConfigError::MissingMountTarget)?;
        let navigator = Navigator::new(&self.options.origin, self.options.base.as_deref())?;

        let not_found = match self.not_found {
            Some(view) => RouteDescriptor::new("/404", BoxedView(view)),
            None => RouteDescriptor::new("/404", DefaultNotFound),
        }
        .with_title(self.options.not_found_title.clone());

        Ok(Router {
            table,
            renderer: self
                .renderer
                .unwrap_or_else(|| Box::new(HtmlRenderer) as Box<dyn Renderer<T>>),
            target,
            navigator,
            options: self.options,
            not_found,
            on_error: self
                .on_error
                .unwrap_or_else(|| Box::new(|_: &RenderFailure| {})),
            on_not_found: self
                .on_not_found
                .unwrap_or_else(|| Box::new(|_: &NavigationError| {})),
            components: self.components,
            history: History::new(),
            state: RouterState::Idle,
            current: None,
            location: None,
            title: None,
        })
    }
}

pub(crate) struct BoxedView(pub(crate) Box<dyn View>);

impl View for BoxedView {
    fn prepare(&self, ctx: &mut ViewContext) -> PrepareResult {
        self.0.prepare(ctx)
    }
}

pub struct Router<T: MountTarget = MountNode> {
    table: RouteTable,
    renderer: Box<dyn Renderer<T>>,
    target: T,
    navigator: Navigator,
    options: RouterOptions,
    not_found: RouteDescriptor,
    on_error: ErrorHook,
    on_not_found: NotFoundHook,
    components: ComponentRegistry,
    history: History,
    state: RouterState,
    current: Option<usize>,
    location: Option<Location>,
    title: Option<String>,
}

impl<T: MountTarget> Router<T> {
    pub fn builder() -> RouterBuilder<T> {
        RouterBuilder::new()
    }

    /// Starts handling navigation and renders the view for the initial `location`.
    pub fn start(&mut self, location: &str) -> Result<DispatchOutcome, RouterError> {
        if self.state == RouterState::Active {
            return Err(RouterError::AlreadyStarted);
        }

        let href = self.navigator.to_relative(location)?;
        self.state = RouterState::Active;
        self.history.replace(href.clone());

        debug!(target: "router", "started at {}", href);
        Ok(self.render_href(&href))
    }

    pub fn handle(&mut self, event: NavigationEvent) -> Result<Navigation, RouterError> {
        self.ensure_active()?;

        match event {
            NavigationEvent::Click(click) => {
                let current = self.history.current().unwrap_or("/").to_string();
                match self.navigator.intercept(&current, &click) {
                    Ok(href) => Ok(Navigation::Dispatched(self.push_and_dispatch(href))),
                    Err(reason) => {
                        debug!(target: "router", "ignoring click on {}: {}", click.href, reason);
                        Ok(Navigation::Ignored(reason))
                    }
                }
            }
            NavigationEvent::PopState(location) => {
                let href = self.navigator.to_relative(&location)?;
                let previous = self.history.current().map(str::to_string);
                self.history.replace(href.clone());

                let outcome = self.render_href(&href);
                if let (DispatchOutcome::Failed { .. }, Some(previous)) = (&outcome, previous) {
                    self.history.replace(previous);
                }
                Ok(Navigation::Dispatched(outcome))
            }
        }
    }

    /// Navigates to `href` as if an in-app link to it was followed.
    pub fn navigate(&mut self, href: &str) -> Result<DispatchOutcome, RouterError> {
        self.ensure_active()?;

        let current = self.history.current().unwrap_or("/").to_string();
        let url = self
            .navigator
            .resolve(&current, href)
            .map_err(|e| RouterError::InvalidLocation {
                location: href.to_string(),
                reason: e.to_string(),
            })?;
        let href = self.navigator.to_relative(url.as_str())?;

        Ok(self.push_and_dispatch(href))
    }

    /// Dispatches `href` and records it in history, unless the view could not be shown.
    fn push_and_dispatch(&mut self, href: String) -> DispatchOutcome {
        let outcome = self.render_href(&href);
        if !matches!(outcome, DispatchOutcome::Failed { .. }) {
            self.history.push(href);
        }
        outcome
    }

    /// Goes one entry back in history, returns `None` if there is nothing to go back to.
    pub fn back(&mut self) -> Result<Option<DispatchOutcome>, RouterError> {
        self.ensure_active()?;

        let Some(href) = self.history.back().map(str::to_string) else {
            return Ok(None);
        };

        let outcome = self.render_href(&href);
        if matches!(outcome, DispatchOutcome::Failed { .. }) {
            self.history.forward();
        }
        Ok(Some(outcome))
    }

    pub fn forward(&mut self) -> Result<Option<DispatchOutcome>, RouterError> {
        self.ensure_active()?;

        let Some(href) = self.history.forward().map(str::to_string) else {
            return Ok(None);
        };

        let outcome = self.render_href(&href);
        if matches!(outcome, DispatchOutcome::Failed { .. }) {
            self.history.back();
        }
        Ok(Some(outcome))
    }

    /// Matches `href` and renders the result without touching history.
    ///
    /// Only fails when the router was not started: rendering problems are reported through the hooks and the outcome.
    pub fn dispatch(&mut self, href: &str) -> Result<DispatchOutcome, RouterError> {
        self.ensure_active()?;
        Ok(self.render_href(href))
    }

    fn render_href(&mut self, href: &str) -> DispatchOutcome {
        let start = Instant::now();
        let location = Location::parse(href, self.navigator.base());
        let base = self.navigator.base().map(str::to_string);

        let Some((index, params)) = self.table.find(&location) else {
            return self.dispatch_not_found(location, start);
        };
        let Some(route) = self.table.get(index) else {
            return self.dispatch_not_found(location, start);
        };

        let result = render_route(
            route,
            &params,
            &location.path,
            base.as_deref(),
            &mut self.components,
            self.renderer.as_mut(),
            &mut self.target,
        );

        match result {
            Ok(()) => {
                if let Some(title) = route.title() {
                    self.title = Some(title.to_string());
                }

                info!(target: "router", "{} {}", location.path, format_elapsed_time(start.elapsed(), &FormatElapsedTimeOptions::dispatch()));

                let path = location.path.clone();
                self.current = Some(index);
                self.location = Some(location);
                DispatchOutcome::Rendered { path, route: index }
            }
            Err(failure) => self.report_failure(failure),
        }
    }

    fn dispatch_not_found(&mut self, location: Location, start: Instant) -> DispatchOutcome {
        let error = NavigationError::NotFound {
            path: location.path.clone(),
        };
        warn!(target: "router", "{}", error);
        (self.on_not_found)(&error);

        let base = self.navigator.base().map(str::to_string);
        let result = render_route(
            &self.not_found,
            &RouteParams::default(),
            &location.path,
            base.as_deref(),
            &mut self.components,
            self.renderer.as_mut(),
            &mut self.target,
        );

        match result {
            Ok(()) => {
                self.title = Some(self.options.not_found_title.clone());
                info!(target: "router", "{} {} {}", location.path, "(not found)", format_elapsed_time(start.elapsed(), &FormatElapsedTimeOptions::dispatch()));

                let path = location.path.clone();
                self.current = None;
                self.location = Some(location);
                DispatchOutcome::NotFound { path }
            }
            Err(failure) => self.report_failure(failure),
        }
    }

    fn report_failure(&mut self, failure: RenderFailure) -> DispatchOutcome {
        error!(target: "router", "{}", failure);
        (self.on_error)(&failure);

        DispatchOutcome::Failed {
            path: failure.path,
            stage: failure.stage,
        }
    }

    fn ensure_active(&self) -> Result<(), RouterError> {
        match self.state {
            RouterState::Active => Ok(()),
            RouterState::Idle => Err(RouterError::NotStarted),
        }
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    /// The route last rendered, `None` before the first dispatch or while the not-found view is shown.
    pub fn current_route(&self) -> Option<&RouteDescriptor> {
        self.current.and_then(|index| self.table.get(index))
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_ref()
    }

    pub fn document_title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn routes(&self) -> &RouteTable {
        &self.table
    }

    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}

/// Prepares the view of `route` and hands it to the renderer. Panics inside the view or the renderer are reported
/// as failures like any other error.
pub(crate) fn render_route<T: MountTarget>(
    route: &RouteDescriptor,
    params: &RouteParams,
    path: &str,
    base: Option<&str>,
    components: &mut ComponentRegistry,
    renderer: &mut dyn Renderer<T>,
    target: &mut T,
) -> Result<(), RenderFailure> {
    let mut ctx = ViewContext {
        params,
        components,
        current_path: path,
        base,
    };

    let thunk = match catch_unwind(AssertUnwindSafe(|| route.view().prepare(&mut ctx))) {
        Ok(Ok(thunk)) => thunk,
        Ok(Err(e)) => return Err(RenderFailure::from_error(path, RenderStage::Prepare, e)),
        Err(payload) => {
            return Err(RenderFailure::from_panic(path, RenderStage::Prepare, payload));
        }
    };

    match catch_unwind(AssertUnwindSafe(|| renderer.render(thunk, route, target))) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(e)) => Err(RenderFailure::from_error(path, RenderStage::Render, e)),
        Err(payload) => Err(RenderFailure::from_panic(path, RenderStage::Render, payload)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::Component;
    use crate::navigation::{AnchorClick, Modifiers};
    use maud::Markup;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn page(path: &str, title: &str, body: &'static str) -> RouteDescriptor {
        RouteDescriptor::from_fn(path, move |_| Ok(RenderThunk::new(move || body))).with_title(title)
    }

    fn site() -> Vec<RouteDescriptor> {
        vec![
            page(
                "/",
                "Home",
                r#"<main id="home"><a href="/projects">Projects</a><a href="https://github.com/Matsuuu" target="_blank">GitHub</a></main>"#,
            ),
            page(
                "/projects",
                "Projects",
                r#"<main id="projects"><a href="/">cd ..</a></main>"#,
            ),
        ]
    }

    fn router(routes: Vec<RouteDescriptor>) -> Router<MountNode> {
        Router::builder()
            .routes(routes)
            .target(MountNode::new("body"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_start_renders_initial_route() {
        let mut router = router(site());
        assert_eq!(router.state(), RouterState::Idle);

        let outcome = router.start("/").unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Rendered {
                path: "/".to_string(),
                route: 0
            }
        );
        assert_eq!(router.state(), RouterState::Active);
        assert!(router.target().contains(r#"id="home""#));
        assert_eq!(router.document_title(), Some("Home"));
        assert_eq!(router.current_route().unwrap().path(), "/");
    }

    #[test]
    fn test_double_start_is_an_error() {
        let mut router = router(site());
        router.start("/").unwrap();

        assert_eq!(router.start("/projects"), Err(RouterError::AlreadyStarted));
        assert!(router.target().contains(r#"id="home""#));
    }

    #[test]
    fn test_navigation_before_start_is_an_error() {
        let mut router = router(site());

        assert_eq!(
            router.handle(NavigationEvent::Click(AnchorClick::new("/projects"))),
            Err(RouterError::NotStarted)
        );
        assert_eq!(router.navigate("/projects"), Err(RouterError::NotStarted));
        assert_eq!(router.back(), Err(RouterError::NotStarted));
        assert_eq!(router.dispatch("/"), Err(RouterError::NotStarted));
        assert_eq!(router.target().commits(), 0);
        assert!(router.location().is_none());
    }

    #[test]
    fn test_build_without_target() {
        let result = Router::<MountNode>::builder().routes(site()).build();
        assert!(matches!(result, Err(ConfigError::MissingMountTarget)));
    }

    #[test]
    fn test_build_without_routes() {
        let result = Router::builder().target(MountNode::new("body")).build();
        assert!(matches!(result, Err(ConfigError::EmptyRouteTable)));
    }

    #[test]
    fn test_dispatch_replaces_previous_view() {
        let mut router = router(site());
        router.start("/").unwrap();

        router.dispatch("/projects").unwrap();

        assert_eq!(
            router.target().inner_html(),
            r#"<main id="projects"><a href="/">cd ..</a></main>"#
        );
        assert!(!router.target().contains("home"));
        assert_eq!(router.document_title(), Some("Projects"));
    }

    #[test]
    fn test_dispatch_same_path_twice_is_idempotent() {
        let mut router = router(site());
        router.start("/projects").unwrap();
        let first = router.target().inner_html().to_string();

        router.dispatch("/projects").unwrap();

        assert_eq!(router.target().inner_html(), first);
        assert_eq!(router.document_title(), Some("Projects"));
    }

    #[test]
    fn test_route_without_title_keeps_previous_title() {
        let mut routes = site();
        routes.push(RouteDescriptor::from_fn("/untitled", |_| {
            Ok(RenderThunk::new(|| "<p>untitled</p>"))
        }));
        let mut router = router(routes);
        router.start("/projects").unwrap();

        router.dispatch("/untitled").unwrap();

        assert_eq!(router.target().inner_html(), "<p>untitled</p>");
        assert_eq!(router.document_title(), Some("Projects"));
    }

    #[test]
    fn test_unknown_path_renders_not_found_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let seen = calls.clone();
        let mut router = Router::builder()
            .routes(site())
            .target(MountNode::new("body"))
            .on_not_found(move |error| seen.borrow_mut().push(error.to_string()))
            .build()
            .unwrap();
        router.start("/").unwrap();

        let outcome = router.dispatch("/does-not-exist").unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::NotFound {
                path: "/does-not-exist".to_string()
            }
        );
        assert_eq!(*calls.borrow(), vec!["No route matches `/does-not-exist`"]);
        assert!(router.target().contains("404 - Not Found"));
        assert!(router.target().contains("<code>/does-not-exist</code>"));
        assert_eq!(router.document_title(), Some("Not Found"));
        assert!(router.current_route().is_none());
    }

    struct Gone;

    impl View for Gone {
        fn prepare(&self, _ctx: &mut ViewContext) -> PrepareResult {
            Ok(RenderThunk::new(|| "<p>gone fishing</p>"))
        }
    }

    #[test]
    fn test_custom_not_found_view_and_title() {
        let mut router = Router::builder()
            .routes(site())
            .target(MountNode::new("body"))
            .not_found(Gone)
            .options(RouterOptions {
                not_found_title: "matsu.fi - 404".to_string(),
                ..Default::default()
            })
            .build()
            .unwrap();

        let outcome = router.start("/blog").unwrap();

        assert!(matches!(outcome, DispatchOutcome::NotFound { .. }));
        assert_eq!(router.target().inner_html(), "<p>gone fishing</p>");
        assert_eq!(router.document_title(), Some("matsu.fi - 404"));
    }

    #[test]
    fn test_failing_render_keeps_previous_view() {
        let failures = Rc::new(RefCell::new(Vec::new()));
        let seen = failures.clone();

        let mut routes = site();
        routes.push(
            RouteDescriptor::from_fn("/broken", |_| {
                Ok(RenderThunk::new(
                    || -> Result<String, Box<dyn std::error::Error>> {
                        Err("talk list unavailable".into())
                    },
                ))
            })
            .with_title("Broken"),
        );

        let mut router = Router::builder()
            .routes(routes)
            .target(MountNode::new("body"))
            .on_error(move |failure| seen.borrow_mut().push((failure.path.clone(), failure.stage)))
            .build()
            .unwrap();
        router.start("/").unwrap();
        let before = router.target().inner_html().to_string();

        let outcome = router.dispatch("/broken").unwrap();

        assert_eq!(
            outcome,
            DispatchOutcome::Failed {
                path: "/broken".to_string(),
                stage: RenderStage::Render
            }
        );
        assert_eq!(
            *failures.borrow(),
            vec![("/broken".to_string(), RenderStage::Render)]
        );
        assert_eq!(router.target().inner_html(), before);
        assert_eq!(router.target().commits(), 1);
        assert_eq!(router.document_title(), Some("Home"));
        assert_eq!(router.current_route().unwrap().path(), "/");
    }

    fn site_with_broken_page() -> Vec<RouteDescriptor> {
        let mut routes = site();
        routes.push(RouteDescriptor::from_fn("/broken", |_| {
            Ok(RenderThunk::new(
                || -> Result<String, Box<dyn std::error::Error>> {
                    Err("talk list unavailable".into())
                },
            ))
        }));
        routes
    }

    #[test]
    fn test_failing_navigation_is_not_recorded_in_history() {
        let mut router = router(site_with_broken_page());
        router.start("/").unwrap();

        let outcome = router.navigate("/broken").unwrap();
        assert!(matches!(outcome, DispatchOutcome::Failed { .. }));
        assert_eq!(router.history().len(), 1);
        assert_eq!(router.history().current(), Some("/"));
        assert_eq!(router.location().unwrap().path, "/");

        let clicked = router
            .handle(NavigationEvent::Click(AnchorClick::new("/broken")))
            .unwrap();
        assert!(matches!(clicked, Navigation::Dispatched(DispatchOutcome::Failed { .. })));
        assert_eq!(router.history().len(), 1);

        // Relative links still resolve against the page on screen.
        router.navigate("projects").unwrap();
        assert_eq!(router.history().current(), Some("/projects"));
        assert_eq!(
            router.back().unwrap(),
            Some(DispatchOutcome::Rendered {
                path: "/".to_string(),
                route: 0
            })
        );
        assert_eq!(router.target().commits(), 3);
    }

    #[test]
    fn test_failing_history_move_stays_on_current_entry() {
        let mut router = router(site_with_broken_page());
        router.start("/broken").unwrap();
        router.navigate("/projects").unwrap();

        let outcome = router.back().unwrap();
        assert!(matches!(outcome, Some(DispatchOutcome::Failed { .. })));
        assert_eq!(router.history().current(), Some("/projects"));
        assert!(router.history().can_go_back());

        let popped = router
            .handle(NavigationEvent::PopState("http://localhost/broken".to_string()))
            .unwrap();
        assert!(matches!(popped, Navigation::Dispatched(DispatchOutcome::Failed { .. })));
        assert_eq!(router.history().current(), Some("/projects"));
        assert!(router.target().contains(r#"id="projects""#));
    }

    #[test]
    fn test_failing_prepare_is_reported() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();

        let mut routes = site();
        routes.push(RouteDescriptor::from_fn("/broken", |_| {
            Err("missing content".into())
        }));

        let mut router = Router::builder()
            .routes(routes)
            .target(MountNode::new("body"))
            .on_error(move |failure| {
                assert_eq!(failure.message, "missing content");
                counter.set(counter.get() + 1);
            })
            .build()
            .unwrap();
        router.start("/").unwrap();

        let outcome = router.dispatch("/broken").unwrap();

        assert!(matches!(
            outcome,
            DispatchOutcome::Failed {
                stage: RenderStage::Prepare,
                ..
            }
        ));
        assert_eq!(count.get(), 1);
        assert!(router.target().contains(r#"id="home""#));
    }

    #[test]
    fn test_panicking_render_closure_is_reported() {
        let count = Rc::new(Cell::new(0));
        let counter = count.clone();

        let mut routes = site();
        routes.push(RouteDescriptor::from_fn("/panics", |_| {
            Ok(RenderThunk::new(|| -> String { panic!("template exploded") }))
        }));

        let mut router = Router::builder()
            .routes(routes)
            .target(MountNode::new("body"))
            .on_error(move |failure| {
                assert_eq!(failure.message, "template exploded");
                counter.set(counter.get() + 1);
            })
            .build()
            .unwrap();
        router.start("/").unwrap();

        router.dispatch("/panics").unwrap();

        assert_eq!(count.get(), 1);
        assert!(router.target().contains(r#"id="home""#));
    }

    #[test]
    fn test_clicking_rendered_link_navigates() {
        let mut router = router(site());
        router.start("/").unwrap();

        let anchor = router.target().find_anchor("/projects").unwrap();
        let navigation = router
            .handle(NavigationEvent::Click(anchor.click()))
            .unwrap();

        assert_eq!(
            navigation,
            Navigation::Dispatched(DispatchOutcome::Rendered {
                path: "/projects".to_string(),
                route: 1
            })
        );
        assert!(router.target().contains(r#"id="projects""#));
        assert!(!router.target().contains(r#"id="home""#));
        assert_eq!(router.document_title(), Some("Projects"));
        assert_eq!(router.history().len(), 2);
    }

    #[test]
    fn test_external_and_modified_clicks_are_ignored() {
        let mut router = router(site());
        router.start("/").unwrap();

        let github = router
            .target()
            .find_anchor("https://github.com/Matsuuu")
            .unwrap();
        assert_eq!(
            router.handle(NavigationEvent::Click(github.click())).unwrap(),
            Navigation::Ignored(IgnoreReason::Target("_blank".to_string()))
        );

        let meta = Modifiers {
            meta: true,
            ..Default::default()
        };
        assert_eq!(
            router
                .handle(NavigationEvent::Click(
                    AnchorClick::new("/projects").with_modifiers(meta)
                ))
                .unwrap(),
            Navigation::Ignored(IgnoreReason::ModifierKey)
        );

        assert_eq!(router.target().commits(), 1);
        assert_eq!(router.history().len(), 1);
    }

    #[test]
    fn test_back_and_forward() {
        let mut router = router(site());
        router.start("/").unwrap();
        router.navigate("/projects").unwrap();

        let outcome = router.back().unwrap();
        assert!(matches!(outcome, Some(DispatchOutcome::Rendered { route: 0, .. })));
        assert_eq!(router.document_title(), Some("Home"));
        assert_eq!(router.back().unwrap(), None);

        router.forward().unwrap();
        assert!(router.target().contains(r#"id="projects""#));
        assert_eq!(router.forward().unwrap(), None);
    }

    #[test]
    fn test_pop_state_redispatches() {
        let mut router = router(site());
        router.start("/").unwrap();
        router.navigate("/projects").unwrap();

        let navigation = router
            .handle(NavigationEvent::PopState("http://localhost/".to_string()))
            .unwrap();

        assert!(matches!(
            navigation,
            Navigation::Dispatched(DispatchOutcome::Rendered { route: 0, .. })
        ));
        assert!(router.target().contains(r#"id="home""#));
    }

    #[test]
    fn test_pop_state_from_other_origin_is_rejected() {
        let mut router = router(site());
        router.start("/").unwrap();

        assert!(matches!(
            router.handle(NavigationEvent::PopState("https://example.com/".to_string())),
            Err(RouterError::InvalidLocation { .. })
        ));
    }

    #[test]
    fn test_base_is_stripped_before_matching() {
        let mut router = Router::builder()
            .routes(site())
            .target(MountNode::new("body"))
            .options(RouterOptions {
                origin: "https://matsuuu.github.io".to_string(),
                base: Some("/matsu.fi".to_string()),
                ..Default::default()
            })
            .build()
            .unwrap();

        router.start("https://matsuuu.github.io/matsu.fi/").unwrap();
        assert_eq!(router.document_title(), Some("Home"));

        let outcome = router.navigate("/matsu.fi/projects/").unwrap();
        assert!(matches!(outcome, DispatchOutcome::Rendered { route: 1, .. }));
        assert_eq!(router.location().unwrap().path, "/projects");
    }

    #[test]
    fn test_params_reach_the_view() {
        let routes = vec![RouteDescriptor::from_fn("/talks/[year]", |ctx| {
            let year = ctx.param("year").unwrap_or_default().to_string();
            Ok(RenderThunk::new(move || format!("<h1>Talks of {}</h1>", year)))
        })];
        let mut router = router(routes);

        router.start("/talks/2024").unwrap();

        assert_eq!(router.target().inner_html(), "<h1>Talks of 2024</h1>");
    }

    struct BackButton;

    impl Component for BackButton {
        const TAG: &'static str = "back-button";

        fn template(&self) -> Markup {
            maud::html! { a href="/" { "cd .." } }
        }
    }

    #[test]
    fn test_views_define_components_while_preparing() {
        let routes = vec![
            RouteDescriptor::from_fn("/", |ctx| {
                ctx.components.define::<BackButton>()?;
                Ok(RenderThunk::new(|| BackButton.render_element()))
            }),
            page("/me", "Me", "<p>me</p>"),
        ];
        let mut router = router(routes);
        assert!(!router.components().is_defined("back-button"));

        router.start("/").unwrap();
        router.navigate("/me").unwrap();
        router.navigate("/").unwrap();

        assert!(router.components().is_defined("back-button"));
        assert_eq!(router.components().len(), 1);
        assert!(router.target().contains("<back-button>"));
    }

    #[test]
    fn test_custom_renderer_receives_route() {
        let mut router = Router::builder()
            .routes(site())
            .target(MountNode::new("#app"))
            .renderer(
                |view: RenderThunk,
                 route: &RouteDescriptor,
                 target: &mut MountNode|
                 -> Result<(), Box<dyn std::error::Error>> {
                    let html = view.render().into_result()?;
                    target.replace_children(format!(
                        "<div data-route=\"{}\">{}</div>",
                        route.path(),
                        html
                    ));
                    Ok(())
                },
            )
            .build()
            .unwrap();

        router.start("/projects").unwrap();

        assert!(router.target().inner_html().starts_with(r#"<div data-route="/projects">"#));
    }
}
