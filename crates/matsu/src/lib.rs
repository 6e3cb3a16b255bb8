#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

// Lets the code generated by `matsu_macros` refer to `matsu::` from inside this crate too.
extern crate self as matsu;

// Modules the end-user will interact directly or indirectly with
pub mod components;
pub mod errors;
pub mod inspect;
pub mod navigation;
pub mod renderer;
pub mod route;
pub mod router;
pub mod routing;

// Exports for end-users
pub use build::metadata::{BuildOutput, PageOutput, StaticAssetOutput};
pub use build::options::{BuildOptions, Layout, PageShell, default_layout};

// Re-export FxHashMap so that macro-generated code can use it without requiring users to add it as a dependency.
#[doc(hidden)]
pub use rustc_hash::FxHashMap;

mod build;
mod templating;

pub mod maud {
    //! Helpers for [Maud](https://maud.lambda.xyz), the templating macro views are written with.
    //!
    //! ## Example
    //! ```rust
    //! use matsu::route::prelude::*;
    //! use maud::html;
    //!
    //! #[route("/")]
    //! pub struct Index;
    //!
    //! impl View for Index {
    //!     fn prepare(&self, _ctx: &mut ViewContext) -> PrepareResult {
    //!         Ok(RenderThunk::new(|| html! { h1 { "Hello, world!" } }))
    //!     }
    //! }
    //! ```
    pub use crate::templating::maud_ext::*;
}

// Internal modules
mod logging;

use std::env;

use build::execute_build;
use logging::init_logging;
use route::RouteDescriptor;

/// Returns whether Matsu is running in development mode (`MATSU_DEV=true`).
///
/// Views can use it to show drafts or extra debugging output while working on the site.
pub fn is_dev() -> bool {
    if option_env!("MATSU_DEV") == Some("true") {
        return true;
    }

    env::var("MATSU_DEV").map(|v| v == "true").unwrap_or(false)
}

#[macro_export]
/// Collects views annotated with [`route`](crate::route::prelude::route) into the descriptors a
/// [`Router`](crate::router::Router) or [`build_site()`] expects.
///
/// ## Example
/// ```rust
/// use matsu::{routes, route::RouteTable};
///
/// mod views {
///     use matsu::route::prelude::*;
///
///     #[route("/", title = "matsu.fi - Home")]
///     pub struct Home;
///
///     impl View for Home {
///         fn prepare(&self, _ctx: &mut ViewContext) -> PrepareResult {
///             Ok(RenderThunk::new(|| "<h1>Home</h1>"))
///         }
///     }
///
///     #[route("/projects", title = "matsu.fi - Projects")]
///     pub struct Projects;
///
///     impl View for Projects {
///         fn prepare(&self, _ctx: &mut ViewContext) -> PrepareResult {
///             Ok(RenderThunk::new(|| "<h1>Projects</h1>"))
///         }
///     }
/// }
///
/// let table = RouteTable::new(routes![views::Home, views::Projects]).unwrap();
/// assert_eq!(table.len(), 2);
/// assert_eq!(table.get(1).unwrap().title(), Some("matsu.fi - Projects"));
/// ```
macro_rules! routes {
    [$($route:expr),* $(,)?] => {
        vec![$($crate::route::RouteDescriptor::from_route($route)),*]
    };
}

/// The version of Matsu being used.
///
/// Can be used to create a generator tag in the output HTML, see [`maud::generator`].
pub const GENERATOR: &str = concat!("Matsu v", env!("CARGO_PKG_VERSION"));

/// Prerenders every static route of the site to HTML files, for hosting on a static file server.
///
/// ## Example
/// Should be called from the main function of the site's binary crate.
/// ```rust,no_run
/// use matsu::{build_site, routes, BuildOptions, BuildOutput};
/// # mod views {
/// #     use matsu::route::prelude::*;
/// #     #[route("/")]
/// #     pub struct Home;
/// #     impl View for Home {
/// #         fn prepare(&self, _ctx: &mut ViewContext) -> PrepareResult {
/// #             Ok(RenderThunk::new(|| "<h1>Home</h1>"))
/// #         }
/// #     }
/// # }
///
/// fn main() -> Result<BuildOutput, Box<dyn std::error::Error>> {
///     build_site(routes![views::Home], BuildOptions::default())
/// }
/// ```
pub fn build_site(
    routes: Vec<RouteDescriptor>,
    options: BuildOptions,
) -> Result<BuildOutput, Box<dyn std::error::Error>> {
    init_logging();

    execute_build(routes, options)
}

pub mod prelude {
    //! Everything needed to set up a router and write views, meant to be glob imported.
    pub use crate::components::{Component, ComponentRegistry};
    pub use crate::navigation::{AnchorClick, IgnoreReason, Modifiers, MouseButton, NavigationEvent};
    pub use crate::renderer::{HtmlRenderer, MountNode, MountTarget, Renderer};
    pub use crate::route::{
        PrepareResult, RenderResult, RenderThunk, RouteDescriptor, RouteTable, View, ViewContext,
    };
    pub use crate::router::{DispatchOutcome, Navigation, Router, RouterOptions, RouterState};
    pub use crate::routing::RouteParams;
    pub use matsu_macros::route;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_is_dev() {
        // SAFETY: serialized with the other tests touching the environment
        unsafe { env::set_var("MATSU_DEV", "true") };
        assert!(is_dev());

        unsafe { env::set_var("MATSU_DEV", "false") };
        assert!(!is_dev());

        unsafe { env::remove_var("MATSU_DEV") };
    }

    mod views {
        use crate::prelude::*;

        #[route("/me", title = "matsu.fi - Me")]
        pub struct Me;

        impl View for Me {
            fn prepare(&self, _ctx: &mut ViewContext) -> PrepareResult {
                Ok(RenderThunk::new(|| "<h1>Me</h1>"))
            }
        }

        #[route("/work")]
        pub struct Work;

        impl View for Work {
            fn prepare(&self, _ctx: &mut ViewContext) -> PrepareResult {
                Ok(RenderThunk::new(|| "<h1>Work</h1>"))
            }
        }
    }

    #[test]
    fn test_routes_macro() {
        let routes = routes![views::Me, views::Work,];

        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].path(), "/me");
        assert_eq!(routes[0].title(), Some("matsu.fi - Me"));
        assert_eq!(routes[1].title(), None);
    }
}
