//! matsu.fi, the personal site of Matias "Matsu" Huhta.
pub mod components;
pub mod icons;
pub mod layout;
pub mod views;

use matsu::errors::ConfigError;
use matsu::prelude::*;
use matsu::routes;

use views::*;

/// Where the site is deployed.
pub const BASE_URL: &str = "https://matsuuu.github.io";
/// The site lives under this path on [`BASE_URL`].
pub const BASE: &str = "/matsu.fi";

pub fn routes() -> Vec<RouteDescriptor> {
    routes![Home, Projects, Me, Work, Speaking, Technologies]
}

/// Builds the site's router, rendering into `target`.
pub fn router<T: MountTarget>(target: T, options: RouterOptions) -> Result<Router<T>, ConfigError> {
    Router::builder()
        .routes(routes())
        .target(target)
        .options(options)
        .not_found(NotFound)
        .build()
}

/// Router options for the deployed site.
pub fn deployed_options() -> RouterOptions {
    RouterOptions {
        origin: BASE_URL.to_string(),
        base: Some(BASE.to_string()),
        ..Default::default()
    }
}
