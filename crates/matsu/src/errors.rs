//! Error types for Matsu.
use std::fmt::{self, Debug, Formatter};
use std::path::PathBuf;
use thiserror::Error;

macro_rules! impl_debug_for_error {
    ($($t:ty),*) => {
        $(
            impl Debug for $t {
                fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
                    // Errors returned from main are shown with Debug, but thiserror only generates Display.
                    write!(f, "{}", self)
                }
            }
        )*
    };
}

/// Raised while setting up a [`RouteTable`](crate::route::RouteTable) or a [`Router`](crate::router::Router). The application cannot start.
#[derive(Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("The route table is empty, at least one route must be defined")]
    EmptyRouteTable,
    #[error("No mount target was given to the router, call `.target()` on the builder")]
    MissingMountTarget,
    #[error("The path `{path}` is defined more than once in the route table")]
    DuplicatePath { path: String },
    #[error("Invalid route path `{path}`, paths must start with a `/`")]
    InvalidPath { path: String },
    #[error("Invalid origin `{origin}`: {reason}")]
    InvalidOrigin { origin: String, reason: String },
}

/// Per-navigation condition raised when no route matches the requested location.
#[derive(Error, PartialEq, Eq)]
pub enum NavigationError {
    #[error("No route matches `{path}`")]
    NotFound { path: String },
}

/// Which half of the view contract failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStage {
    /// [`View::prepare`](crate::route::View::prepare) failed.
    Prepare,
    /// The render thunk, or the renderer committing it, failed.
    Render,
}

impl fmt::Display for RenderStage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RenderStage::Prepare => write!(f, "preparing"),
            RenderStage::Render => write!(f, "rendering"),
        }
    }
}

/// A view failed during dispatch. The mount target was left untouched.
#[derive(Error)]
#[error("Failed {stage} the view for `{path}`: {message}")]
pub struct RenderFailure {
    pub path: String,
    pub stage: RenderStage,
    pub message: String,
    #[source]
    pub source: Option<Box<dyn std::error::Error>>,
}

impl RenderFailure {
    pub(crate) fn from_error(
        path: &str,
        stage: RenderStage,
        error: Box<dyn std::error::Error>,
    ) -> Self {
        Self {
            path: path.to_string(),
            stage,
            message: error.to_string(),
            source: Some(error),
        }
    }

    pub(crate) fn from_panic(
        path: &str,
        stage: RenderStage,
        payload: Box<dyn std::any::Any + Send>,
    ) -> Self {
        let message = if let Some(message) = payload.downcast_ref::<&str>() {
            (*message).to_string()
        } else if let Some(message) = payload.downcast_ref::<String>() {
            message.clone()
        } else {
            "view panicked".to_string()
        };

        Self {
            path: path.to_string(),
            stage,
            message,
            source: None,
        }
    }
}

#[derive(Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("The router has already been started, `start()` can only be called once")]
    AlreadyStarted,
    #[error("The router has not been started yet, call `start()` before handling navigation")]
    NotStarted,
    #[error("`{location}` cannot be resolved against the router origin: {reason}")]
    InvalidLocation { location: String, reason: String },
}

#[derive(Error, PartialEq, Eq)]
pub enum ComponentError {
    #[error(
        "`{name}` is not a valid custom element name, names must start with a lowercase letter, contain a hyphen and have no uppercase letters"
    )]
    InvalidName { name: String },
    #[error("`{name}` is already defined by `{existing}`, cannot define it again for `{new}`")]
    NameConflict {
        name: String,
        existing: &'static str,
        new: &'static str,
    },
}

#[derive(Error)]
pub enum BuildError {
    #[error("Failed to render `{route}`: {message}")]
    RenderFailed { route: String, message: String },
    #[error("Failed to write {path}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to copy static file {path}")]
    CopyFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum MatsuError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Navigation(#[from] NavigationError),

    #[error(transparent)]
    Render(#[from] RenderFailure),

    #[error(transparent)]
    Router(#[from] RouterError),

    #[error(transparent)]
    Component(#[from] ComponentError),

    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl_debug_for_error!(
    ConfigError,
    NavigationError,
    RenderFailure,
    RouterError,
    ComponentError,
    BuildError
);
