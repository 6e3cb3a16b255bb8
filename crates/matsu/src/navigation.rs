//! Navigation events and the rules deciding which of them the router handles itself.
use std::fmt;

use url::Url;

use crate::errors::{ConfigError, RouterError};
use crate::inspect::Anchor;
use crate::routing::normalize_path;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    #[default]
    Primary,
    Auxiliary,
    Secondary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

/// A click on an anchor element, as the page would report it to the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorClick {
    pub href: String,
    pub target: Option<String>,
    pub download: bool,
    pub button: MouseButton,
    pub modifiers: Modifiers,
}

impl AnchorClick {
    /// A plain left click on `<a href="{href}">`.
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            target: None,
            download: false,
            button: MouseButton::Primary,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }
}

impl From<&Anchor> for AnchorClick {
    fn from(anchor: &Anchor) -> Self {
        Self {
            href: anchor.href.clone(),
            target: anchor.target.clone(),
            download: anchor.download,
            button: MouseButton::Primary,
            modifiers: Modifiers::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    /// An anchor was clicked.
    Click(AnchorClick),
    /// The browser moved through its history (back/forward) and now shows this location.
    PopState(String),
}

/// Why a click was left to the browser instead of being handled by the router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreReason {
    NotPrimaryButton,
    ModifierKey,
    Target(String),
    Download,
    InvalidHref(String),
    CrossOrigin,
    OutsideBase,
    /// Same document, only the fragment changes: the browser scrolls, nothing to render.
    FragmentOnly,
}

impl fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IgnoreReason::NotPrimaryButton => write!(f, "not a primary button click"),
            IgnoreReason::ModifierKey => write!(f, "a modifier key was held"),
            IgnoreReason::Target(target) => write!(f, "the anchor targets `{}`", target),
            IgnoreReason::Download => write!(f, "the anchor is a download"),
            IgnoreReason::InvalidHref(reason) => write!(f, "the href is invalid: {}", reason),
            IgnoreReason::CrossOrigin => write!(f, "the link leaves the site"),
            IgnoreReason::OutsideBase => write!(f, "the link is outside of the site base"),
            IgnoreReason::FragmentOnly => write!(f, "only the fragment changes"),
        }
    }
}

/// Resolves hrefs against the site origin and decides which clicks stay in-app.
#[derive(Debug, Clone)]
pub struct Navigator {
    origin: Url,
    base: Option<String>,
}

impl Navigator {
    pub fn new(origin: &str, base: Option<&str>) -> Result<Self, ConfigError> {
        let parsed = Url::parse(origin).map_err(|e| ConfigError::InvalidOrigin {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::InvalidOrigin {
                origin: origin.to_string(),
                reason: "only http and https origins are supported".to_string(),
            });
        }

        Ok(Self {
            origin: parsed,
            base: base.map(normalize_path).filter(|b| b != "/"),
        })
    }

    pub fn base(&self) -> Option<&str> {
        self.base.as_deref()
    }

    /// Resolves `href` relative to the `current` root-relative location.
    pub fn resolve(&self, current: &str, href: &str) -> Result<Url, url::ParseError> {
        self.origin.join(current)?.join(href)
    }

    /// Turns a location given by the host (absolute or root-relative) into a root-relative href on this site.
    pub fn to_relative(&self, location: &str) -> Result<String, RouterError> {
        let url = self
            .resolve("/", location)
            .map_err(|e| RouterError::InvalidLocation {
                location: location.to_string(),
                reason: e.to_string(),
            })?;

        if url.origin() != self.origin.origin() {
            return Err(RouterError::InvalidLocation {
                location: location.to_string(),
                reason: format!(
                    "it is not on {}",
                    self.origin.origin().ascii_serialization()
                ),
            });
        }

        Ok(relative_href(&url))
    }

    /// Returns the root-relative href to dispatch if the router should handle `click`.
    pub fn intercept(&self, current: &str, click: &AnchorClick) -> Result<String, IgnoreReason> {
        if click.button != MouseButton::Primary {
            return Err(IgnoreReason::NotPrimaryButton);
        }
        if click.modifiers.any() {
            return Err(IgnoreReason::ModifierKey);
        }
        if let Some(target) = click.target.as_deref().filter(|t| !t.is_empty() && *t != "_self") {
            return Err(IgnoreReason::Target(target.to_string()));
        }
        if click.download {
            return Err(IgnoreReason::Download);
        }

        let url = self
            .resolve(current, &click.href)
            .map_err(|e| IgnoreReason::InvalidHref(e.to_string()))?;

        if url.origin() != self.origin.origin() {
            return Err(IgnoreReason::CrossOrigin);
        }

        if let Some(base) = &self.base {
            let path = url.path();
            let under_base = path
                .strip_prefix(base.as_str())
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'));
            if !under_base {
                return Err(IgnoreReason::OutsideBase);
            }
        }

        if url.fragment().is_some() {
            if let Ok(current_url) = self.resolve("/", current) {
                if current_url.path() == url.path() && current_url.query() == url.query() {
                    return Err(IgnoreReason::FragmentOnly);
                }
            }
        }

        Ok(relative_href(&url))
    }
}

fn relative_href(url: &Url) -> String {
    let mut href = url.path().to_string();
    if let Some(query) = url.query() {
        href.push('?');
        href.push_str(query);
    }
    if let Some(fragment) = url.fragment() {
        href.push('#');
        href.push_str(fragment);
    }
    href
}

/// In-memory session history, mirroring what `pushState` and the back/forward buttons do in a browser.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<String>,
    index: usize,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&str> {
        self.entries.get(self.index).map(String::as_str)
    }

    /// Adds an entry after the current one, dropping every entry that was ahead of it.
    pub fn push(&mut self, href: impl Into<String>) {
        if self.entries.is_empty() {
            self.entries.push(href.into());
            self.index = 0;
            return;
        }

        self.entries.truncate(self.index + 1);
        self.entries.push(href.into());
        self.index = self.entries.len() - 1;
    }

    /// Replaces the current entry, or creates the first one.
    pub fn replace(&mut self, href: impl Into<String>) {
        match self.entries.get_mut(self.index) {
            Some(entry) => *entry = href.into(),
            None => self.push(href),
        }
    }

    pub fn back(&mut self) -> Option<&str> {
        if !self.can_go_back() {
            return None;
        }
        self.index -= 1;
        self.current()
    }

    pub fn forward(&mut self) -> Option<&str> {
        if !self.can_go_forward() {
            return None;
        }
        self.index += 1;
        self.current()
    }

    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
