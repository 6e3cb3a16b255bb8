//! Reusable presentational components, rendered as custom elements.
//!
//! A component is rendered as its custom element tag holding a declarative shadow root, so that its styles stay
//! scoped, followed by its light DOM children, which the shadow root can project through `<slot>`s.
//!
//! Components must be [defined](ComponentRegistry::define) before the views using them are rendered. Views usually do
//! this in [`View::prepare`](crate::route::View::prepare).
use std::any::{TypeId, type_name};

use log::debug;
use maud::{Markup, PreEscaped, html};
use rustc_hash::FxHashMap;

use crate::errors::ComponentError;

/// Names the HTML standard reserves, which cannot be used for custom elements.
const RESERVED_NAMES: [&str; 8] = [
    "annotation-xml",
    "color-profile",
    "font-face",
    "font-face-src",
    "font-face-uri",
    "font-face-format",
    "font-face-name",
    "missing-glyph",
];

/// A typed custom element.
///
/// ## Example
/// ```rust
/// use matsu::components::Component;
/// use maud::{html, Markup};
///
/// pub struct HelloWorld {
///     pub name: String,
/// }
///
/// impl Component for HelloWorld {
///     const TAG: &'static str = "hello-world";
///
///     fn attributes(&self) -> Vec<(&'static str, String)> {
///         vec![("name", self.name.clone())]
///     }
///
///     fn template(&self) -> Markup {
///         html! { p.text-xl.font-bold { "Hello " (self.name) } }
///     }
/// }
/// ```
pub trait Component: 'static {
    /// The custom element name, e.g. `data-block`.
    const TAG: &'static str;

    /// CSS scoped to the component's shadow root.
    fn styles() -> Option<&'static str> {
        None
    }

    /// Attributes reflected on the host element.
    fn attributes(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }

    /// The shadow root content.
    fn template(&self) -> Markup;

    /// Light DOM children, projected into the template's `<slot>`.
    fn children(&self) -> Option<Markup> {
        None
    }

    fn render_element(&self) -> Markup
    where
        Self: Sized,
    {
        let mut out = String::with_capacity(256);
        out.push('<');
        out.push_str(Self::TAG);
        for (name, value) in self.attributes() {
            out.push_str(&format!(" {}=\"{}\"", name, escape_attribute(&value)));
        }
        out.push('>');

        out.push_str("<template shadowrootmode=\"open\">");
        if let Some(styles) = Self::styles() {
            out.push_str("<style>");
            out.push_str(styles);
            out.push_str("</style>");
        }
        out.push_str(&self.template().into_string());
        out.push_str("</template>");

        if let Some(children) = self.children() {
            out.push_str(&children.into_string());
        }

        out.push_str(&format!("</{}>", Self::TAG));
        PreEscaped(out)
    }
}

fn escape_attribute(value: &str) -> String {
    // maud escapes `"` along with `&`, `<` and `>`, which makes its text escaping safe inside quoted attributes
    html! { (value) }.into_string()
}

pub fn is_valid_custom_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());

    starts_with_letter
        && name.contains('-')
        && !RESERVED_NAMES.contains(&name)
        && name.chars().all(|c| {
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || matches!(c, '-' | '.' | '_')
                || !c.is_ascii()
        })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDefinition {
    pub name: &'static str,
    pub type_name: &'static str,
    type_id: TypeId,
}

/// Registry of the custom elements defined for the site, keyed by element name.
///
/// Defining the same component twice is a no-op, which lets every view define what it uses without coordinating with
/// other views.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
    definitions: FxHashMap<&'static str, ComponentDefinition>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines `C` under its tag. Returns `Ok(true)` if it was newly defined, `Ok(false)` if it already was.
    pub fn define<C: Component>(&mut self) -> Result<bool, ComponentError> {
        if !is_valid_custom_element_name(C::TAG) {
            return Err(ComponentError::InvalidName {
                name: C::TAG.to_string(),
            });
        }

        if let Some(existing) = self.definitions.get(C::TAG) {
            if existing.type_id == TypeId::of::<C>() {
                return Ok(false);
            }

            return Err(ComponentError::NameConflict {
                name: C::TAG.to_string(),
                existing: existing.type_name,
                new: type_name::<C>(),
            });
        }

        debug!(target: "components", "defined <{}> as {}", C::TAG, type_name::<C>());
        self.definitions.insert(
            C::TAG,
            ComponentDefinition {
                name: C::TAG,
                type_name: type_name::<C>(),
                type_id: TypeId::of::<C>(),
            },
        );

        Ok(true)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ComponentDefinition> {
        self.definitions.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}
