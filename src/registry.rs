//! Element registry.
//!
//! Maps custom element names to their definitions. A name can be defined
//! once; redefining it is an error rather than a silent replacement.

use std::collections::HashMap;

use tracing::debug;

use crate::component::{ELEMENT_NAME, IconDecorator};
use crate::error::{DecoratorError, Result};

/// Names the HTML standard reserves even though they contain a hyphen.
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

/// What the registry knows about a defined element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDefinition {
    pub name: String,
    /// Attribute names whose changes are reported to the element.
    pub observed_attributes: Vec<String>,
}

impl ElementDefinition {
    /// The definition of the decorator element.
    pub fn icon_decorator() -> Self {
        Self {
            name: ELEMENT_NAME.to_string(),
            observed_attributes: IconDecorator::OBSERVED_ATTRIBUTES
                .iter()
                .map(|name| name.to_string())
                .collect(),
        }
    }

    pub fn observes(&self, attribute: &str) -> bool {
        self.observed_attributes.iter().any(|a| a == attribute)
    }
}

/// Returns true if `name` is a valid custom element name.
///
/// It must start with a lowercase ASCII letter, contain a hyphen, contain no
/// uppercase ASCII letters, and not be one of the reserved names.
pub fn is_valid_element_name(name: &str) -> bool {
    let starts_lowercase = name.chars().next().is_some_and(|c| c.is_ascii_lowercase());

    starts_lowercase
        && name.contains('-')
        && name.chars().all(|c| {
            c.is_ascii_lowercase()
                || c.is_ascii_digit()
                || matches!(c, '-' | '.' | '_')
                || !c.is_ascii()
        })
        && !RESERVED_NAMES.contains(&name)
}

/// The set of element definitions of one document.
#[derive(Debug, Default)]
pub struct ElementRegistry {
    definitions: HashMap<String, ElementDefinition>,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the decorator element already defined.
    pub fn with_icon_decorator() -> Self {
        let definition = ElementDefinition::icon_decorator();
        let mut definitions = HashMap::new();
        definitions.insert(definition.name.clone(), definition);
        Self { definitions }
    }

    /// Registers a definition under `name`.
    ///
    /// Fails if the name is not a valid custom element name or is already
    /// defined.
    pub fn define(&mut self, name: &str, definition: ElementDefinition) -> Result<()> {
        if !is_valid_element_name(name) {
            return Err(DecoratorError::InvalidElementName(name.to_string()));
        }
        if self.definitions.contains_key(name) {
            return Err(DecoratorError::AlreadyDefined(name.to_string()));
        }

        debug!(name, "element defined");
        self.definitions.insert(name.to_string(), definition);
        Ok(())
    }

    /// Registers the decorator element under its standard name.
    pub fn define_icon_decorator(&mut self) -> Result<()> {
        self.define(ELEMENT_NAME, ElementDefinition::icon_decorator())
    }

    pub fn get(&self, name: &str) -> Option<&ElementDefinition> {
        self.definitions.get(name)
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }
}
