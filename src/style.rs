//! Host attributes and published style variables.
//!
//! These two stores are the only state shared between the configuration
//! resolver, the size tracker and the style engine. Both carry a version
//! counter that moves on every effective write, so derived values can tell
//! when they are stale without being told to recompute.

use std::collections::BTreeMap;

/// Horizontal/vertical displacement of the badge from the host centre.
pub const OFFSET: &str = "--offset";
/// Display scale of the badge.
pub const SCALE: &str = "--scale";
/// Extra cutout radius beyond the scaled badge radius.
pub const CUTOUT_BORDER: &str = "--cutout-border";
/// Padding inside the decorator's circular frame.
pub const DECORATOR_PADDING: &str = "--decorator-padding";
/// Live measured width of the badge container.
pub const BADGE_WIDTH: &str = "--badge-width";

/// Marker attribute carrying the resolved corner.
pub const INNER_POSITION_ATTR: &str = "data-inner-pos";

/// Stylesheet-level values that apply until an inline value is written.
pub const HOST_DEFAULTS: [(&str, &str); 5] = [
    (BADGE_WIDTH, "0px"),
    (SCALE, "0.5"),
    (OFFSET, "0px"),
    (CUTOUT_BORDER, "4px"),
    (DECORATOR_PADDING, "0px"),
];

// ============================================================================
// Attributes
// ============================================================================

/// The string-valued attributes set on a host element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    values: BTreeMap<String, String>,
    version: u64,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the attribute value, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Sets an attribute and returns its previous value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) -> Option<String> {
        let value = value.into();
        let old = self.values.insert(name.into(), value.clone());
        if old.as_deref() != Some(value.as_str()) {
            self.version = self.version.wrapping_add(1);
        }
        old
    }

    /// Removes an attribute and returns its previous value.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        let old = self.values.remove(name);
        if old.is_some() {
            self.version = self.version.wrapping_add(1);
        }
        old
    }

    /// Returns the version, bumped on every effective change.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

// ============================================================================
// StyleVariables
// ============================================================================

/// Custom properties visible to the style engine.
///
/// Lookups consult the inline layer first and fall back to
/// [`HOST_DEFAULTS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleVariables {
    inline: BTreeMap<String, String>,
    version: u64,
}

impl StyleVariables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes an inline value. Returns true if the stored value changed.
    pub fn set_property(&mut self, name: &str, value: impl Into<String>) -> bool {
        let value = value.into();
        if self.inline.get(name) == Some(&value) {
            return false;
        }
        self.inline.insert(name.to_string(), value);
        self.version = self.version.wrapping_add(1);
        true
    }

    /// Removes an inline value. Returns true if one was present.
    pub fn remove_property(&mut self, name: &str) -> bool {
        if self.inline.remove(name).is_some() {
            self.version = self.version.wrapping_add(1);
            true
        } else {
            false
        }
    }

    /// Returns the effective value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inline.get(name).map(String::as_str).or_else(|| {
            HOST_DEFAULTS
                .iter()
                .find(|(default_name, _)| *default_name == name)
                .map(|(_, value)| *value)
        })
    }

    /// Returns only the inline value of a variable.
    pub fn inline(&self, name: &str) -> Option<&str> {
        self.inline.get(name).map(String::as_str)
    }

    /// Returns the version, bumped on every effective change.
    pub fn version(&self) -> u64 {
        self.version
    }
}
