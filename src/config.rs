//! Configuration resolution for the decorator element.
//!
//! Reads the recognised attributes, substitutes defaults for absent or empty
//! values, and publishes the result as style variables plus the
//! `data-inner-pos` marker attribute. Values are not validated here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::style::{
    Attributes, CUTOUT_BORDER, DECORATOR_PADDING, INNER_POSITION_ATTR, OFFSET, SCALE,
    StyleVariables,
};

pub const POSITION_ATTR: &str = "position";
pub const OFFSET_ATTR: &str = "offset";
pub const SIZE_RATIO_ATTR: &str = "size-ratio";
pub const CUTOUT_BORDER_ATTR: &str = "cutout-border";
pub const DECORATOR_PADDING_ATTR: &str = "decorator-padding";

/// Attributes whose changes trigger re-resolution.
pub const OBSERVED_ATTRIBUTES: [&str; 5] = [
    POSITION_ATTR,
    OFFSET_ATTR,
    SIZE_RATIO_ATTR,
    CUTOUT_BORDER_ATTR,
    DECORATOR_PADDING_ATTR,
];

pub const DEFAULT_OFFSET: &str = "3px";
pub const DEFAULT_SIZE_RATIO: &str = "0.5";
pub const DEFAULT_CUTOUT_BORDER: &str = "2px";
pub const DEFAULT_DECORATOR_PADDING: &str = "3px";

// ============================================================================
// Position
// ============================================================================

/// Corner of the host box the badge is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    TopLeft,
    TopRight,
    BottomLeft,
    #[default]
    BottomRight,
}

impl Position {
    pub const ALL: [Position; 4] = [
        Position::TopLeft,
        Position::TopRight,
        Position::BottomLeft,
        Position::BottomRight,
    ];

    /// Returns the attribute spelling of this corner.
    pub fn as_str(self) -> &'static str {
        match self {
            Position::TopLeft => "top-left",
            Position::TopRight => "top-right",
            Position::BottomLeft => "bottom-left",
            Position::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The string is not one of the four corner names.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown position `{0}`")]
pub struct ParsePositionError(pub String);

impl FromStr for Position {
    type Err = ParsePositionError;

    /// Matches the corner names exactly, as attribute selectors do.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| ParsePositionError(s.to_string()))
    }
}

// ============================================================================
// PlacementConfig
// ============================================================================

/// Fully defaulted configuration for one render pass.
///
/// Every field holds the value exactly as written (or its default). Lengths
/// and numbers are evaluated later by the style engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementConfig {
    /// Corner name, written verbatim into the marker attribute.
    pub position: String,
    pub offset: String,
    pub size_ratio: String,
    pub cutout_border: String,
    pub decorator_padding: String,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            position: Position::default().as_str().to_string(),
            offset: DEFAULT_OFFSET.to_string(),
            size_ratio: DEFAULT_SIZE_RATIO.to_string(),
            cutout_border: DEFAULT_CUTOUT_BORDER.to_string(),
            decorator_padding: DEFAULT_DECORATOR_PADDING.to_string(),
        }
    }
}

impl PlacementConfig {
    /// Reads the recognised attributes, substituting defaults for absent or
    /// empty values.
    pub fn resolve(attrs: &Attributes) -> Self {
        let defaults = Self::default();
        let read = |name: &str, default: String| {
            attrs
                .get(name)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
                .unwrap_or(default)
        };

        Self {
            position: read(POSITION_ATTR, defaults.position),
            offset: read(OFFSET_ATTR, defaults.offset),
            size_ratio: read(SIZE_RATIO_ATTR, defaults.size_ratio),
            cutout_border: read(CUTOUT_BORDER_ATTR, defaults.cutout_border),
            decorator_padding: read(DECORATOR_PADDING_ATTR, defaults.decorator_padding),
        }
    }

    /// The corner, if the position names one.
    pub fn corner(&self) -> Option<Position> {
        self.position.parse().ok()
    }

    /// Writes the resolved values into the variable slots and the marker
    /// attribute. Returns true if anything changed.
    pub fn publish(&self, attrs: &mut Attributes, vars: &mut StyleVariables) -> bool {
        let mut changed = false;
        changed |= vars.set_property(OFFSET, self.offset.as_str());
        changed |= vars.set_property(SCALE, self.size_ratio.as_str());
        changed |= vars.set_property(CUTOUT_BORDER, self.cutout_border.as_str());
        changed |= vars.set_property(DECORATOR_PADDING, self.decorator_padding.as_str());

        let old = attrs.set(INNER_POSITION_ATTR, self.position.as_str());
        changed |= old.as_deref() != Some(self.position.as_str());
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let config = PlacementConfig::resolve(&Attributes::new());
        assert_eq!(config.position, "bottom-right");
        assert_eq!(config.offset, "3px");
        assert_eq!(config.size_ratio, "0.5");
        assert_eq!(config.cutout_border, "2px");
        assert_eq!(config.decorator_padding, "3px");
        assert_eq!(config.corner(), Some(Position::BottomRight));
    }

    #[test]
    fn empty_values_fall_back_to_defaults() {
        let mut attrs = Attributes::new();
        attrs.set(OFFSET_ATTR, "");
        attrs.set(SIZE_RATIO_ATTR, "0.4");
        let config = PlacementConfig::resolve(&attrs);
        assert_eq!(config.offset, "3px");
        assert_eq!(config.size_ratio, "0.4");
    }

    #[test]
    fn malformed_values_pass_through() {
        let mut attrs = Attributes::new();
        attrs.set(SIZE_RATIO_ATTR, "big");
        attrs.set(POSITION_ATTR, "middle");
        let config = PlacementConfig::resolve(&attrs);
        assert_eq!(config.size_ratio, "big");
        assert_eq!(config.position, "middle");
        assert_eq!(config.corner(), None);
    }

    #[test]
    fn publish_writes_variables_and_marker() {
        let mut attrs = Attributes::new();
        attrs.set(POSITION_ATTR, "top-left");
        attrs.set(CUTOUT_BORDER_ATTR, "5px");
        let mut vars = StyleVariables::new();

        let config = PlacementConfig::resolve(&attrs);
        assert!(config.publish(&mut attrs, &mut vars));

        assert_eq!(attrs.get(INNER_POSITION_ATTR), Some("top-left"));
        assert_eq!(vars.inline(OFFSET), Some("3px"));
        assert_eq!(vars.inline(SCALE), Some("0.5"));
        assert_eq!(vars.inline(CUTOUT_BORDER), Some("5px"));
        assert_eq!(vars.inline(DECORATOR_PADDING), Some("3px"));
    }

    #[test]
    fn publish_is_idempotent() {
        let mut attrs = Attributes::new();
        let mut vars = StyleVariables::new();

        let config = PlacementConfig::resolve(&attrs);
        config.publish(&mut attrs, &mut vars);
        let snapshot = (attrs.clone(), vars.clone());

        let again = PlacementConfig::resolve(&attrs);
        assert_eq!(again, config);
        assert!(!again.publish(&mut attrs, &mut vars));
        assert_eq!((attrs, vars), snapshot);
    }

    #[test]
    fn position_parsing_is_exact() {
        for position in Position::ALL {
            assert_eq!(position.as_str().parse::<Position>(), Ok(position));
        }
        assert!("Top-Left".parse::<Position>().is_err());
        assert!(" top-left".parse::<Position>().is_err());
    }
}
