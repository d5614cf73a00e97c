//! Serializable decorator profile.
//!
//! A [`DecoratorProfile`] captures the element's configuration attributes and
//! slot content in a format that can be stored as JSON and applied to any
//! element through [`Configurable`](crate::Configurable).
//!
//! # Example
//!
//! ```
//! use icon_decorator::{DecoratorProfile, SerializableSvgSource};
//!
//! let profile = DecoratorProfile::new()
//!     .with_position("top-left")
//!     .with_size_ratio("0.4")
//!     .with_decorator(SerializableSvgSource::from_svg("<svg>...</svg>"));
//!
//! let json = profile.to_json().unwrap();
//! let restored = DecoratorProfile::from_json(&json).unwrap();
//! assert_eq!(restored.position.as_deref(), Some("top-left"));
//! ```

use serde::{Deserialize, Serialize};

use crate::config::{
    CUTOUT_BORDER_ATTR, DECORATOR_PADDING_ATTR, OFFSET_ATTR, POSITION_ATTR, SIZE_RATIO_ATTR,
};
use crate::layer::SvgSource;
use crate::style::Attributes;

// ============================================================================
// Serializable SVG Source
// ============================================================================

/// Serializable representation of an SVG source.
///
/// This struct serializes to a flat structure with either `svgData` or `emoji` field:
///
/// ```json
/// { "svgData": "<svg>...</svg>" }
/// // or
/// { "emoji": "🔥" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct SerializableSvgSource {
    /// Raw SVG markup (mutually exclusive with `emoji`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub svg_data: Option<String>,

    /// Emoji character to resolve via twemoji (mutually exclusive with `svg_data`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<String>,
}

impl SerializableSvgSource {
    /// Creates a source from raw SVG markup.
    pub fn from_svg(svg: impl Into<String>) -> Self {
        Self {
            svg_data: Some(svg.into()),
            emoji: None,
        }
    }

    /// Creates a source from an emoji character.
    pub fn from_emoji(emoji: impl Into<String>) -> Self {
        Self {
            svg_data: None,
            emoji: Some(emoji.into()),
        }
    }
}

impl From<&SvgSource> for SerializableSvgSource {
    fn from(source: &SvgSource) -> Self {
        match source {
            SvgSource::Raw(svg) => Self::from_svg(svg),
            SvgSource::Emoji(emoji) => Self::from_emoji(emoji),
        }
    }
}

impl From<SerializableSvgSource> for SvgSource {
    fn from(source: SerializableSvgSource) -> Self {
        if let Some(emoji) = source.emoji {
            SvgSource::Emoji(emoji)
        } else if let Some(svg) = source.svg_data {
            SvgSource::Raw(svg)
        } else {
            SvgSource::Raw(String::new())
        }
    }
}

// ============================================================================
// DecoratorProfile
// ============================================================================

/// A serializable snapshot of a decorator's configuration.
///
/// Attribute fields hold values exactly as they would be written on the
/// element; `None` means the attribute is absent and its default applies.
///
/// # JSON Format
///
/// ```json
/// {
///   "position": "top-right",
///   "offset": "4px",
///   "sizeRatio": "0.5",
///   "icon": { "svgData": "<svg>...</svg>" },
///   "decorator": { "emoji": "🔥" }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct DecoratorProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_ratio: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cutout_border: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorator_padding: Option<String>,

    /// Icon slot content. `None` leaves the slot untouched when applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<SerializableSvgSource>,

    /// Decorator slot content. `None` leaves the slot untouched when applied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decorator: Option<SerializableSvgSource>,
}

impl DecoratorProfile {
    /// Creates an empty profile: every attribute absent, no slot content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads the configuration attributes from an attribute map.
    pub fn from_attributes(attrs: &Attributes) -> Self {
        let read = |name: &str| attrs.get(name).map(str::to_string);
        Self {
            position: read(POSITION_ATTR),
            offset: read(OFFSET_ATTR),
            size_ratio: read(SIZE_RATIO_ATTR),
            cutout_border: read(CUTOUT_BORDER_ATTR),
            decorator_padding: read(DECORATOR_PADDING_ATTR),
            icon: None,
            decorator: None,
        }
    }

    /// The attribute each field maps to, paired with its value.
    pub fn attributes(&self) -> [(&'static str, Option<&str>); 5] {
        [
            (POSITION_ATTR, self.position.as_deref()),
            (OFFSET_ATTR, self.offset.as_deref()),
            (SIZE_RATIO_ATTR, self.size_ratio.as_deref()),
            (CUTOUT_BORDER_ATTR, self.cutout_border.as_deref()),
            (DECORATOR_PADDING_ATTR, self.decorator_padding.as_deref()),
        ]
    }

    pub fn with_position(mut self, position: impl Into<String>) -> Self {
        self.position = Some(position.into());
        self
    }

    pub fn with_offset(mut self, offset: impl Into<String>) -> Self {
        self.offset = Some(offset.into());
        self
    }

    pub fn with_size_ratio(mut self, size_ratio: impl Into<String>) -> Self {
        self.size_ratio = Some(size_ratio.into());
        self
    }

    pub fn with_cutout_border(mut self, cutout_border: impl Into<String>) -> Self {
        self.cutout_border = Some(cutout_border.into());
        self
    }

    pub fn with_decorator_padding(mut self, padding: impl Into<String>) -> Self {
        self.decorator_padding = Some(padding.into());
        self
    }

    pub fn with_icon(mut self, source: SerializableSvgSource) -> Self {
        self.icon = Some(source);
        self
    }

    pub fn with_decorator(mut self, source: SerializableSvgSource) -> Self {
        self.decorator = Some(source);
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

// ============================================================================
// Tests
// ============================================================================
