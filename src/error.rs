//! Error types for decorator construction and output.

use thiserror::Error;

/// Errors surfaced at the fallible boundaries of the crate.
///
/// Visual evaluation itself never fails: malformed attribute values degrade
/// the computed geometry instead of producing an error.
#[derive(Error, Debug)]
pub enum DecoratorError {
    /// Slotted SVG markup could not be parsed.
    #[error("SVG parsing error: {0}")]
    SvgParse(String),

    /// A pixmap of the requested size could not be allocated.
    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    /// The emoji has no Twemoji asset.
    #[error("unknown emoji: {0}")]
    UnknownEmoji(String),

    /// Emoji content was supplied without the `twemoji` feature.
    #[error("emoji content requires the `twemoji` feature")]
    EmojiUnsupported,

    /// An element with this name is already defined in the registry.
    #[error("element `{0}` is already defined")]
    AlreadyDefined(String),

    /// The name is not a valid custom element name.
    #[error("`{0}` is not a valid custom element name")]
    InvalidElementName(String),

    /// No element is defined under this name.
    #[error("no element is defined as `{0}`")]
    UndefinedElement(String),

    /// The element id does not belong to this document.
    #[error("unknown element id {0}")]
    UnknownElement(usize),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DecoratorError>;
