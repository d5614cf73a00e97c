//! icon-decorator: an icon with a badge inset at one of its corners
//!
//! The badge (decorator) is drawn in a circular frame, scaled down and
//! anchored near a chosen corner of the icon. A circular hole is cut out of
//! the icon underneath it, slightly larger than the badge, so a transparent
//! ring separates the two.
//!
//! Configuration comes from attributes on the element (`position`, `offset`,
//! `size-ratio`, `cutout-border`, `decorator-padding`). The hole radius
//! follows the badge container's measured width, which the size tracker
//! publishes after every layout change.
//!
//! # Example
//!
//! ```
//! use icon_decorator::{Document, SlotName};
//!
//! let icon = r##"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40">
//!     <rect width="40" height="40" fill="#ff0000"/></svg>"##;
//! let badge = r##"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
//!     <circle cx="10" cy="10" r="10" fill="#0000ff"/></svg>"##;
//!
//! let mut document = Document::new();
//! let id = document.create_element("icon-decorator").unwrap();
//! document.set_attribute(id, "position", "top-right").unwrap();
//! document.set_slot(id, SlotName::Icon, Some(icon.into())).unwrap();
//! document.set_slot(id, SlotName::Decorator, Some(badge.into())).unwrap();
//!
//! document.append(id).unwrap();
//! document.run_until_idle(8);
//!
//! let image = document.paint(id, 2.0).unwrap().unwrap();
//! assert_eq!(image.data.dimensions(), (80, 80));
//! ```
//!
//! # Serializable Profiles
//!
//! A [`DecoratorProfile`] captures an element's configuration as JSON and
//! can be applied through the [`Configurable`] trait:
//!
//! ```
//! use icon_decorator::{Configurable, DecoratorProfile, Document};
//!
//! let mut document = Document::new();
//! let id = document.create_element("icon-decorator").unwrap();
//!
//! let profile = DecoratorProfile::from_json(r#"{ "position": "top-left", "sizeRatio": "0.4" }"#)
//!     .unwrap();
//! document.element_mut(id).unwrap().apply_profile(&profile).unwrap();
//!
//! let exported = document.element(id).unwrap().export_profile();
//! assert_eq!(exported.size_ratio.as_deref(), Some("0.4"));
//! ```

mod component;
mod config;
mod error;
mod geometry;
mod icon;
mod layer;
mod layout;
mod length;
mod observer;
mod profile;
mod registry;
mod runtime;
mod style;
mod tokens;

pub use component::{
    Configurable, ELEMENT_NAME, ElementId, FrameRequest, FrameScheduler, IconDecorator, Lifecycle,
};
pub use config::{OBSERVED_ATTRIBUTES, ParsePositionError, PlacementConfig, Position};
pub use error::{DecoratorError, Result};
pub use geometry::{
    BadgeTransform, ComputedStyle, CornerSigns, MASK_FEATHER, MaskGeometry, Point, StyleEngine,
    badge_center, badge_translation, hole_radius, mask_origin,
};
pub use icon::{IconImage, MAX_CANVAS_SIDE, SizePx};
pub use layer::{
    BadgeConfig, CacheKey, CutoutConfig, Layer, LayerConfig, LayerPipeline, LayerVersions,
    RenderContext, SvgSource,
};
pub use layout::{BadgeBox, BoxSize, Layout, NodeId, ShadowTree, SlotName, Slotted};
pub use length::{LengthValue, format_px, parse_length, parse_number};
pub use observer::{ResizeEntry, ResizeObserverSize, SizeTracker};
pub use profile::{DecoratorProfile, SerializableSvgSource};
pub use registry::{ElementDefinition, ElementRegistry, is_valid_element_name};
pub use runtime::{Document, FrameQueue, FrameStats};
pub use style::{Attributes, StyleVariables};
pub use tokens::{TokenMapper, replace_tokens};
