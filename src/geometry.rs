//! Cutout and badge geometry.
//!
//! Everything here is a pure function of the host attributes, the published
//! style variables and the host box. [`StyleEngine`] memoises the result per
//! input version, so callers simply ask for the current style and get a fresh
//! evaluation whenever any input has moved.
//!
//! The mask origin and the badge centre are both derived from
//! [`Position::signs`], a single table, which keeps the badge centred in its
//! cutout for every corner.

use tracing::trace;

use crate::config::Position;
use crate::layout::BoxSize;
use crate::length::{parse_number, resolve_length};
use crate::style::{
    Attributes, BADGE_WIDTH, CUTOUT_BORDER, DECORATOR_PADDING, INNER_POSITION_ATTR, OFFSET, SCALE,
    StyleVariables,
};

/// Width of the soft edge between the transparent hole and the opaque mask.
pub const MASK_FEATHER: f32 = 0.5;

// ============================================================================
// Corner table
// ============================================================================

/// Direction of the displacement from the host centre towards a corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CornerSigns {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// The sign pair for this corner. Both the mask origin and the badge
    /// translation read from here.
    pub const fn signs(self) -> CornerSigns {
        match self {
            Position::TopLeft => CornerSigns { x: -1.0, y: -1.0 },
            Position::TopRight => CornerSigns { x: 1.0, y: -1.0 },
            Position::BottomLeft => CornerSigns { x: -1.0, y: 1.0 },
            Position::BottomRight => CornerSigns { x: 1.0, y: 1.0 },
        }
    }
}

/// A point in host-box CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Radius of the circular hole punched into the icon.
pub fn hole_radius(badge_width: f32, scale: f32, cutout_border: f32) -> f32 {
    badge_width * scale / 2.0 + cutout_border
}

/// Displacement of the badge centre from the host centre.
pub fn badge_translation(corner: Position, offset_x: f32, offset_y: f32) -> Point {
    let signs = corner.signs();
    Point {
        x: signs.x * offset_x,
        y: signs.y * offset_y,
    }
}

fn corner_point(corner: Position, offset_x: f32, offset_y: f32, host: BoxSize) -> Point {
    let shift = badge_translation(corner, offset_x, offset_y);
    Point {
        x: host.width / 2.0 + shift.x,
        y: host.height / 2.0 + shift.y,
    }
}

/// Centre of the cutout: `50% ± offset` on each axis.
pub fn mask_origin(corner: Position, offset_x: f32, offset_y: f32, host: BoxSize) -> Point {
    corner_point(corner, offset_x, offset_y, host)
}

/// Centre of the scaled badge: centred on the host, then translated.
///
/// Scaling happens about the badge's own centre, so it does not move it.
pub fn badge_center(corner: Position, offset_x: f32, offset_y: f32, host: BoxSize) -> Point {
    corner_point(corner, offset_x, offset_y, host)
}

// ============================================================================
// Computed style
// ============================================================================

/// The circular hole in the icon layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskGeometry {
    pub origin: Point,
    pub radius: f32,
}

impl MaskGeometry {
    /// Mask opacity at a host-box point: 0 inside the hole, 1 outside the
    /// feathered edge.
    pub fn coverage(&self, x: f32, y: f32) -> f32 {
        let dx = x - self.origin.x;
        let dy = y - self.origin.y;
        let distance = (dx * dx + dy * dy).sqrt();
        ((distance - self.radius) / MASK_FEATHER).clamp(0.0, 1.0)
    }
}

/// Placement of the badge layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeTransform {
    /// Where the badge's centre lands in the host box.
    pub center: Point,
    pub scale: f32,
}

/// Result of evaluating the style rules for one set of inputs.
///
/// `None` fields correspond to declarations that are invalid for the current
/// values: no mask means the icon is drawn whole, no transform means the
/// badge sits unscaled at the host's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComputedStyle {
    pub hole_radius: Option<f32>,
    pub mask: Option<MaskGeometry>,
    pub badge: Option<BadgeTransform>,
}

/// Evaluates the published decorator padding, treating invalid values as 0.
///
/// Percentages also evaluate to 0: their basis would be the badge
/// container's width, which is itself sized by the padding.
pub fn decorator_padding(vars: &StyleVariables) -> f32 {
    vars.get(DECORATOR_PADDING)
        .and_then(|v| resolve_length(v, None))
        .filter(|p| *p >= 0.0)
        .unwrap_or(0.0)
}

/// Evaluates the style rules.
pub fn compute(attrs: &Attributes, vars: &StyleVariables, host: BoxSize) -> ComputedStyle {
    let corner = attrs
        .get(INNER_POSITION_ATTR)
        .and_then(|marker| marker.parse::<Position>().ok());

    let scale = vars.get(SCALE).and_then(parse_number);
    let offset = vars.get(OFFSET).and_then(|v| {
        let x = resolve_length(v, Some(host.width))?;
        let y = resolve_length(v, Some(host.height))?;
        Some((x, y))
    });
    let badge_width = vars.get(BADGE_WIDTH).and_then(|v| resolve_length(v, None));
    let cutout_border = vars.get(CUTOUT_BORDER).and_then(|v| resolve_length(v, None));

    let radius = match (badge_width, scale, cutout_border) {
        (Some(width), Some(scale), Some(border)) => {
            Some(hole_radius(width, scale, border)).filter(|r| r.is_finite() && *r >= 0.0)
        }
        _ => None,
    };

    let mask = match (corner, offset, radius) {
        (Some(corner), Some((x, y)), Some(radius)) => Some(MaskGeometry {
            origin: mask_origin(corner, x, y, host),
            radius,
        }),
        _ => None,
    };

    let badge = match (corner, offset, scale) {
        (Some(corner), Some((x, y)), Some(scale)) => Some(BadgeTransform {
            center: badge_center(corner, x, y, host),
            scale,
        }),
        _ => None,
    };

    ComputedStyle {
        hole_radius: radius,
        mask,
        badge,
    }
}

// ============================================================================
// StyleEngine
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StyleKey {
    attrs: u64,
    vars: u64,
    width_bits: u32,
    height_bits: u32,
}

impl StyleKey {
    fn new(attrs: &Attributes, vars: &StyleVariables, host: BoxSize) -> Self {
        Self {
            attrs: attrs.version(),
            vars: vars.version(),
            width_bits: host.width.to_bits(),
            height_bits: host.height.to_bits(),
        }
    }
}

/// Memoising front end for [`compute`].
///
/// There is no explicit invalidation: the cached style is keyed on the input
/// versions and the host box, so any upstream write yields a new evaluation.
#[derive(Debug, Default)]
pub struct StyleEngine {
    cached: Option<(StyleKey, ComputedStyle)>,
}

impl StyleEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the style for the current inputs.
    pub fn evaluate(
        &mut self,
        attrs: &Attributes,
        vars: &StyleVariables,
        host: BoxSize,
    ) -> ComputedStyle {
        let key = StyleKey::new(attrs, vars, host);
        if let Some((cached_key, style)) = &self.cached {
            if *cached_key == key {
                trace!("style cache hit");
                return *style;
            }
        }

        let style = compute(attrs, vars, host);
        self.cached = Some((key, style));
        style
    }

    /// Drops the memoised style.
    pub fn reset(&mut self) {
        self.cached = None;
    }
}
