//! Badge layer: the decorator in its circular frame, scaled and placed at a
//! corner.

use image::RgbaImage;
use tracing::warn;

use super::svg::{SvgSource, composite_over, multiply_alpha, render_source};
use super::{DependencyVersion, LayerConfig, LayerEffect, LayerVersions, RenderContext};
use crate::geometry::{BadgeTransform, Point};
use crate::icon::SizePx;
use crate::layout::BoxSize;

/// Configuration for the badge.
///
/// The frame is the padded decorator box; its content is centred inside the
/// padding and the whole frame is clipped to its inscribed ellipse (a circle
/// for square frames).
#[derive(Debug, Clone, PartialEq)]
pub struct BadgeConfig {
    /// The decorator slot content.
    pub source: SvgSource,

    /// Unscaled size of the padded frame.
    pub frame: BoxSize,

    /// Unscaled size of the content inside the padding.
    pub content: BoxSize,

    pub padding: f32,

    /// `None` leaves the badge unscaled at the host's top-left corner.
    pub placement: Option<BadgeTransform>,
}

impl BadgeConfig {
    /// Centre and scale the frame is drawn at.
    fn resolved_placement(&self) -> (Point, f32) {
        match self.placement {
            Some(transform) => (transform.center, transform.scale.abs()),
            None => (
                Point {
                    x: self.frame.width / 2.0,
                    y: self.frame.height / 2.0,
                },
                1.0,
            ),
        }
    }
}

impl LayerConfig for BadgeConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self != other
    }
}

impl LayerEffect for BadgeConfig {
    /// The badge draws over the cutout layer's output.
    fn dependencies(versions: &LayerVersions) -> DependencyVersion {
        DependencyVersion::from_version(versions.cutout)
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let device_scale = ctx.image.scale;
        let (center, scale) = self.resolved_placement();
        let factor = scale * device_scale;

        let Some(frame_size) = SizePx::from_scaled(self.frame.width, self.frame.height, factor)
        else {
            warn!(scale = factor, "badge frame is too large to paint; skipping");
            return;
        };
        if frame_size.is_empty() {
            return;
        }
        let (frame_width, frame_height) = (frame_size.width, frame_size.height);

        let mut frame = RgbaImage::new(frame_width, frame_height);

        let content_size = SizePx::from_scaled(self.content.width, self.content.height, factor)
            .unwrap_or_default();
        if !content_size.is_empty() {
            match render_source(&self.source, content_size.width, content_size.height) {
                Ok(content) => {
                    let inset = (self.padding * factor).round() as i32;
                    composite_over(&mut frame, &content, inset, inset);
                }
                Err(err) => {
                    warn!(error = %err, "decorator content could not be rendered");
                    return;
                }
            }
        }

        let rx = frame_width as f32 / 2.0;
        let ry = frame_height as f32 / 2.0;
        multiply_alpha(&mut frame, |x, y| ellipse_coverage(x, y, rx, ry));

        let left = (center.x * device_scale - rx).round() as i32;
        let top = (center.y * device_scale - ry).round() as i32;
        composite_over(&mut ctx.image.data, &frame, left, top);
    }
}

/// Anti-aliased coverage of the ellipse inscribed in a `2rx x 2ry` box,
/// sampled at the centre of pixel `(x, y)`.
fn ellipse_coverage(x: u32, y: u32, rx: f32, ry: f32) -> f32 {
    let nx = (x as f32 + 0.5 - rx) / rx;
    let ny = (y as f32 + 0.5 - ry) / ry;
    let distance = (nx * nx + ny * ny).sqrt();
    ((1.0 - distance) * rx.min(ry) + 0.5).clamp(0.0, 1.0)
}
