//! Icon layer with the circular cutout.

use tracing::warn;

use super::svg::{SvgSource, composite_over, multiply_alpha, render_source};
use super::{DependencyVersion, LayerConfig, LayerEffect, LayerVersions, RenderContext};
use crate::geometry::MaskGeometry;

/// Configuration for the masked icon.
///
/// The icon fills the whole canvas. When a mask is present, every pixel's
/// alpha is multiplied by the mask coverage sampled at the pixel centre.
#[derive(Debug, Clone, PartialEq)]
pub struct CutoutConfig {
    /// The icon slot content.
    pub source: SvgSource,

    /// `None` draws the icon without a hole.
    pub mask: Option<MaskGeometry>,
}

impl CutoutConfig {
    pub fn new(source: SvgSource, mask: Option<MaskGeometry>) -> Self {
        Self { source, mask }
    }
}

impl LayerConfig for CutoutConfig {
    fn differs_from(&self, other: &Self) -> bool {
        self != other
    }
}

impl LayerEffect for CutoutConfig {
    /// The icon is the bottom layer.
    fn dependencies(_versions: &LayerVersions) -> DependencyVersion {
        DependencyVersion::NONE
    }

    fn transform(&self, ctx: &mut RenderContext) {
        let size = ctx.image.dimensions();
        if size.is_empty() {
            return;
        }

        let mut icon = match render_source(&self.source, size.width, size.height) {
            Ok(icon) => icon,
            Err(err) => {
                warn!(error = %err, "icon content could not be rendered");
                return;
            }
        };

        if let Some(mask) = self.mask {
            let scale = ctx.image.scale;
            multiply_alpha(&mut icon, |x, y| {
                mask.coverage((x as f32 + 0.5) / scale, (y as f32 + 0.5) / scale)
            });
        }

        composite_over(&mut ctx.image.data, &icon, 0, 0);
    }
}
