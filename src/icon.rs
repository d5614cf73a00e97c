//! Rendered image type.

use std::path::Path;

use image::RgbaImage;

use crate::error::Result;

/// Largest canvas side, in device pixels, the painter will allocate.
pub const MAX_CANVAS_SIDE: u32 = 16_384;

/// A 2D size in device pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rounds a CSS-pixel size multiplied by `scale` to device pixels.
    ///
    /// Returns `None` when a side is not finite, negative, or larger than
    /// [`MAX_CANVAS_SIDE`].
    pub fn from_scaled(width: f32, height: f32, scale: f32) -> Option<Self> {
        let side = |length: f32| {
            let px = (length * scale).round();
            (px.is_finite() && px >= 0.0 && px <= MAX_CANVAS_SIDE as f32).then_some(px as u32)
        };
        Some(Self::new(side(width)?, side(height)?))
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A rendered composite together with the device scale it was painted at.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format (straight alpha).
    pub data: RgbaImage,

    /// The display scale factor.
    ///
    /// - 1.0 for standard resolution (@1x)
    /// - 2.0 for retina/HiDPI (@2x)
    ///
    /// The "logical" size of the image is `dimensions / scale`.
    pub scale: f32,
}

impl IconImage {
    pub fn new(data: RgbaImage, scale: f32) -> Self {
        Self { data, scale }
    }

    /// Creates a fully transparent image.
    pub fn transparent(size: SizePx, scale: f32) -> Self {
        Self::new(RgbaImage::new(size.width, size.height), scale)
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Writes the image to `path`, encoded by its extension.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.data.save(path)?;
        Ok(())
    }

    /// Returns the logical size of the image (dimensions / scale).
    ///
    /// For a 64x64 @2x image, the logical size is 32x32.
    pub fn logical_size(&self) -> (f32, f32) {
        (
            self.data.width() as f32 / self.scale,
            self.data.height() as f32 / self.scale,
        )
    }
}
