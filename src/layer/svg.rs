//! SVG rendering utilities using resvg/usvg.
//!
//! This module provides the SVG parsing, rasterisation and compositing shared
//! by the cutout and badge layers.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{DecoratorError, Result};

// ============================================================================
// SvgSource
// ============================================================================

/// Markup supplied into one of the element's slots.
///
/// - Raw SVG markup strings
/// - Emoji characters (when the `twemoji` feature is enabled)
///
/// # Example
///
/// ```
/// use icon_decorator::SvgSource;
///
/// let raw = SvgSource::from_svg("<svg>...</svg>");
/// assert!(raw.is_raw());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SvgSource {
    /// Raw SVG markup string.
    Raw(String),

    /// An emoji character resolved via twemoji_assets at render time.
    Emoji(String),
}

impl SvgSource {
    /// Creates a source from raw SVG markup.
    pub fn from_svg(svg: impl Into<String>) -> Self {
        Self::Raw(svg.into())
    }

    /// Creates a source from an emoji character.
    ///
    /// Fails if the emoji is not supported by twemoji_assets.
    #[cfg(feature = "twemoji")]
    pub fn from_emoji(emoji: &str) -> Result<Self> {
        use twemoji_assets::svg::SvgTwemojiAsset;

        SvgTwemojiAsset::from_emoji(emoji)
            .ok_or_else(|| DecoratorError::UnknownEmoji(emoji.to_string()))?;
        Ok(Self::Emoji(emoji.to_string()))
    }

    /// Resolves this source to SVG markup.
    pub fn resolve(&self) -> Result<&str> {
        match self {
            Self::Raw(svg) => Ok(svg.as_str()),
            #[cfg(feature = "twemoji")]
            Self::Emoji(emoji) => {
                use twemoji_assets::svg::SvgTwemojiAsset;
                let asset = SvgTwemojiAsset::from_emoji(emoji)
                    .ok_or_else(|| DecoratorError::UnknownEmoji(emoji.clone()))?;
                Ok(asset.as_ref())
            }
            #[cfg(not(feature = "twemoji"))]
            Self::Emoji(_) => Err(DecoratorError::EmojiUnsupported),
        }
    }

    /// Returns `true` if this is an emoji source.
    pub fn is_emoji(&self) -> bool {
        matches!(self, Self::Emoji(_))
    }

    /// Returns `true` if this is a raw SVG source.
    pub fn is_raw(&self) -> bool {
        matches!(self, Self::Raw(_))
    }
}

impl<S: Into<String>> From<S> for SvgSource {
    fn from(s: S) -> Self {
        Self::Raw(s.into())
    }
}

// ============================================================================
// SVG Rendering
// ============================================================================

fn parse_tree(svg_data: &str) -> Result<Tree> {
    let opts = Options::default();
    Tree::from_str(svg_data, &opts).map_err(|e| DecoratorError::SvgParse(e.to_string()))
}

/// Returns the intrinsic `(width, height)` of a source in CSS pixels.
pub fn intrinsic_size(source: &SvgSource) -> Result<(f32, f32)> {
    let tree = parse_tree(source.resolve()?)?;
    let size = tree.size();
    Ok((size.width(), size.height()))
}

/// Renders SVG markup into a `width x height` image.
///
/// The drawing is scaled to fit while preserving aspect ratio and centred in
/// the spare space.
pub fn render_svg(svg_data: &str, width: u32, height: u32) -> Result<RgbaImage> {
    let tree = parse_tree(svg_data)?;
    let mut pixmap = Pixmap::new(width, height).ok_or(DecoratorError::Pixmap { width, height })?;

    let svg_size = tree.size();
    let scale = (width as f32 / svg_size.width()).min(height as f32 / svg_size.height());
    let offset_x = (width as f32 - svg_size.width() * scale) / 2.0;
    let offset_y = (height as f32 - svg_size.height() * scale) / 2.0;

    let transform = Transform::from_scale(scale, scale).post_translate(offset_x, offset_y);
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Renders an [`SvgSource`] into a `width x height` image.
pub fn render_source(source: &SvgSource, width: u32, height: u32) -> Result<RgbaImage> {
    render_svg(source.resolve()?, width, height)
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let pixels = pixmap.pixels();

    RgbaImage::from_fn(width, pixmap.height(), |x, y| {
        let pixel = pixels[(y * width + x) as usize];
        // tiny_skia uses premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        Rgba([r, g, b, a])
    })
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Alpha masking
// ============================================================================

/// Scales each pixel's alpha by `coverage(x, y)`, clamped to 0..=1.
///
/// Fully transparent results are cleared to `[0, 0, 0, 0]`.
pub fn multiply_alpha(img: &mut RgbaImage, coverage: impl Fn(u32, u32) -> f32) {
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        if pixel[3] == 0 {
            continue;
        }
        let factor = coverage(x, y).clamp(0.0, 1.0);
        let alpha = (pixel[3] as f32 * factor).round() as u8;
        *pixel = if alpha == 0 {
            Rgba([0, 0, 0, 0])
        } else {
            Rgba([pixel[0], pixel[1], pixel[2], alpha])
        };
    }
}

// ============================================================================
// Compositing
// ============================================================================

/// Composites a source image onto a destination image at the specified position.
///
/// Uses standard alpha blending (source over destination).
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage, x: i32, y: i32) {
    let dest_width = dest.width() as i32;
    let dest_height = dest.height() as i32;

    for (sx, sy, src_pixel) in src.enumerate_pixels() {
        let dx = x.saturating_add(sx as i32);
        let dy = y.saturating_add(sy as i32);

        // Skip if outside destination bounds
        if dx < 0 || dy < 0 || dx >= dest_width || dy >= dest_height {
            continue;
        }

        let dst_pixel = dest.get_pixel(dx as u32, dy as u32);
        let blended = alpha_blend(*src_pixel, *dst_pixel);
        dest.put_pixel(dx as u32, dy as u32, blended);
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;

    let out_a = sa + da * (1.0 - sa);

    if out_a == 0.0 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend = |s: u8, d: u8| -> u8 {
        let sf = s as f32 / 255.0;
        let df = d as f32 / 255.0;
        let out = (sf * sa + df * da * (1.0 - sa)) / out_a;
        (out * 255.0).round() as u8
    };

    Rgba([
        blend(src[0], dst[0]),
        blend(src[1], dst[1]),
        blend(src[2], dst[2]),
        (out_a * 255.0).round() as u8,
    ])
}
