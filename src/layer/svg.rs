//! Vector source decoding and exact-size rasterization using resvg/usvg.
//!
//! This module provides the rendering backend shared by the base render and
//! the overlay layer.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use crate::error::{DecodeError, RenderError};
use crate::icon::SizePx;

// ============================================================================
// VectorSource
// ============================================================================

/// A decoded, single-page vector document ready to be rasterized.
///
/// Decoding happens once; the parsed tree is shared between clones so the
/// same source can back several runs.
#[derive(Clone)]
pub struct VectorSource {
    tree: Arc<Tree>,
}

impl VectorSource {
    /// Parses SVG (or gzip-compressed SVGZ) bytes.
    pub fn from_data(data: &[u8]) -> Result<Self, DecodeError> {
        let tree = Tree::from_data(data, &Options::default())?;
        Ok(Self {
            tree: Arc::new(tree),
        })
    }

    /// Parses SVG markup.
    pub fn from_svg(svg: &str) -> Result<Self, DecodeError> {
        Self::from_data(svg.as_bytes())
    }

    /// Reads and parses a vector file.
    pub fn load(path: &Path) -> Result<Self, DecodeError> {
        let data = std::fs::read(path).map_err(|source| DecodeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_data(&data)
    }

    /// Intrinsic size of the document in user units.
    pub fn size(&self) -> (f32, f32) {
        let size = self.tree.size();
        (size.width(), size.height())
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl fmt::Debug for VectorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.size();
        f.debug_struct("VectorSource")
            .field("width", &width)
            .field("height", &height)
            .finish()
    }
}

// ============================================================================
// Rasterization
// ============================================================================

/// Renders `source` so it exactly fills a `size.width x size.height` buffer.
///
/// The document is scaled independently on each axis; no letterboxing is
/// applied. Each call allocates its own drawing surface.
pub fn render_exact(source: &VectorSource, size: SizePx) -> Result<RgbaImage, RenderError> {
    if size.is_empty() {
        return Err(RenderError::InvalidDimensions {
            width: size.width,
            height: size.height,
        });
    }

    let mut pixmap =
        Pixmap::new(size.width, size.height).ok_or(RenderError::SurfaceAllocation {
            width: size.width,
            height: size.height,
        })?;

    let (doc_width, doc_height) = source.size();
    let transform = Transform::from_scale(
        size.width as f32 / doc_width,
        size.height as f32 / doc_height,
    );
    resvg::render(source.tree(), transform, &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());

    for (dst, pixel) in img.pixels_mut().zip(pixmap.pixels()) {
        // tiny_skia uses premultiplied alpha, we need to unpremultiply
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        *dst = Rgba([r, g, b, a]);
    }

    img
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
// Compositing
// ============================================================================

/// Composites `src` over `dest`, pixel for pixel.
///
/// Both images cover the same target rectangle; pixels of `src` outside
/// `dest` are ignored.
pub fn composite_over(dest: &mut RgbaImage, src: &RgbaImage) {
    let width = dest.width().min(src.width());
    let height = dest.height().min(src.height());

    for y in 0..height {
        for x in 0..width {
            let blended = alpha_blend(*src.get_pixel(x, y), *dest.get_pixel(x, y));
            dest.put_pixel(x, y, blended);
        }
    }
}

/// Alpha blends two RGBA pixels (source over destination).
fn alpha_blend(src: Rgba<u8>, dst: Rgba<u8>) -> Rgba<u8> {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let sa = src[3] as f32 / 255.0;
    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);

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

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"><rect width="100" height="100" fill="#ff0000"/></svg>"##;
    const WIDE_BAR: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="100"><rect width="100" height="100" fill="#00ff00"/></svg>"##;

    #[test]
    fn render_fills_exact_size() {
        let source = VectorSource::from_svg(RED_SQUARE).unwrap();
        let img = render_exact(&source, SizePx::square(29)).unwrap();

        assert_eq!(img.dimensions(), (29, 29));
        assert_eq!(img.as_raw().len(), 4 * 29 * 29);
        assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(img.get_pixel(28, 28).0, [255, 0, 0, 255]);
    }

    #[test]
    fn render_stretches_non_square_sources() {
        // Left half of a 2:1 document becomes the left half of a square.
        let source = VectorSource::from_svg(WIDE_BAR).unwrap();
        let img = render_exact(&source, SizePx::square(40)).unwrap();

        assert_eq!(img.get_pixel(5, 35).0, [0, 255, 0, 255]);
        assert_eq!(img.get_pixel(35, 5).0[3], 0);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let source = VectorSource::from_svg(RED_SQUARE).unwrap();
        assert_eq!(
            render_exact(&source, SizePx::new(0, 16)),
            Err(RenderError::InvalidDimensions {
                width: 0,
                height: 16
            })
        );
    }

    #[test]
    fn garbage_does_not_decode() {
        assert!(matches!(
            VectorSource::from_data(b"definitely not a vector document"),
            Err(DecodeError::Svg(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = VectorSource::load(Path::new("does/not/exist.svg")).unwrap_err();
        assert!(matches!(err, DecodeError::Io { .. }));
        assert!(err.to_string().contains("exist.svg"));
    }

    #[test]
    fn source_reports_document_size() {
        let source = VectorSource::from_svg(WIDE_BAR).unwrap();
        assert_eq!(source.size(), (200.0, 100.0));
        assert!(format!("{source:?}").contains("200"));
    }

    #[test]
    fn composite_opaque_source_wins() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let mut src = RgbaImage::new(10, 10);
        src.put_pixel(5, 5, Rgba([0, 0, 255, 255]));

        composite_over(&mut dest, &src);

        assert_eq!(dest.get_pixel(5, 5).0, [0, 0, 255, 255]);
        assert_eq!(dest.get_pixel(0, 0).0, [255, 0, 0, 255]);
    }

    #[test]
    fn composite_with_transparency() {
        let mut dest = RgbaImage::from_pixel(10, 10, Rgba([255, 0, 0, 255]));
        let src = RgbaImage::from_pixel(10, 10, Rgba([0, 0, 255, 128]));

        composite_over(&mut dest, &src);

        // The result should be a blend of red and blue
        let pixel = dest.get_pixel(0, 0);
        assert!(pixel[0] > 0, "Should have some red");
        assert!(pixel[2] > 0, "Should have some blue");
        assert_eq!(pixel[3], 255);
    }

    #[test]
    fn unpremultiply_restores_color() {
        assert_eq!(unpremultiply(0, 0, 0, 0), (0, 0, 0, 0));
        assert_eq!(unpremultiply(128, 0, 0, 128), (255, 0, 0, 128));
    }
}
