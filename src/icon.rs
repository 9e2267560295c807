//! Rendered icon images.
//!
//! An [`IconImage`] is the RGBA buffer produced for one (variant, scale)
//! unit, together with the scale it was rendered at.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A `side x side` size.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// A single rendered icon image.
///
/// The buffer is 8-bit RGBA, row-major, with a stride of `4 * width` bytes
/// and straight (non-premultiplied) alpha.
#[derive(Debug, Clone, PartialEq)]
pub struct IconImage {
    /// The image data in RGBA format.
    pub data: RgbaImage,

    /// The display scale factor the image was rendered for.
    pub scale: f64,
}

impl IconImage {
    pub fn new(data: RgbaImage, scale: f64) -> Self {
        Self { data, scale }
    }

    /// Returns the pixel dimensions of the image.
    pub fn dimensions(&self) -> SizePx {
        SizePx::new(self.data.width(), self.data.height())
    }

    /// Encodes the image as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, image::ImageError> {
        let mut bytes = Vec::new();
        self.data
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)?;
        Ok(bytes)
    }
}
