//! Alpha normalization.
//!
//! Some icon submission pipelines reject images that carry alpha data. This
//! layer forces every pixel opaque while leaving the color samples as they
//! are; nothing is blended against a background.

use image::RgbaImage;

use super::{LayerEffect, RenderContext};
use crate::error::RenderError;

/// Marker config for the alpha-stripping layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlphaFlatten;

impl LayerEffect for AlphaFlatten {
    fn name(&self) -> &'static str {
        "alpha"
    }

    fn transform(&self, ctx: &mut RenderContext) -> Result<(), RenderError> {
        flatten_in_place(&mut ctx.image.data);
        Ok(())
    }
}

/// Returns a copy of `image` with every alpha sample set to 255.
pub fn flatten(image: &RgbaImage) -> RgbaImage {
    let mut out = image.clone();
    flatten_in_place(&mut out);
    out
}

/// Sets every alpha sample of `image` to 255.
pub fn flatten_in_place(image: &mut RgbaImage) {
    for pixel in image.pixels_mut() {
        pixel[3] = u8::MAX;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn flatten_forces_opaque_and_keeps_rgb() {
        let mut input = RgbaImage::new(4, 3);
        for (i, pixel) in input.pixels_mut().enumerate() {
            let v = (i * 20) as u8;
            *pixel = Rgba([v, v.wrapping_add(1), v.wrapping_add(2), v / 2]);
        }

        let output = flatten(&input);

        assert_eq!(output.dimensions(), input.dimensions());
        for (before, after) in input.pixels().zip(output.pixels()) {
            assert_eq!(after[3], 255);
            assert_eq!(before.0[..3], after.0[..3]);
        }
    }

    #[test]
    fn transparent_pixels_keep_their_color() {
        let input = RgbaImage::from_pixel(2, 2, Rgba([12, 34, 56, 0]));
        assert_eq!(flatten(&input).get_pixel(1, 1).0, [12, 34, 56, 255]);
    }
}
