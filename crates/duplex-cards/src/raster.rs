//! In-memory image decoding for PDF embedding.

use crate::types::{CardError, Result};
use image::{DynamicImage, Rgb, RgbImage, Rgba};

/// Opaque 8-bit RGB pixels ready to embed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatImage {
    pub width: u32,
    pub height: u32,
    /// Row-major RGB triples
    pub pixels: Vec<u8>,
}

/// Decode image bytes and drop any alpha channel by compositing onto white.
pub fn flatten_image(bytes: &[u8]) -> Result<FlatImage> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| CardError::ImageUnavailable(format!("decode failed: {e}")))?;
    Ok(flatten_decoded(&decoded))
}

pub fn flatten_decoded(decoded: &DynamicImage) -> FlatImage {
    let rgb = if decoded.color().has_alpha() {
        composite_on_white(decoded)
    } else {
        decoded.to_rgb8()
    };

    let (width, height) = rgb.dimensions();
    FlatImage {
        width,
        height,
        pixels: rgb.into_raw(),
    }
}

fn composite_on_white(decoded: &DynamicImage) -> RgbImage {
    let rgba = decoded.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgb = RgbImage::new(width, height);
    for (x, y, pixel) in rgba.enumerate_pixels() {
        let Rgba([r, g, b, a]) = *pixel;
        let alpha = a as f32 / 255.0;
        let blend = |c: u8| (c as f32 * alpha + 255.0 * (1.0 - alpha)).round() as u8;
        rgb.put_pixel(x, y, Rgb([blend(r), blend(g), blend(b)]));
    }
    rgb
}
