//! Rectangular crop extraction in native pixel coordinates.
//!
//! Crop rectangles are expressed in the pixel space of the bitmap they are
//! applied to (not display space). Fractional values are rounded to whole
//! pixels; the result is always clamped inside the source.

use serde::{Deserialize, Serialize};

use crate::decode::Bitmap;

/// A crop rectangle in native pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    #[serde(rename = "w")]
    pub width: f64,
    #[serde(rename = "h")]
    pub height: f64,
}

impl CropRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rect covering the whole of a `width x height` bitmap.
    pub fn full(width: u32, height: u32) -> Self {
        Self::new(0.0, 0.0, width as f64, height as f64)
    }

    /// True when the rect has no area and must not be applied.
    pub fn is_degenerate(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }
}

/// Extract the integer-rounded sub-rectangle `rect` from `image`.
///
/// The output is `round(rect.width) x round(rect.height)` pixels, clamped to
/// the source bounds and never smaller than 1x1.
///
/// # Behavior
///
/// - A rect with zero or negative width/height is ignored (copy of the input)
/// - Full crop (0, 0, width, height) returns a copy of the original image
pub fn apply_crop(image: &Bitmap, rect: &CropRect) -> Bitmap {
    if rect.is_degenerate() || image.is_empty() {
        return image.clone();
    }

    let px_left = (rect.x.max(0.0).round() as u32).min(image.width - 1);
    let px_top = (rect.y.max(0.0).round() as u32).min(image.height - 1);
    let px_width = (rect.width.round() as u32).max(1);
    let px_height = (rect.height.round() as u32).max(1);

    let out_width = px_width.min(image.width - px_left);
    let out_height = px_height.min(image.height - px_top);

    // Fast path: full crop returns a clone
    if px_left == 0 && px_top == 0 && out_width == image.width && out_height == image.height {
        return image.clone();
    }

    let row_bytes = out_width as usize * Bitmap::CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    for y in px_top..px_top + out_height {
        let start = image.index(px_left, y);
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    Bitmap::new(out_width, out_height, output)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
