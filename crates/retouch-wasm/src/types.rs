//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core Retouch types,
//! handling the conversion between Rust and JavaScript data representations.

use retouch_core::decode::{Bitmap, FilterType};
use retouch_core::transform::InterpolationFilter;
use wasm_bindgen::prelude::*;

/// An RGBA bitmap wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. `pixels()` and `image_data()` copy
/// it into JavaScript memory, so keep bitmaps in WASM between operations and
/// only extract pixels for drawing.
#[wasm_bindgen]
pub struct JsBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsBitmap {
    /// Create a bitmap from RGBA pixel data (4 bytes per pixel, row-major order).
    ///
    /// Fails if `pixels.length != width * height * 4`.
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<JsBitmap, JsValue> {
        Self::from_parts(width, height, pixels).ok_or_else(|| {
            JsValue::from_str(&format!(
                "Invalid pixel data: expected {} bytes for {}x{} RGBA",
                expected_len(width, height),
                width,
                height
            ))
        })
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGBA pixel data as Uint8Array (copy).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Returns the pixels as a `Uint8ClampedArray`, ready for `new ImageData(...)`.
    pub fn image_data(&self) -> js_sys::Uint8ClampedArray {
        js_sys::Uint8ClampedArray::from(self.pixels.as_slice())
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    pub fn free(self) {}
}

impl JsBitmap {
    /// Wrap raw parts, rejecting a buffer of the wrong length.
    pub(crate) fn from_parts(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == expected_len(width, height)).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    pub(crate) fn from_bitmap(bitmap: Bitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            pixels: bitmap.pixels,
        }
    }

    /// Convert to a core Bitmap (clones the pixel data).
    pub(crate) fn to_bitmap(&self) -> Bitmap {
        Bitmap::new(self.width, self.height, self.pixels.clone())
    }
}

fn expected_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * Bitmap::CHANNELS
}

/// Convert a u8 filter type value to the core resize FilterType.
///
/// Values:
/// - 0 = Nearest
/// - 1 = Bilinear
/// - 2 = CatmullRom
/// - 3 = Lanczos3
///
/// Any other value defaults to Bilinear.
pub(crate) fn filter_from_u8(value: u8) -> FilterType {
    match value {
        0 => FilterType::Nearest,
        2 => FilterType::CatmullRom,
        3 => FilterType::Lanczos3,
        _ => FilterType::Bilinear,
    }
}

pub(crate) fn interpolation(use_lanczos: bool) -> InterpolationFilter {
    if use_lanczos {
        InterpolationFilter::Lanczos3
    } else {
        InterpolationFilter::Bilinear
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_checks_length() {
        assert!(JsBitmap::from_parts(2, 2, vec![0; 16]).is_some());
        assert!(JsBitmap::from_parts(2, 2, vec![0; 12]).is_none());
    }

    #[test]
    fn test_from_bitmap() {
        let js = JsBitmap::from_bitmap(Bitmap::filled(20, 10, [1, 2, 3, 4]));
        assert_eq!(js.width(), 20);
        assert_eq!(js.height(), 10);
        assert_eq!(js.byte_length(), 800);
    }

    #[test]
    fn test_to_bitmap_round_trip() {
        let bmp = Bitmap::filled(3, 2, [9, 8, 7, 255]);
        let js = JsBitmap::from_bitmap(bmp.clone());
        assert_eq!(js.to_bitmap(), bmp);
        assert_eq!(js.pixels(), bmp.pixels);
    }

    #[test]
    fn test_filter_from_u8() {
        assert_eq!(filter_from_u8(0), FilterType::Nearest);
        assert_eq!(filter_from_u8(1), FilterType::Bilinear);
        assert_eq!(filter_from_u8(2), FilterType::CatmullRom);
        assert_eq!(filter_from_u8(3), FilterType::Lanczos3);
        // Unknown values default to Bilinear
        assert_eq!(filter_from_u8(255), FilterType::Bilinear);
    }

    #[test]
    fn test_interpolation() {
        assert_eq!(interpolation(true), InterpolationFilter::Lanczos3);
        assert_eq!(interpolation(false), InterpolationFilter::Bilinear);
    }
}
