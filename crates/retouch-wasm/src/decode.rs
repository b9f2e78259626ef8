//! Image decoding WASM bindings.
//!
//! # Functions
//!
//! - [`decode_image`] - Decode PNG, JPEG or WebP bytes to an RGBA bitmap
//! - [`upscale`] - Two-pass 2x magnification of a bitmap
//! - [`decode_and_upscale`] - Both of the above, as used for a new base image
//! - [`resize`] - Resize a bitmap to exact dimensions
//!
//! # Example
//!
//! ```typescript
//! import { decode_and_upscale } from '@retouch/wasm';
//!
//! const bytes = new Uint8Array(await blob.arrayBuffer());
//! const base = decode_and_upscale(bytes, blob.type);
//! console.log(`Base: ${base.width}x${base.height}`);
//! ```

use crate::types::{filter_from_u8, JsBitmap};
use retouch_core::decode::{self, SourceImage};
use wasm_bindgen::prelude::*;

/// Decode an image from bytes.
///
/// The format is sniffed from the bytes; `mime_type` is used when the bytes
/// are not recognized. EXIF orientation is applied.
///
/// # Errors
///
/// Returns an error if the bytes are unreadable, corrupt or of an unsupported type.
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8], mime_type: &str) -> Result<JsBitmap, JsValue> {
    decode::decode_image(&SourceImage::new(bytes.to_vec(), mime_type))
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Upscale a bitmap to exactly twice its width and height.
#[wasm_bindgen]
pub fn upscale(image: &JsBitmap) -> Result<JsBitmap, JsValue> {
    retouch_core::upscale(&image.to_bitmap())
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Decode and upscale in one step. No bitmap is produced on failure.
#[wasm_bindgen]
pub fn decode_and_upscale(bytes: &[u8], mime_type: &str) -> Result<JsBitmap, JsValue> {
    retouch_core::decode_and_upscale(&SourceImage::new(bytes.to_vec(), mime_type))
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Resize a bitmap to exact dimensions.
///
/// # Arguments
///
/// * `image` - Source bitmap
/// * `width` - Target width in pixels
/// * `height` - Target height in pixels
/// * `filter` - 0 = Nearest, 1 = Bilinear, 2 = CatmullRom, 3 = Lanczos3
#[wasm_bindgen]
pub fn resize(image: &JsBitmap, width: u32, height: u32, filter: u8) -> Result<JsBitmap, JsValue> {
    decode::resize(&image.to_bitmap(), width, height, filter_from_u8(filter))
        .map(JsBitmap::from_bitmap)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
