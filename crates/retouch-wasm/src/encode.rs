//! Image encoding WASM bindings for export.
//!
//! # Example
//!
//! ```typescript
//! import { export_png, export_jpeg } from '@retouch/wasm';
//!
//! const png = export_png(output);
//! const blob = new Blob([png], { type: 'image/png' });
//!
//! const jpeg = export_jpeg(output, 90);
//! ```

use crate::types::JsBitmap;
use retouch_core::encode;
use wasm_bindgen::prelude::*;

/// Encode a bitmap as PNG, keeping alpha.
#[wasm_bindgen]
pub fn export_png(image: &JsBitmap) -> Result<Vec<u8>, JsValue> {
    encode::encode_png(&image.to_bitmap()).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Encode a bitmap as JPEG.
///
/// # Arguments
///
/// * `image` - Bitmap to encode; alpha is dropped
/// * `quality` - JPEG quality (1-100, recommended: 90)
#[wasm_bindgen]
pub fn export_jpeg(image: &JsBitmap, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(&image.to_bitmap(), quality).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::Bitmap;

    #[test]
    fn test_core_jpeg_from_js_bitmap() {
        let img = JsBitmap::from_bitmap(Bitmap::filled(10, 10, [128, 128, 128, 255]));
        let jpeg = encode::encode_jpeg(&img.to_bitmap(), 90).unwrap();
        // Verify JPEG magic bytes
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
