//! JPEG encoding for export.
//!
//! JPEG has no alpha channel, so the alpha byte of each pixel is dropped
//! before the RGB data is handed to the `image` crate's encoder.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};
use crate::decode::Bitmap;

/// Default export quality, matching common photo editors.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode a bitmap to JPEG bytes.
///
/// `quality` is clamped to 1..=100.
///
/// # Errors
///
/// Returns `EncodeError::InvalidDimensions` or `EncodeError::InvalidPixelData`
/// for a malformed bitmap, and `EncodeError::EncodingFailed` if the encoder
/// itself fails.
pub fn encode_jpeg(bitmap: &Bitmap, quality: u8) -> Result<Vec<u8>, EncodeError> {
    validate(bitmap)?;

    let quality = quality.clamp(1, 100);
    let rgb: Vec<u8> = bitmap
        .pixels
        .chunks_exact(Bitmap::CHANNELS)
        .flat_map(|px| [px[0], px[1], px[2]])
        .collect();

    let mut buffer = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buffer, quality)
        .write_image(&rgb, bitmap.width, bitmap.height, ExtendedColorType::Rgb8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}
