//! Lossless PNG encoding, the default export format.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use super::{validate, EncodeError};
use crate::decode::Bitmap;

/// Encode a bitmap to PNG bytes, alpha included.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>, EncodeError> {
    validate(bitmap)?;

    let mut buffer = Cursor::new(Vec::new());
    PngEncoder::new(&mut buffer)
        .write_image(
            &bitmap.pixels,
            bitmap.width,
            bitmap.height,
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_signature() {
        let png = encode_png(&Bitmap::filled(4, 4, [1, 2, 3, 4])).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_png_single_pixel() {
        assert!(encode_png(&Bitmap::filled(1, 1, [255, 0, 0, 255])).is_ok());
    }

    #[test]
    fn test_encode_png_rejects_bad_buffer() {
        let bmp = Bitmap {
            width: 3,
            height: 3,
            pixels: vec![0u8; 3 * 3 * 3],
        };
        let err = encode_png(&bmp).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid pixel data: expected 36 bytes (width * height * 4), got 27"
        );
    }
}
