//! Bitmap decoding with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageError, ImageFormat, ImageReader};

use super::{Bitmap, DecodeError, Orientation, SourceImage};

/// Decode an encoded image into an upright RGBA bitmap.
///
/// The container format is sniffed from the bytes first. The declared MIME
/// type is only consulted when sniffing fails, because the remote side may
/// hand back a different encoding than the one originally uploaded.
///
/// # Errors
///
/// - `DecodeError::InvalidFormat` if neither the bytes nor the MIME type name a format
/// - `DecodeError::UnsupportedFormat` if the format is known but not compiled in
/// - `DecodeError::CorruptedFile` if the decoder rejects the data
pub fn decode_image(source: &SourceImage) -> Result<Bitmap, DecodeError> {
    let orientation = extract_orientation(&source.bytes);

    let mut reader = ImageReader::new(Cursor::new(source.bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        if let Some(declared) = declared_format(&source.mime_type) {
            reader.set_format(declared);
        }
    }

    let format = reader.format().ok_or(DecodeError::InvalidFormat)?;
    if !format.reading_enabled() {
        return Err(DecodeError::UnsupportedFormat(source.mime_type.clone()));
    }

    let img = reader.decode().map_err(|e| match e {
        ImageError::Unsupported(_) => DecodeError::UnsupportedFormat(source.mime_type.clone()),
        other => DecodeError::CorruptedFile(other.to_string()),
    })?;

    let bitmap = Bitmap::from_rgba_image(apply_orientation(img, orientation).into_rgba8());
    if bitmap.is_empty() {
        return Err(DecodeError::InvalidDimensions {
            width: bitmap.width,
            height: bitmap.height,
        });
    }
    Ok(bitmap)
}

/// Map a declared MIME type to a decoder, ignoring generic binary types.
fn declared_format(mime_type: &str) -> Option<ImageFormat> {
    let essence = mime_type.split(';').next().unwrap_or_default().trim();
    if essence.is_empty() || essence == "application/octet-stream" {
        return None;
    }
    ImageFormat::from_mime_type(essence)
}

/// Extract EXIF orientation, defaulting to `Normal` when absent.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Apply EXIF orientation transformation to an image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
