//! WASM bindings for geometric transforms.
//!
//! Crop and rotation helpers for callers that manage their own bitmaps. The
//! edit session (`JsEditSession`) uses the same core functions when it
//! commits geometry.

use crate::types::{interpolation, JsBitmap};
use retouch_core::transform::{
    apply_crop as core_crop, apply_rotation as core_rotate, compute_rotated_bounds,
    rotate_90 as core_rotate_90, CropRect, RotationDirection,
};
use wasm_bindgen::prelude::*;

/// Apply free rotation to an image.
///
/// The output canvas is expanded to fit the entire rotated image (no
/// clipping); uncovered corners are transparent.
///
/// # Arguments
///
/// * `image` - Source image to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = clockwise)
/// * `use_lanczos` - Use high-quality Lanczos3 filter (slower), otherwise bilinear
///
/// # Example (TypeScript)
///
/// ```typescript
/// const preview = apply_rotation(base, 15.0, false);
/// const exported = apply_rotation(base, 15.0, true);
/// ```
#[wasm_bindgen]
pub fn apply_rotation(image: &JsBitmap, angle_degrees: f64, use_lanczos: bool) -> JsBitmap {
    let src = image.to_bitmap();
    JsBitmap::from_bitmap(core_rotate(&src, angle_degrees, interpolation(use_lanczos)))
}

/// Bounding box `[width, height]` of an image rotated by `angle_degrees`.
#[wasm_bindgen]
pub fn rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> Vec<u32> {
    let (w, h) = compute_rotated_bounds(width, height, angle_degrees);
    vec![w, h]
}

/// Rotate exactly 90 degrees without resampling.
#[wasm_bindgen]
pub fn rotate_90(image: &JsBitmap, clockwise: bool) -> JsBitmap {
    let src = image.to_bitmap();
    JsBitmap::from_bitmap(core_rotate_90(&src, RotationDirection::from(clockwise)))
}

/// Crop a region given in native pixel coordinates.
///
/// Values are rounded to whole pixels and clamped to the image. A rect with
/// zero or negative width or height leaves the image as is.
#[wasm_bindgen]
pub fn apply_crop(image: &JsBitmap, x: f64, y: f64, width: f64, height: f64) -> JsBitmap {
    let src = image.to_bitmap();
    JsBitmap::from_bitmap(core_crop(&src, &CropRect::new(x, y, width, height)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use retouch_core::Bitmap;

    /// Create a simple test image.
    fn test_image(width: u32, height: u32) -> JsBitmap {
        let pixels: Vec<u8> = (0..(width * height) as usize)
            .flat_map(|i| [(i % 256) as u8, 0, 0, 255])
            .collect();
        JsBitmap::from_bitmap(Bitmap::new(width, height, pixels))
    }

    #[test]
    fn test_rotation_no_change() {
        let img = test_image(100, 100);
        let result = apply_rotation(&img, 0.0, false);
        assert_eq!(result.width(), 100);
        assert_eq!(result.pixels(), img.pixels());
    }

    #[test]
    fn test_rotation_expands() {
        let img = test_image(100, 50);
        let result = apply_rotation(&img, 30.0, true);
        let bounds = rotated_bounds(100, 50, 30.0);
        assert_eq!(vec![result.width(), result.height()], bounds);
        assert!(result.width() > 100);
    }

    #[test]
    fn test_rotate_90_swaps_dimensions() {
        let img = test_image(6, 3);
        let cw = rotate_90(&img, true);
        assert_eq!((cw.width(), cw.height()), (3, 6));
        let back = rotate_90(&cw, false);
        assert_eq!(back.pixels(), img.pixels());
    }

    #[test]
    fn test_crop_region() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 2.0, 3.0, 4.0, 5.0);
        assert_eq!((result.width(), result.height()), (4, 5));
        // (2, 3) -> 32
        assert_eq!(result.pixels()[0], 32);
    }

    #[test]
    fn test_degenerate_crop_is_noop() {
        let img = test_image(10, 10);
        let result = apply_crop(&img, 2.0, 3.0, 0.0, 5.0);
        assert_eq!(result.pixels(), img.pixels());
    }
}
