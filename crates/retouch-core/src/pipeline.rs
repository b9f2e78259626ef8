//! The compositing pipeline.
//!
//! Runs every non-destructive edit over the base bitmap in a fixed order:
//!
//! 1. Pending crop (only when the rect has positive width and height)
//! 2. Free rotation (skipped at 0 degrees)
//! 3. Noise reduction
//! 4. Brightness
//! 5. Contrast
//! 6. Saturation
//! 7. Sharpen
//!
//! Geometry resolves first so convolution neighborhoods see the final
//! boundaries. Noise reduction precedes the tonal steps and sharpening comes
//! last, acting on the final tonal result.

use tracing::debug;

use crate::adjustments::{
    adjust_brightness, adjust_contrast, adjust_saturation, SATURATION_NEUTRAL,
};
use crate::decode::Bitmap;
use crate::filter::{reduce_noise, sharpen};
use crate::transform::{apply_crop, apply_rotation, CropRect, InterpolationFilter};
use crate::values::EnhancementValues;

/// Produce a fresh output bitmap from `base`, `values` and an optional
/// uncommitted crop. `base` is never modified.
pub fn apply_adjustments(
    base: &Bitmap,
    values: &EnhancementValues,
    pending_crop: Option<&CropRect>,
) -> Bitmap {
    let mut image = match pending_crop {
        Some(rect) if !rect.is_degenerate() => {
            debug!(
                stage = "crop",
                x = rect.x,
                y = rect.y,
                w = rect.width,
                h = rect.height,
                "processing"
            );
            apply_crop(base, rect)
        }
        _ => base.clone(),
    };

    if values.rotation() != 0.0 {
        debug!(stage = "rotate", degrees = values.rotation(), "processing");
        image = apply_rotation(&image, values.rotation(), InterpolationFilter::Bilinear);
    }

    for (stage, apply, amount) in active_pixel_stages(values) {
        debug!(stage, amount, "processing");
        image = apply(image, amount);
    }

    debug!(width = image.width, height = image.height, "pipeline complete");
    image
}

type PixelStage = (&'static str, fn(Bitmap, i32) -> Bitmap, i32);

/// Pixel stages in pipeline order, without those sitting at their neutral value.
fn active_pixel_stages(values: &EnhancementValues) -> Vec<PixelStage> {
    let stages: [(PixelStage, i32); 5] = [
        (("noise_reduction", reduce_noise, values.noise_reduction()), 0),
        (("brightness", adjust_brightness, values.brightness()), 0),
        (("contrast", adjust_contrast, values.contrast()), 0),
        (("saturation", adjust_saturation, values.saturation()), SATURATION_NEUTRAL),
        (("sharpen", sharpen, values.sharpness()), 0),
    ];

    stages
        .into_iter()
        .filter(|((_, _, amount), neutral)| amount != neutral)
        .map(|(stage, _)| stage)
        .collect()
}
