//! Detail filters: sharpening and noise reduction.

use super::{convolve, Kernel};
use crate::decode::Bitmap;

/// Sharpen with strength proportional to `intensity` (0 to 100).
///
/// Identity at 0. Otherwise convolves once with `Kernel::sharpen(intensity / 100)`.
pub fn sharpen(image: Bitmap, intensity: i32) -> Bitmap {
    let intensity = intensity.min(100);
    if intensity <= 0 {
        return image;
    }

    convolve(&image, &Kernel::sharpen(intensity as f32 / 100.0))
}

/// Number of box-blur passes for a noise reduction intensity (0, 1 or 2).
pub fn noise_reduction_passes(intensity: i32) -> u32 {
    if intensity <= 0 {
        return 0;
    }
    (intensity.min(100) as f32 / 100.0 * 2.0).round() as u32
}

/// Smooth noise with sequential 3x3 box-blur passes.
///
/// Identity at 0. Each pass reads the previous pass's output.
pub fn reduce_noise(image: Bitmap, intensity: i32) -> Bitmap {
    let kernel = Kernel::box_blur();
    (0..noise_reduction_passes(intensity)).fold(image, |img, _| convolve(&img, &kernel))
}
