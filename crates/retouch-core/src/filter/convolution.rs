//! Generic 3x3 convolution with clamped-edge sampling.

use crate::adjustments::to_channel;
use crate::decode::Bitmap;

/// A 3x3 convolution kernel with its divisor.
///
/// Weights are stored row-major, top-left first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel {
    pub weights: [f32; 9],
    pub divisor: f32,
}

impl Kernel {
    pub fn new(weights: [f32; 9], divisor: f32) -> Self {
        Self { weights, divisor }
    }

    /// Kernel that reproduces its input.
    pub fn identity() -> Self {
        Self::new([0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0], 1.0)
    }

    /// Uniform 3x3 box blur.
    pub fn box_blur() -> Self {
        Self::new([1.0; 9], 9.0)
    }

    /// Unsharp-mask approximation: center `1 + 8t`, neighbors `-t`.
    pub fn sharpen(t: f32) -> Self {
        let mut weights = [-t; 9];
        weights[4] = 1.0 + 8.0 * t;
        Self::new(weights, 1.0)
    }
}

/// Apply a 3x3 kernel to the color channels of a bitmap.
///
/// Neighbors outside the bitmap are replaced by the nearest edge pixel.
/// Each channel becomes `clamp(round(sum(weight * sample) / divisor), 0, 255)`.
pub fn convolve(image: &Bitmap, kernel: &Kernel) -> Bitmap {
    let mut output = image.pixels.clone();
    if image.is_empty() {
        return Bitmap::new(image.width, image.height, output);
    }

    let max_x = image.width as i64 - 1;
    let max_y = image.height as i64 - 1;

    for y in 0..image.height {
        for x in 0..image.width {
            let mut sum = [0.0f32; 3];

            for ky in 0..3i64 {
                let sy = (y as i64 + ky - 1).clamp(0, max_y) as u32;
                for kx in 0..3i64 {
                    let sx = (x as i64 + kx - 1).clamp(0, max_x) as u32;
                    let weight = kernel.weights[(ky * 3 + kx) as usize];
                    let idx = image.index(sx, sy);
                    sum[0] += weight * image.pixels[idx] as f32;
                    sum[1] += weight * image.pixels[idx + 1] as f32;
                    sum[2] += weight * image.pixels[idx + 2] as f32;
                }
            }

            let dst = image.index(x, y);
            for c in 0..3 {
                output[dst + c] = to_channel(sum[c] / kernel.divisor);
            }
        }
    }

    Bitmap::new(image.width, image.height, output)
}
