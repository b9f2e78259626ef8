//! Lossless 90 degree rotation by index remapping.

use serde::{Deserialize, Serialize};

use crate::decode::Bitmap;

/// Direction of a quarter turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

impl From<bool> for RotationDirection {
    /// `true` maps to clockwise.
    fn from(clockwise: bool) -> Self {
        if clockwise {
            RotationDirection::Clockwise
        } else {
            RotationDirection::CounterClockwise
        }
    }
}

/// Rotate a bitmap by exactly 90 degrees.
///
/// Output dimensions are swapped. Every output pixel is a copy of exactly one
/// input pixel, so four turns in the same direction reproduce the input.
pub fn rotate_90(image: &Bitmap, direction: RotationDirection) -> Bitmap {
    let (w, h) = (image.width, image.height);
    let mut output = Vec::with_capacity(image.pixels.len());

    // Output is h wide and w tall; walk it row by row.
    for dst_y in 0..w {
        for dst_x in 0..h {
            let (src_x, src_y) = match direction {
                RotationDirection::Clockwise => (dst_y, h - 1 - dst_x),
                RotationDirection::CounterClockwise => (w - 1 - dst_y, dst_x),
            };
            let i = image.index(src_x, src_y);
            output.extend_from_slice(&image.pixels[i..i + Bitmap::CHANNELS]);
        }
    }

    Bitmap::new(h, w, output)
}
