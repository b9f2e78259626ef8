//! Free-angle rotation with canvas expansion.
//!
//! The output canvas is grown to the bounding box of the rotated source so no
//! content is clipped. Pixels of the new canvas that fall outside the source
//! are fully transparent.
//!
//! # Algorithm
//!
//! Inverse mapping from each destination pixel center back into the source.
//! With positive angles rotating clockwise on screen (y axis down):
//! ```text
//! src_x =  dx * cos(θ) + dy * sin(θ) + src_cx
//! src_y = -dx * sin(θ) + dy * cos(θ) + src_cy
//! ```
//! Samples are interpolated on premultiplied alpha so the transparent
//! surround does not darken the edges of the image.

use crate::decode::Bitmap;

/// Interpolation filter for rotation operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InterpolationFilter {
    /// Fast bilinear interpolation - used by the live preview.
    #[default]
    Bilinear,
    /// High-quality Lanczos3 interpolation.
    Lanczos3,
}

/// Compute the dimensions of the bounding box for a rotated image.
///
/// ```text
/// new_w = round(w * |cos θ| + h * |sin θ|)
/// new_h = round(w * |sin θ| + h * |cos θ|)
/// ```
///
/// Exact multiples of 90 degrees short-circuit to avoid floating point noise.
/// Both dimensions are at least 1.
pub fn compute_rotated_bounds(width: u32, height: u32, angle_degrees: f64) -> (u32, u32) {
    let abs_angle = (angle_degrees % 360.0).abs();

    if abs_angle == 0.0 || abs_angle == 180.0 {
        return (width, height);
    }
    if abs_angle == 90.0 || abs_angle == 270.0 {
        return (height, width);
    }

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos().abs();
    let sin = angle_rad.sin().abs();

    let w = width as f64;
    let h = height as f64;

    let new_w = (w * cos + h * sin).round() as u32;
    let new_h = (w * sin + h * cos).round() as u32;

    (new_w.max(1), new_h.max(1))
}

/// Rotate an image about its center by `angle_degrees` (positive = clockwise).
///
/// Returns a copy of the input when the angle is exactly zero.
pub fn apply_rotation(image: &Bitmap, angle_degrees: f64, filter: InterpolationFilter) -> Bitmap {
    if angle_degrees == 0.0 || image.is_empty() {
        return image.clone();
    }

    let (dst_w, dst_h) = compute_rotated_bounds(image.width, image.height, angle_degrees);

    let angle_rad = angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let src_cx = image.width as f64 / 2.0;
    let src_cy = image.height as f64 / 2.0;
    let dst_cx = dst_w as f64 / 2.0;
    let dst_cy = dst_h as f64 / 2.0;

    let mut output = Vec::with_capacity(dst_w as usize * dst_h as usize * Bitmap::CHANNELS);

    for dst_y in 0..dst_h {
        let dy = dst_y as f64 + 0.5 - dst_cy;
        for dst_x in 0..dst_w {
            let dx = dst_x as f64 + 0.5 - dst_cx;

            // Continuous source position, shifted so pixel centers sit on integers.
            let src_x = dx * cos + dy * sin + src_cx - 0.5;
            let src_y = -dx * sin + dy * cos + src_cy - 0.5;

            let pixel = match filter {
                InterpolationFilter::Bilinear => sample_bilinear(image, src_x, src_y),
                InterpolationFilter::Lanczos3 => sample_lanczos3(image, src_x, src_y),
            };
            output.extend_from_slice(&pixel);
        }
    }

    Bitmap::new(dst_w, dst_h, output)
}

/// Premultiplied RGBA at integer coordinates; transparent outside the image.
#[inline]
fn fetch_premultiplied(image: &Bitmap, x: i64, y: i64) -> [f64; 4] {
    if x < 0 || y < 0 || x >= image.width as i64 || y >= image.height as i64 {
        return [0.0; 4];
    }
    let [r, g, b, a] = image.pixel(x as u32, y as u32);
    let alpha = a as f64 / 255.0;
    [r as f64 * alpha, g as f64 * alpha, b as f64 * alpha, a as f64]
}

/// Convert an accumulated premultiplied sample back to straight RGBA.
#[inline]
fn unpremultiply(sum: [f64; 4]) -> [u8; 4] {
    let a = sum[3].clamp(0.0, 255.0);
    if a < 0.5 {
        return [0; 4];
    }
    let alpha = a / 255.0;
    [
        (sum[0] / alpha).clamp(0.0, 255.0).round() as u8,
        (sum[1] / alpha).clamp(0.0, 255.0).round() as u8,
        (sum[2] / alpha).clamp(0.0, 255.0).round() as u8,
        a.round() as u8,
    ]
}

/// Sample a pixel using bilinear interpolation over the 4 nearest pixels.
fn sample_bilinear(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as f64, image.height as f64);

    // Further than one pixel outside: no source pixel contributes.
    if x <= -1.0 || y <= -1.0 || x >= w || y >= h {
        return [0; 4];
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;
    let fx = x - x0 as f64;
    let fy = y - y0 as f64;

    let p00 = fetch_premultiplied(image, x0, y0);
    let p10 = fetch_premultiplied(image, x0 + 1, y0);
    let p01 = fetch_premultiplied(image, x0, y0 + 1);
    let p11 = fetch_premultiplied(image, x0 + 1, y0 + 1);

    let mut sum = [0.0f64; 4];
    for i in 0..4 {
        sum[i] = p00[i] * (1.0 - fx) * (1.0 - fy)
            + p10[i] * fx * (1.0 - fy)
            + p01[i] * (1.0 - fx) * fy
            + p11[i] * fx * fy;
    }

    unpremultiply(sum)
}

/// Sample a pixel using Lanczos3 interpolation over a 6x6 neighborhood.
///
/// Falls back to bilinear within the kernel radius of the border.
fn sample_lanczos3(image: &Bitmap, x: f64, y: f64) -> [u8; 4] {
    let (w, h) = (image.width as i64, image.height as i64);

    if x < 2.0 || x >= (w - 3) as f64 || y < 2.0 || y >= (h - 3) as f64 {
        return sample_bilinear(image, x, y);
    }

    let x0 = x.floor() as i64;
    let y0 = y.floor() as i64;

    let mut sum = [0.0f64; 4];
    let mut weight_sum = 0.0;

    for ky in -2..=3 {
        for kx in -2..=3 {
            let px = x0 + kx;
            let py = y0 + ky;
            let weight = lanczos_weight(x - px as f64, 3.0) * lanczos_weight(y - py as f64, 3.0);

            let pixel = fetch_premultiplied(image, px, py);
            for i in 0..4 {
                sum[i] += pixel[i] * weight;
            }
            weight_sum += weight;
        }
    }

    if weight_sum.abs() < f64::EPSILON {
        return sample_bilinear(image, x, y);
    }
    unpremultiply(sum.map(|v| v / weight_sum))
}

/// Lanczos kernel weight function.
///
/// ```text
/// L(x) = sinc(x) * sinc(x/a)  for |x| < a
/// L(x) = 0                     for |x| >= a
/// ```
fn lanczos_weight(x: f64, a: f64) -> f64 {
    if x.abs() < f64::EPSILON {
        return 1.0;
    }
    if x.abs() >= a {
        return 0.0;
    }

    let pi_x = std::f64::consts::PI * x;
    let pi_x_a = pi_x / a;
    (a * pi_x.sin() * pi_x_a.sin()) / (pi_x * pi_x)
}
