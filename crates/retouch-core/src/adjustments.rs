//! Per-pixel tonal adjustments: brightness, contrast and saturation.
//!
//! Every adjustment works on the R, G and B channels of an RGBA bitmap and
//! leaves alpha untouched. Each one returns its input unchanged when called
//! with its neutral value, so neutral settings never introduce rounding drift.

use crate::color::{hsl_to_rgb, rgb_to_hsl, Hsl};
use crate::decode::Bitmap;

/// Neutral saturation (percent).
pub const SATURATION_NEUTRAL: i32 = 100;

/// Shift every color channel by `(brightness / 100) * 128`.
///
/// `brightness` ranges from -100 to +100; 0 is identity.
pub fn adjust_brightness(mut image: Bitmap, brightness: i32) -> Bitmap {
    let brightness = brightness.clamp(-100, 100);
    if brightness == 0 {
        return image;
    }

    let offset = brightness as f32 / 100.0 * 128.0;
    for px in image.pixels.chunks_exact_mut(Bitmap::CHANNELS) {
        for c in &mut px[..3] {
            *c = to_channel(*c as f32 + offset);
        }
    }
    image
}

/// Stretch or compress channels around the 128 midpoint.
///
/// `contrast` ranges from -100 to +100; 0 is identity.
///
/// Formula: `factor = 259 * (c + 255) / (255 * (259 - c))`,
/// `out = factor * (in - 128) + 128`
pub fn adjust_contrast(mut image: Bitmap, contrast: i32) -> Bitmap {
    let contrast = contrast.clamp(-100, 100);
    if contrast == 0 {
        return image;
    }

    let factor = contrast_factor(contrast);
    for px in image.pixels.chunks_exact_mut(Bitmap::CHANNELS) {
        for c in &mut px[..3] {
            *c = to_channel(factor * (*c as f32 - 128.0) + 128.0);
        }
    }
    image
}

/// Scale HSL saturation by `saturation / 100`, keeping hue and lightness.
///
/// `saturation` ranges from 0 to 200; 100 is identity and 0 is fully gray.
pub fn adjust_saturation(mut image: Bitmap, saturation: i32) -> Bitmap {
    let saturation = saturation.clamp(0, 200);
    if saturation == SATURATION_NEUTRAL {
        return image;
    }

    let scale = saturation as f32 / 100.0;
    for px in image.pixels.chunks_exact_mut(Bitmap::CHANNELS) {
        let hsl = rgb_to_hsl(
            px[0] as f32 / 255.0,
            px[1] as f32 / 255.0,
            px[2] as f32 / 255.0,
        );
        let (r, g, b) = hsl_to_rgb(Hsl {
            s: (hsl.s * scale).clamp(0.0, 1.0),
            ..hsl
        });
        px[0] = to_channel(r * 255.0);
        px[1] = to_channel(g * 255.0);
        px[2] = to_channel(b * 255.0);
    }
    image
}

#[inline]
fn contrast_factor(contrast: i32) -> f32 {
    let c = contrast as f32;
    (259.0 * (c + 255.0)) / (255.0 * (259.0 - c))
}

#[inline]
pub(crate) fn to_channel(value: f32) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::rgb_to_hsl;

    fn sample() -> Bitmap {
        Bitmap::new(
            3,
            1,
            vec![255, 0, 0, 255, 64, 128, 192, 200, 10, 10, 10, 0],
        )
    }

    // ===== Identity Tests =====

    #[test]
    fn test_neutral_values_are_identity() {
        let img = sample();
        assert_eq!(adjust_brightness(img.clone(), 0), img);
        assert_eq!(adjust_contrast(img.clone(), 0), img);
        assert_eq!(adjust_saturation(img.clone(), 100), img);
    }

    // ===== Brightness Tests =====

    #[test]
    fn test_brightness_solid_red() {
        let img = Bitmap::filled(10, 10, [255, 0, 0, 255]);
        let out = adjust_brightness(img, 50);
        for px in out.pixels.chunks_exact(4) {
            assert_eq!(px, &[255, 64, 64, 255]);
        }
    }

    #[test]
    fn test_brightness_negative_clamps_at_black() {
        let out = adjust_brightness(Bitmap::filled(1, 1, [100, 200, 0, 255]), -100);
        assert_eq!(out.pixel(0, 0), [0, 72, 0, 255]);
    }

    #[test]
    fn test_brightness_keeps_alpha() {
        let out = adjust_brightness(sample(), 30);
        let alphas: Vec<u8> = out.pixels.chunks_exact(4).map(|px| px[3]).collect();
        assert_eq!(alphas, vec![255, 200, 0]);
    }

    #[test]
    fn test_brightness_out_of_range_is_clamped() {
        let a = adjust_brightness(sample(), 500);
        let b = adjust_brightness(sample(), 100);
        assert_eq!(a, b);
    }

    // ===== Contrast Tests =====

    #[test]
    fn test_contrast_factor_at_max() {
        // 259 * 355 / (255 * 159) ≈ 2.27
        assert!((contrast_factor(100) - 2.2677).abs() < 1e-3);
    }

    #[test]
    fn test_contrast_max_crushes_dark_channel() {
        let out = adjust_contrast(Bitmap::filled(4, 4, [64, 64, 64, 255]), 100);
        // 2.27 * (64 - 128) + 128 ≈ -17.3, clamped to 0
        assert!(out.pixels.chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
    }

    #[test]
    fn test_contrast_midpoint_is_fixed() {
        let out = adjust_contrast(Bitmap::filled(1, 1, [128, 128, 128, 255]), 73);
        assert_eq!(out.pixel(0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_contrast_negative_pulls_toward_midpoint() {
        let out = adjust_contrast(Bitmap::filled(1, 1, [0, 255, 128, 255]), -50);
        let px = out.pixel(0, 0);
        assert!(px[0] > 0);
        assert!(px[1] < 255);
        assert_eq!(px[2], 128);
    }

    // ===== Saturation Tests =====

    #[test]
    fn test_saturation_zero_desaturates() {
        let out = adjust_saturation(sample(), 0);
        for px in out.pixels.chunks_exact(4) {
            let hsl = rgb_to_hsl(
                px[0] as f32 / 255.0,
                px[1] as f32 / 255.0,
                px[2] as f32 / 255.0,
            );
            assert_eq!(hsl.s, 0.0);
        }
    }

    #[test]
    fn test_saturation_zero_keeps_lightness() {
        // Pure red has L = 0.5, so gray is 128 (127.5 rounded).
        let out = adjust_saturation(Bitmap::filled(1, 1, [255, 0, 0, 255]), 0);
        assert_eq!(out.pixel(0, 0), [128, 128, 128, 255]);
    }

    #[test]
    fn test_saturation_leaves_gray_alone() {
        let gray = Bitmap::filled(2, 2, [90, 90, 90, 255]);
        assert_eq!(adjust_saturation(gray.clone(), 200), gray);
        assert_eq!(adjust_saturation(gray.clone(), 0), gray);
    }

    #[test]
    fn test_saturation_boost_spreads_channels() {
        let out = adjust_saturation(Bitmap::filled(1, 1, [150, 100, 100, 255]), 200);
        let px = out.pixel(0, 0);
        assert!(px[0] > 150);
        assert!(px[1] < 100);
    }
}
