//! The value set behind the editing controls.
//!
//! `EnhancementValues` is immutable: every `with_*` call returns a new record,
//! and every field is clamped to its range on the way in. Deserialized records
//! go through the same clamping, so an out-of-range value can never reach the
//! pipeline.

use serde::{Deserialize, Serialize};

/// Inclusive ranges of each control.
pub mod ranges {
    use std::ops::RangeInclusive;

    pub const BRIGHTNESS: RangeInclusive<i32> = -100..=100;
    pub const CONTRAST: RangeInclusive<i32> = -100..=100;
    pub const SATURATION: RangeInclusive<i32> = 0..=200;
    pub const SHARPNESS: RangeInclusive<i32> = 0..=100;
    pub const NOISE_REDUCTION: RangeInclusive<i32> = 0..=100;
    pub const ROTATION: RangeInclusive<f64> = -45.0..=45.0;
}

/// Control values for one render of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "UncheckedValues", rename_all = "camelCase")]
pub struct EnhancementValues {
    brightness: i32,
    contrast: i32,
    saturation: i32,
    sharpness: i32,
    noise_reduction: i32,
    rotation: f64,
}

impl Default for EnhancementValues {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 0,
            saturation: 100,
            sharpness: 0,
            noise_reduction: 0,
            rotation: 0.0,
        }
    }
}

impl EnhancementValues {
    /// Create a value set with every control at its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    pub fn brightness(&self) -> i32 {
        self.brightness
    }

    pub fn contrast(&self) -> i32 {
        self.contrast
    }

    pub fn saturation(&self) -> i32 {
        self.saturation
    }

    pub fn sharpness(&self) -> i32 {
        self.sharpness
    }

    pub fn noise_reduction(&self) -> i32 {
        self.noise_reduction
    }

    /// Free rotation in degrees.
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn with_brightness(self, value: i32) -> Self {
        Self {
            brightness: clamp_int(value, ranges::BRIGHTNESS),
            ..self
        }
    }

    pub fn with_contrast(self, value: i32) -> Self {
        Self {
            contrast: clamp_int(value, ranges::CONTRAST),
            ..self
        }
    }

    pub fn with_saturation(self, value: i32) -> Self {
        Self {
            saturation: clamp_int(value, ranges::SATURATION),
            ..self
        }
    }

    pub fn with_sharpness(self, value: i32) -> Self {
        Self {
            sharpness: clamp_int(value, ranges::SHARPNESS),
            ..self
        }
    }

    pub fn with_noise_reduction(self, value: i32) -> Self {
        Self {
            noise_reduction: clamp_int(value, ranges::NOISE_REDUCTION),
            ..self
        }
    }

    /// Non-finite angles fall back to 0.
    pub fn with_rotation(self, degrees: f64) -> Self {
        let rotation = if degrees.is_finite() {
            degrees.clamp(*ranges::ROTATION.start(), *ranges::ROTATION.end())
        } else {
            0.0
        };
        Self { rotation, ..self }
    }
}

fn clamp_int(value: i32, range: std::ops::RangeInclusive<i32>) -> i32 {
    value.clamp(*range.start(), *range.end())
}

/// Wire shape accepted from callers before range checks.
#[derive(Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct UncheckedValues {
    brightness: i32,
    contrast: i32,
    saturation: i32,
    sharpness: i32,
    noise_reduction: i32,
    rotation: f64,
}

impl Default for UncheckedValues {
    fn default() -> Self {
        let d = EnhancementValues::default();
        Self {
            brightness: d.brightness,
            contrast: d.contrast,
            saturation: d.saturation,
            sharpness: d.sharpness,
            noise_reduction: d.noise_reduction,
            rotation: d.rotation,
        }
    }
}

impl From<UncheckedValues> for EnhancementValues {
    fn from(raw: UncheckedValues) -> Self {
        EnhancementValues::new()
            .with_brightness(raw.brightness)
            .with_contrast(raw.contrast)
            .with_saturation(raw.saturation)
            .with_sharpness(raw.sharpness)
            .with_noise_reduction(raw.noise_reduction)
            .with_rotation(raw.rotation)
    }
}
