//! Enhancement value and filter WASM bindings.
//!
//! This module exposes the control value record to TypeScript along with one
//! free function per tonal or detail filter and the full compositing pipeline.

use crate::types::JsBitmap;
use retouch_core::transform::CropRect;
use wasm_bindgen::prelude::*;

/// Enhancement values wrapper for JavaScript.
///
/// Setters clamp to each control's range, so the record is never invalid.
#[wasm_bindgen]
pub struct EnhancementValues {
    inner: retouch_core::EnhancementValues,
}

#[wasm_bindgen]
impl EnhancementValues {
    /// Create new enhancement values with default values
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: retouch_core::EnhancementValues::new(),
        }
    }

    #[wasm_bindgen(getter)]
    pub fn brightness(&self) -> i32 {
        self.inner.brightness()
    }

    /// Set brightness (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_brightness(&mut self, value: i32) {
        self.inner = self.inner.with_brightness(value);
    }

    #[wasm_bindgen(getter)]
    pub fn contrast(&self) -> i32 {
        self.inner.contrast()
    }

    /// Set contrast (-100 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_contrast(&mut self, value: i32) {
        self.inner = self.inner.with_contrast(value);
    }

    #[wasm_bindgen(getter)]
    pub fn saturation(&self) -> i32 {
        self.inner.saturation()
    }

    /// Set saturation (0 to 200, 100 is neutral)
    #[wasm_bindgen(setter)]
    pub fn set_saturation(&mut self, value: i32) {
        self.inner = self.inner.with_saturation(value);
    }

    #[wasm_bindgen(getter)]
    pub fn sharpness(&self) -> i32 {
        self.inner.sharpness()
    }

    /// Set sharpness (0 to 100)
    #[wasm_bindgen(setter)]
    pub fn set_sharpness(&mut self, value: i32) {
        self.inner = self.inner.with_sharpness(value);
    }

    #[wasm_bindgen(getter = noiseReduction)]
    pub fn noise_reduction(&self) -> i32 {
        self.inner.noise_reduction()
    }

    /// Set noise reduction (0 to 100)
    #[wasm_bindgen(setter = noiseReduction)]
    pub fn set_noise_reduction(&mut self, value: i32) {
        self.inner = self.inner.with_noise_reduction(value);
    }

    #[wasm_bindgen(getter)]
    pub fn rotation(&self) -> f64 {
        self.inner.rotation()
    }

    /// Set free rotation in degrees (-45 to 45, positive = clockwise)
    #[wasm_bindgen(setter)]
    pub fn set_rotation(&mut self, value: f64) {
        self.inner = self.inner.with_rotation(value);
    }

    /// Check if all values are at their defaults
    pub fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    /// Serialize to a plain `{brightness, contrast, ...}` object
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner).map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Deserialize from a plain object. Missing fields take defaults and
    /// out-of-range fields are clamped.
    pub fn from_json(value: JsValue) -> Result<EnhancementValues, JsValue> {
        let inner: retouch_core::EnhancementValues =
            serde_wasm_bindgen::from_value(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self { inner })
    }
}

impl Default for EnhancementValues {
    fn default() -> Self {
        Self::new()
    }
}

impl EnhancementValues {
    pub(crate) fn inner(&self) -> &retouch_core::EnhancementValues {
        &self.inner
    }

    pub(crate) fn from_inner(inner: retouch_core::EnhancementValues) -> Self {
        Self { inner }
    }
}

/// Run the full pipeline over `image` without a pending crop.
///
/// # Example (TypeScript)
/// ```typescript
/// const values = new EnhancementValues();
/// values.brightness = 20;
/// values.sharpness = 40;
///
/// const output = apply_adjustments(base, values);
/// ctx.putImageData(new ImageData(output.image_data(), output.width), 0, 0);
/// ```
#[wasm_bindgen]
pub fn apply_adjustments(image: &JsBitmap, values: &EnhancementValues) -> JsBitmap {
    let base = image.to_bitmap();
    JsBitmap::from_bitmap(retouch_core::apply_adjustments(&base, values.inner(), None))
}

/// Run the full pipeline with an uncommitted crop rect in native pixels.
#[wasm_bindgen]
pub fn apply_adjustments_with_crop(
    image: &JsBitmap,
    values: &EnhancementValues,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
) -> JsBitmap {
    let base = image.to_bitmap();
    let rect = CropRect::new(x, y, width, height);
    JsBitmap::from_bitmap(retouch_core::apply_adjustments(&base, values.inner(), Some(&rect)))
}

/// Brightness (-100 to 100).
#[wasm_bindgen]
pub fn adjust_brightness(image: &JsBitmap, value: i32) -> JsBitmap {
    JsBitmap::from_bitmap(retouch_core::adjust_brightness(image.to_bitmap(), value))
}

/// Contrast (-100 to 100).
#[wasm_bindgen]
pub fn adjust_contrast(image: &JsBitmap, value: i32) -> JsBitmap {
    JsBitmap::from_bitmap(retouch_core::adjust_contrast(image.to_bitmap(), value))
}

/// Saturation (0 to 200).
#[wasm_bindgen]
pub fn adjust_saturation(image: &JsBitmap, value: i32) -> JsBitmap {
    JsBitmap::from_bitmap(retouch_core::adjust_saturation(image.to_bitmap(), value))
}

/// Sharpen (0 to 100).
#[wasm_bindgen]
pub fn sharpen(image: &JsBitmap, intensity: i32) -> JsBitmap {
    JsBitmap::from_bitmap(retouch_core::sharpen(image.to_bitmap(), intensity))
}

/// Noise reduction (0 to 100).
#[wasm_bindgen]
pub fn reduce_noise(image: &JsBitmap, intensity: i32) -> JsBitmap {
    JsBitmap::from_bitmap(retouch_core::reduce_noise(image.to_bitmap(), intensity))
}
