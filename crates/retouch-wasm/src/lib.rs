//! Retouch WASM - WebAssembly bindings for Retouch
//!
//! This crate provides WASM bindings to expose the retouch-core editing
//! pipeline to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `adjustments` - Enhancement values, per-filter functions and the full pipeline
//! - `types` - WASM-compatible wrapper types for image data
//! - `decode` - Decoding, 2x upscaling and resizing
//! - `encode` - PNG and JPEG export
//! - `transform` - Crop, quarter turns and free rotation
//! - `session` - Stateful edit session with crop selection and load tickets
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsEditSession, EnhancementValues } from '@retouch/wasm';
//!
//! await init();
//!
//! const session = new JsEditSession();
//! session.load(new Uint8Array(await blob.arrayBuffer()), blob.type);
//!
//! const values = new EnhancementValues();
//! values.contrast = 25;
//! session.set_values(values);
//! const output = session.render();
//! ```

use wasm_bindgen::prelude::*;

mod adjustments;
mod decode;
mod encode;
mod session;
mod transform;
mod types;

// Re-export public types
pub use adjustments::{
    adjust_brightness, adjust_contrast, adjust_saturation, apply_adjustments,
    apply_adjustments_with_crop, reduce_noise, sharpen, EnhancementValues,
};
pub use decode::{decode_and_upscale, decode_image, resize, upscale};
pub use encode::{export_jpeg, export_png};
pub use session::{JsEditSession, JsLoadTicket};
pub use transform::{apply_crop, apply_rotation, rotate_90, rotated_bounds};
pub use types::JsBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
