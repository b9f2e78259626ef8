//! Edit session bindings.
//!
//! `JsEditSession` owns the base bitmap on the WASM side so the page only
//! ships pointer events and control values across the boundary and pulls
//! rendered pixels back.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsEditSession();
//!
//! const ticket = session.begin_load();
//! const bytes = new Uint8Array(await (await fetch(url)).arrayBuffer());
//! if (!session.complete_load(ticket, bytes, 'image/png')) {
//!   return; // a newer image was requested meanwhile
//! }
//!
//! session.set_display_size(canvas.clientWidth, canvas.clientHeight);
//! const out = session.render();
//! ```

use crate::adjustments::EnhancementValues;
use crate::types::JsBitmap;
use retouch_core::decode::SourceImage;
use retouch_core::encode::ExportFormat;
use retouch_core::selection::Point;
use retouch_core::session::{EditSession, LoadOutcome, LoadTicket};
use retouch_core::transform::RotationDirection;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Ticket for one image load. Only the most recent ticket can install an image.
#[wasm_bindgen]
pub struct JsLoadTicket {
    inner: LoadTicket,
}

#[wasm_bindgen]
impl JsLoadTicket {
    #[wasm_bindgen(getter)]
    pub fn generation(&self) -> f64 {
        self.inner.generation() as f64
    }
}

#[wasm_bindgen]
pub struct JsEditSession {
    inner: EditSession,
}

#[wasm_bindgen]
impl JsEditSession {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self {
            inner: EditSession::new(),
        }
    }

    /// Start a load, invalidating any earlier ticket.
    pub fn begin_load(&mut self) -> JsLoadTicket {
        JsLoadTicket {
            inner: self.inner.begin_load(),
        }
    }

    /// Decode, upscale and install the bytes if `ticket` is still current.
    ///
    /// Returns `false` (and logs to the console) when the ticket was superseded.
    pub fn complete_load(
        &mut self,
        ticket: &JsLoadTicket,
        bytes: &[u8],
        mime_type: &str,
    ) -> Result<bool, JsValue> {
        let source = SourceImage::new(bytes.to_vec(), mime_type);
        match self.inner.complete_load(ticket.inner, &source) {
            Ok(LoadOutcome::Loaded { .. }) => Ok(true),
            Ok(LoadOutcome::Superseded) => {
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "retouch: discarded superseded load #{}",
                    ticket.inner.generation()
                )));
                Ok(false)
            }
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Load immediately, superseding anything in flight.
    pub fn load(&mut self, bytes: &[u8], mime_type: &str) -> Result<(), JsValue> {
        let source = SourceImage::new(bytes.to_vec(), mime_type);
        self.inner
            .load(&source)
            .map(|_| ())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(getter)]
    pub fn has_image(&self) -> bool {
        self.inner.base().is_some()
    }

    /// Width of the base bitmap, 0 before the first load.
    #[wasm_bindgen(getter)]
    pub fn base_width(&self) -> u32 {
        self.inner.base().map_or(0, |b| b.width)
    }

    #[wasm_bindgen(getter)]
    pub fn base_height(&self) -> u32 {
        self.inner.base().map_or(0, |b| b.height)
    }

    pub fn values(&self) -> EnhancementValues {
        EnhancementValues::from_inner(self.inner.values())
    }

    pub fn set_values(&mut self, values: &EnhancementValues) {
        self.inner.set_values(*values.inner());
    }

    /// Restore default values; committed crop and quarter turns stay.
    pub fn reset(&mut self) {
        self.inner.reset();
    }

    pub fn rotate_90(&mut self, clockwise: bool) -> Result<(), JsValue> {
        self.inner
            .rotate_90(RotationDirection::from(clockwise))
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn activate_crop(&mut self) {
        self.inner.activate_crop();
    }

    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.inner.set_display_size(width, height);
    }

    pub fn pointer_down(&mut self, x: f64, y: f64) {
        self.inner.pointer_down(Point::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        self.inner.pointer_move(Point::new(x, y));
    }

    pub fn pointer_up(&mut self) {
        self.inner.pointer_up();
    }

    /// Commit the selection. Returns the native rect `{x, y, w, h}`, or
    /// `null` when the selection is missing or smaller than 4x4 pixels.
    pub fn confirm_crop(&mut self) -> Result<JsValue, JsValue> {
        let rect = self
            .inner
            .confirm_crop()
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        to_js(&rect)
    }

    pub fn cancel_crop(&mut self) {
        self.inner.cancel_crop();
    }

    /// `{isActive, rect, isDragging}` with `rect` in native pixels.
    pub fn selection_state(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.selection_state())
    }

    /// Selection rect in display coordinates for drawing, or `null`.
    pub fn selection_overlay(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.selection_overlay())
    }

    pub fn render(&self) -> Result<JsBitmap, JsValue> {
        self.inner
            .render()
            .map(JsBitmap::from_bitmap)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Render with the frozen selection applied as a pending crop.
    pub fn render_crop_preview(&self) -> Result<JsBitmap, JsValue> {
        self.inner
            .render_crop_preview()
            .map(JsBitmap::from_bitmap)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn export_png(&self) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export(ExportFormat::Png)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    pub fn export_jpeg(&self, quality: u8) -> Result<Vec<u8>, JsValue> {
        self.inner
            .export(ExportFormat::Jpeg { quality })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

/// Serialize with `None` as `null` rather than `undefined`.
fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let serializer = serde_wasm_bindgen::Serializer::new().serialize_missing_as_null(true);
    value
        .serialize(&serializer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

impl Default for JsEditSession {
    fn default() -> Self {
        Self::new()
    }
}
