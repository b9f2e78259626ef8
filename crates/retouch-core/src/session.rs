//! The edit session: owner of the base bitmap.
//!
//! The session holds exactly one base bitmap, the current
//! [`EnhancementValues`] and the crop selection. Only two operations replace
//! the base: [`EditSession::rotate_90`] and a successful
//! [`EditSession::confirm_crop`]. Everything else is recomputed from the base
//! by [`apply_adjustments`] on each render.
//!
//! Loads are ticketed. [`EditSession::begin_load`] hands out a ticket and
//! invalidates every earlier one; a result delivered with a stale ticket is
//! discarded so a slow decode can never overwrite a newer image.

use thiserror::Error;
use tracing::{info, warn};

use crate::decode::{Bitmap, DecodeError, SourceImage};
use crate::encode::{export, EncodeError, ExportFormat};
use crate::pipeline::apply_adjustments;
use crate::selection::{CropSelectionMapper, CropSelectionState, Point};
use crate::transform::{apply_crop, rotate_90, CropRect, RotationDirection};
use crate::upscale::decode_and_upscale;
use crate::values::EnhancementValues;

/// Errors surfaced by session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation needed a base bitmap before one was loaded.
    #[error("No image loaded")]
    NoImage,

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Encode(#[from] EncodeError),
}

/// Generation token for one load request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Result of delivering a load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The base bitmap was replaced.
    Loaded { width: u32, height: u32 },
    /// A newer load was started; nothing changed.
    Superseded,
}

#[derive(Debug, Clone)]
pub struct EditSession {
    base: Option<Bitmap>,
    values: EnhancementValues,
    selection: CropSelectionMapper,
    generation: u64,
}

impl Default for EditSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditSession {
    pub fn new() -> Self {
        Self {
            base: None,
            values: EnhancementValues::default(),
            selection: CropSelectionMapper::new(0, 0),
            generation: 0,
        }
    }

    /// Start a load, superseding any in flight.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.generation = self.generation.wrapping_add(1);
        LoadTicket(self.generation)
    }

    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        ticket.0 == self.generation
    }

    /// Decode, upscale and install `source` if `ticket` is still current.
    ///
    /// A successful load resets the values to defaults and cancels any crop
    /// selection. On a decode error the session is left as it was.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        source: &SourceImage,
    ) -> Result<LoadOutcome, SessionError> {
        if !self.is_current(ticket) {
            warn!(
                ticket = ticket.0,
                current = self.generation,
                "discarding superseded load"
            );
            return Ok(LoadOutcome::Superseded);
        }

        let bitmap = decode_and_upscale(source)?;
        let (width, height) = (bitmap.width, bitmap.height);
        self.replace_base(bitmap);
        self.values = EnhancementValues::default();
        self.selection.cancel();

        info!(width, height, mime = %source.mime_type, "loaded base bitmap");
        Ok(LoadOutcome::Loaded { width, height })
    }

    /// Load `source`, superseding anything in flight.
    pub fn load(&mut self, source: &SourceImage) -> Result<LoadOutcome, SessionError> {
        let ticket = self.begin_load();
        self.complete_load(ticket, source)
    }

    pub fn base(&self) -> Option<&Bitmap> {
        self.base.as_ref()
    }

    pub fn values(&self) -> EnhancementValues {
        self.values
    }

    /// Replace the value record wholesale.
    pub fn set_values(&mut self, values: EnhancementValues) {
        self.values = values;
    }

    /// Restore default values. Committed geometry is kept.
    pub fn reset(&mut self) {
        self.values = EnhancementValues::default();
    }

    /// Commit a quarter turn into the base bitmap.
    ///
    /// Any crop selection is cancelled since its coordinates no longer apply.
    pub fn rotate_90(&mut self, direction: RotationDirection) -> Result<(), SessionError> {
        let base = self.base.as_ref().ok_or(SessionError::NoImage)?;
        let rotated = rotate_90(base, direction);
        info!(
            ?direction,
            width = rotated.width,
            height = rotated.height,
            "committed quarter turn"
        );
        self.replace_base(rotated);
        self.selection.cancel();
        Ok(())
    }

    pub fn activate_crop(&mut self) {
        self.selection.activate();
    }

    /// Size of the canvas the base is drawn on.
    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.selection.set_display_size(width, height);
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.selection.pointer_down(at);
    }

    pub fn pointer_move(&mut self, to: Point) {
        self.selection.pointer_move(to);
    }

    pub fn pointer_up(&mut self) {
        self.selection.pointer_up();
    }

    /// Confirm the selection and commit it into the base.
    ///
    /// Returns `Ok(None)` when the selection is missing or too small; the
    /// selection state is then unchanged.
    pub fn confirm_crop(&mut self) -> Result<Option<CropRect>, SessionError> {
        let base = self.base.as_ref().ok_or(SessionError::NoImage)?;
        let Some(rect) = self.selection.confirm() else {
            return Ok(None);
        };

        let cropped = apply_crop(base, &rect);
        info!(
            x = rect.x,
            y = rect.y,
            width = cropped.width,
            height = cropped.height,
            "committed crop"
        );
        self.replace_base(cropped);
        Ok(Some(rect))
    }

    pub fn cancel_crop(&mut self) {
        self.selection.cancel();
    }

    pub fn selection_state(&self) -> CropSelectionState {
        self.selection.state()
    }

    /// Selection rect in display coordinates, for drawing.
    pub fn selection_overlay(&self) -> Option<CropRect> {
        self.selection.display_rect()
    }

    /// Compositor output for the current values, without any pending crop.
    pub fn render(&self) -> Result<Bitmap, SessionError> {
        let base = self.base.as_ref().ok_or(SessionError::NoImage)?;
        Ok(apply_adjustments(base, &self.values, None))
    }

    /// Compositor output with the frozen selection as the pending crop.
    ///
    /// Falls back to [`render`](Self::render) while dragging or with no rect.
    pub fn render_crop_preview(&self) -> Result<Bitmap, SessionError> {
        let base = self.base.as_ref().ok_or(SessionError::NoImage)?;
        let state = self.selection.state();
        let pending = if state.is_dragging { None } else { state.rect };
        Ok(apply_adjustments(base, &self.values, pending.as_ref()))
    }

    /// Render and encode the current output.
    pub fn export(&self, format: ExportFormat) -> Result<Vec<u8>, SessionError> {
        let output = self.render()?;
        Ok(export(&output, format)?)
    }

    fn replace_base(&mut self, bitmap: Bitmap) {
        self.selection.set_native_size(bitmap.width, bitmap.height);
        self.base = Some(bitmap);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::encode_png;

    fn png_source(width: u32, height: u32) -> SourceImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.extend_from_slice(&[(x * 20) as u8, (y * 20) as u8, 128, 255]);
            }
        }
        let bytes = encode_png(&Bitmap::new(width, height, pixels)).unwrap();
        SourceImage::new(bytes, "image/png")
    }

    fn loaded(width: u32, height: u32) -> EditSession {
        let mut session = EditSession::new();
        session.load(&png_source(width, height)).unwrap();
        session
    }

    #[test]
    fn test_load_upscales_base() {
        let session = loaded(5, 3);
        let base = session.base().unwrap();
        assert_eq!((base.width, base.height), (10, 6));
    }

    #[test]
    fn test_operations_need_image() {
        let mut session = EditSession::new();
        assert!(matches!(session.render(), Err(SessionError::NoImage)));
        assert!(matches!(
            session.rotate_90(RotationDirection::Clockwise),
            Err(SessionError::NoImage)
        ));
        assert!(matches!(session.confirm_crop(), Err(SessionError::NoImage)));
        assert!(matches!(
            session.export(ExportFormat::Png),
            Err(SessionError::NoImage)
        ));
    }

    #[test]
    fn test_stale_ticket_is_discarded() {
        let mut session = EditSession::new();
        let first = session.begin_load();
        let second = session.begin_load();

        let outcome = session.complete_load(first, &png_source(4, 4)).unwrap();
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert!(session.base().is_none());

        let outcome = session.complete_load(second, &png_source(3, 2)).unwrap();
        assert_eq!(outcome, LoadOutcome::Loaded { width: 6, height: 4 });
    }

    #[test]
    fn test_stale_result_cannot_overwrite_newer_base() {
        let mut session = EditSession::new();
        let old = session.begin_load();
        session.load(&png_source(3, 3)).unwrap();

        let outcome = session.complete_load(old, &png_source(8, 8)).unwrap();
        assert_eq!(outcome, LoadOutcome::Superseded);
        assert_eq!(session.base().unwrap().width, 6);
    }

    #[test]
    fn test_decode_error_keeps_state() {
        let mut session = loaded(4, 4);
        session.set_values(EnhancementValues::new().with_brightness(30));

        let bad = SourceImage::new(vec![1, 2, 3, 4], "image/png");
        assert!(matches!(session.load(&bad), Err(SessionError::Decode(_))));
        assert_eq!(session.base().unwrap().width, 8);
        assert_eq!(session.values().brightness(), 30);
    }

    #[test]
    fn test_load_resets_values_and_selection() {
        let mut session = loaded(4, 4);
        session.set_values(EnhancementValues::new().with_contrast(50));
        session.activate_crop();

        session.load(&png_source(2, 2)).unwrap();
        assert!(session.values().is_default());
        assert!(!session.selection_state().is_active);
    }

    #[test]
    fn test_reset_keeps_committed_geometry() {
        let mut session = loaded(4, 2);
        session.rotate_90(RotationDirection::Clockwise).unwrap();
        session.set_values(EnhancementValues::new().with_saturation(0));

        session.reset();
        assert!(session.values().is_default());
        let base = session.base().unwrap();
        assert_eq!((base.width, base.height), (4, 8));
    }

    #[test]
    fn test_rotate_commits_into_base() {
        let mut session = loaded(3, 2);
        let before = session.base().unwrap().clone();
        session.rotate_90(RotationDirection::CounterClockwise).unwrap();
        assert_eq!(
            session.base().unwrap(),
            &rotate_90(&before, RotationDirection::CounterClockwise)
        );
    }

    #[test]
    fn test_confirm_crop_commits() {
        let mut session = loaded(100, 100);
        session.set_display_size(100.0, 100.0);
        session.activate_crop();
        session.pointer_down(Point::new(10.0, 10.0));
        session.pointer_move(Point::new(2.0, 2.0));
        session.pointer_up();

        let rect = session.confirm_crop().unwrap();
        assert_eq!(rect, Some(CropRect::new(4.0, 4.0, 16.0, 16.0)));
        let base = session.base().unwrap();
        assert_eq!((base.width, base.height), (16, 16));
        assert!(!session.selection_state().is_active);
    }

    #[test]
    fn test_small_crop_rejected_without_commit() {
        let mut session = loaded(10, 10);
        session.activate_crop();
        session.pointer_down(Point::new(1.0, 1.0));
        session.pointer_move(Point::new(3.0, 12.0));
        session.pointer_up();

        assert_eq!(session.confirm_crop().unwrap(), None);
        assert_eq!(session.base().unwrap().width, 20);
        assert!(session.selection_state().is_active);
    }

    #[test]
    fn test_crop_preview_uses_frozen_selection() {
        let mut session = loaded(10, 10);
        session.activate_crop();
        session.pointer_down(Point::new(2.0, 2.0));
        session.pointer_move(Point::new(12.0, 8.0));

        // Still dragging: no pending crop
        assert_eq!(session.render_crop_preview().unwrap().width, 20);

        session.pointer_up();
        let preview = session.render_crop_preview().unwrap();
        assert_eq!((preview.width, preview.height), (10, 6));
        // Base untouched
        assert_eq!(session.base().unwrap().width, 20);
    }

    #[test]
    fn test_export_png_decodes_back() {
        let session = loaded(3, 3);
        let bytes = session.export(ExportFormat::Png).unwrap();
        let decoded = crate::decode::decode_image(&SourceImage::new(bytes, "image/png")).unwrap();
        assert_eq!((decoded.width, decoded.height), (6, 6));
    }
}
