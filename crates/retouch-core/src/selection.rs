//! Crop selection: display-to-native coordinate mapping and the drag state machine.
//!
//! Pointer positions arrive in display space (the rendered canvas). The
//! selection rect is kept in the native pixel space of the base bitmap so it
//! can be handed straight to [`apply_crop`](crate::transform::apply_crop).
//!
//! # States
//!
//! ```text
//! Inert --activate--> Active(None) --down--> Dragging --up--> Active(Some(rect))
//!   ^                                                              |
//!   +----------------------- confirm / cancel ---------------------+
//! ```
//!
//! Transitions are pure functions on [`SelectionPhase`]; the
//! [`CropSelectionMapper`] only pairs the phase with the current
//! [`CoordinateTransform`].

use serde::{Deserialize, Serialize};

use crate::transform::CropRect;

/// Smallest width or height, in native pixels, that `confirm` accepts.
pub const MIN_SELECTION_SIZE: f64 = 4.0;

/// A position in display or native space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Scale factors between the displayed canvas and the native bitmap.
///
/// Recomputed once per size change and shared by every conversion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateTransform {
    pub native_width: f64,
    pub native_height: f64,
    pub display_width: f64,
    pub display_height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl CoordinateTransform {
    /// A zero (or invalid) display dimension is treated as 1.
    pub fn new(
        native_width: u32,
        native_height: u32,
        display_width: f64,
        display_height: f64,
    ) -> Self {
        let native_width = native_width as f64;
        let native_height = native_height as f64;
        let display_width = guard_extent(display_width);
        let display_height = guard_extent(display_height);
        Self {
            native_width,
            native_height,
            display_width,
            display_height,
            scale_x: native_width / display_width,
            scale_y: native_height / display_height,
        }
    }

    /// Saturate a point at the edges of the display area.
    pub fn clamp_to_display(&self, p: Point) -> Point {
        Point::new(
            clamp_coord(p.x, self.display_width),
            clamp_coord(p.y, self.display_height),
        )
    }

    pub fn to_native(&self, p: Point) -> Point {
        let p = self.clamp_to_display(p);
        Point::new(
            (p.x * self.scale_x).min(self.native_width),
            (p.y * self.scale_y).min(self.native_height),
        )
    }

    pub fn to_display(&self, p: Point) -> Point {
        Point::new(unscale(p.x, self.scale_x), unscale(p.y, self.scale_y))
    }

    /// Native rect spanned by two display points, in either order.
    ///
    /// The result always satisfies `x + width <= native_width` (and likewise
    /// vertically) exactly, despite rounding in the scale.
    pub fn span_to_native(&self, a: Point, b: Point) -> CropRect {
        let a = self.to_native(a);
        let b = self.to_native(b);
        let (x, width) = fit_span(a.x.min(b.x), a.x.max(b.x), self.native_width);
        let (y, height) = fit_span(a.y.min(b.y), a.y.max(b.y), self.native_height);
        CropRect::new(x, y, width, height)
    }

    /// Back-convert a native rect for drawing on the display.
    pub fn rect_to_display(&self, rect: &CropRect) -> CropRect {
        CropRect::new(
            unscale(rect.x, self.scale_x),
            unscale(rect.y, self.scale_y),
            unscale(rect.width, self.scale_x),
            unscale(rect.height, self.scale_y),
        )
    }
}

impl Default for CoordinateTransform {
    fn default() -> Self {
        Self::new(1, 1, 1.0, 1.0)
    }
}

fn guard_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

// An empty native bitmap has zero scale.
fn unscale(value: f64, scale: f64) -> f64 {
    if scale > 0.0 {
        value / scale
    } else {
        0.0
    }
}

// Start and length of `start..end` such that `start + len` never exceeds `limit`.
fn fit_span(start: f64, end: f64, limit: f64) -> (f64, f64) {
    let start = start.clamp(0.0, limit);
    let mut len = (end.min(limit) - start).max(0.0);
    while len > 0.0 && start + len > limit {
        len = f64::from_bits(len.to_bits() - 1);
    }
    (start, len)
}

fn clamp_coord(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Phase of the crop selection state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SelectionPhase {
    Inert,
    Active { rect: Option<CropRect> },
    Dragging { anchor: Point, rect: CropRect },
}

impl SelectionPhase {
    /// Enter (or re-enter) selection mode with no rect.
    pub fn activate(self) -> Self {
        SelectionPhase::Active { rect: None }
    }

    /// Start a drag at `at` (display space). Ignored while inert.
    ///
    /// A press during a drag restarts it from the new anchor.
    pub fn press(self, at: Point, transform: &CoordinateTransform) -> Self {
        match self {
            SelectionPhase::Inert => self,
            SelectionPhase::Active { .. } | SelectionPhase::Dragging { .. } => {
                let anchor = transform.clamp_to_display(at);
                SelectionPhase::Dragging {
                    anchor,
                    rect: transform.span_to_native(anchor, anchor),
                }
            }
        }
    }

    /// Grow or shrink the rect toward `to` (display space).
    pub fn drag(self, to: Point, transform: &CoordinateTransform) -> Self {
        match self {
            SelectionPhase::Dragging { anchor, .. } => SelectionPhase::Dragging {
                anchor,
                rect: transform.span_to_native(anchor, to),
            },
            other => other,
        }
    }

    /// Freeze the rect at the end of a drag.
    pub fn release(self) -> Self {
        match self {
            SelectionPhase::Dragging { rect, .. } => SelectionPhase::Active { rect: Some(rect) },
            other => other,
        }
    }

    /// Accept the current rect if it is large enough.
    ///
    /// On rejection the phase is returned unchanged alongside `None`.
    pub fn confirm(self) -> (Self, Option<CropRect>) {
        let rect = match self {
            SelectionPhase::Active { rect: Some(rect) } => rect,
            SelectionPhase::Dragging { rect, .. } => rect,
            _ => return (self, None),
        };

        if rect.width < MIN_SELECTION_SIZE || rect.height < MIN_SELECTION_SIZE {
            return (self, None);
        }
        (SelectionPhase::Inert, Some(rect))
    }

    pub fn cancel(self) -> Self {
        SelectionPhase::Inert
    }

    pub fn rect(&self) -> Option<CropRect> {
        match *self {
            SelectionPhase::Inert => None,
            SelectionPhase::Active { rect } => rect,
            SelectionPhase::Dragging { rect, .. } => Some(rect),
        }
    }
}

/// Snapshot of the selection for the UI.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSelectionState {
    pub is_active: bool,
    pub rect: Option<CropRect>,
    pub is_dragging: bool,
}

/// Drives [`SelectionPhase`] from pointer events against a native bitmap size
/// and a display size.
#[derive(Debug, Clone)]
pub struct CropSelectionMapper {
    phase: SelectionPhase,
    native_width: u32,
    native_height: u32,
    /// `None` until the caller reports a canvas size; the native size is used meanwhile.
    display: Option<(f64, f64)>,
    transform: CoordinateTransform,
}

impl CropSelectionMapper {
    /// Start inert, with the display the same size as the bitmap.
    pub fn new(native_width: u32, native_height: u32) -> Self {
        let mut mapper = Self {
            phase: SelectionPhase::Inert,
            native_width,
            native_height,
            display: None,
            transform: CoordinateTransform::default(),
        };
        mapper.recompute();
        mapper
    }

    pub fn set_display_size(&mut self, width: f64, height: f64) {
        self.display = Some((width, height));
        self.recompute();
    }

    pub fn set_native_size(&mut self, width: u32, height: u32) {
        self.native_width = width;
        self.native_height = height;
        self.recompute();
    }

    fn recompute(&mut self) {
        let (dw, dh) = self
            .display
            .unwrap_or((self.native_width as f64, self.native_height as f64));
        self.transform = CoordinateTransform::new(self.native_width, self.native_height, dw, dh);
    }

    pub fn transform(&self) -> &CoordinateTransform {
        &self.transform
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn activate(&mut self) {
        self.phase = self.phase.activate();
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.phase = self.phase.press(at, &self.transform);
    }

    pub fn pointer_move(&mut self, to: Point) {
        self.phase = self.phase.drag(to, &self.transform);
    }

    pub fn pointer_up(&mut self) {
        self.phase = self.phase.release();
    }

    /// Returns the accepted native rect, or `None` with the state untouched.
    pub fn confirm(&mut self) -> Option<CropRect> {
        let (phase, rect) = self.phase.confirm();
        self.phase = phase;
        rect
    }

    pub fn cancel(&mut self) {
        self.phase = self.phase.cancel();
    }

    pub fn state(&self) -> CropSelectionState {
        CropSelectionState {
            is_active: !matches!(self.phase, SelectionPhase::Inert),
            rect: self.phase.rect(),
            is_dragging: matches!(self.phase, SelectionPhase::Dragging { .. }),
        }
    }

    /// Current rect converted to display space.
    pub fn display_rect(&self) -> Option<CropRect> {
        self.phase.rect().map(|r| self.transform.rect_to_display(&r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapper_200_on_100() -> CropSelectionMapper {
        let mut m = CropSelectionMapper::new(200, 200);
        m.set_display_size(100.0, 100.0);
        m
    }

    #[test]
    fn test_reverse_drag_scenario() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(10.0, 10.0));
        m.pointer_move(Point::new(2.0, 2.0));
        m.pointer_up();

        let rect = m.confirm().expect("rect should be accepted");
        assert_eq!(rect, CropRect::new(4.0, 4.0, 16.0, 16.0));
        assert_eq!(m.state(), CropSelectionState::default());
    }

    #[test]
    fn test_initial_state_is_inert() {
        let m = CropSelectionMapper::new(50, 50);
        let state = m.state();
        assert!(!state.is_active);
        assert!(!state.is_dragging);
        assert!(state.rect.is_none());
    }

    #[test]
    fn test_activate_clears_rect() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(0.0, 0.0));
        m.pointer_move(Point::new(50.0, 50.0));
        m.pointer_up();
        assert!(m.state().rect.is_some());

        m.activate();
        let state = m.state();
        assert!(state.is_active);
        assert!(state.rect.is_none());
    }

    #[test]
    fn test_down_sets_zero_rect_at_anchor() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(30.0, 40.0));
        let state = m.state();
        assert!(state.is_dragging);
        assert_eq!(state.rect, Some(CropRect::new(60.0, 80.0, 0.0, 0.0)));
    }

    #[test]
    fn test_pointer_ignored_while_inert() {
        let mut m = mapper_200_on_100();
        m.pointer_down(Point::new(10.0, 10.0));
        m.pointer_move(Point::new(40.0, 40.0));
        m.pointer_up();
        assert_eq!(m.phase(), SelectionPhase::Inert);
        assert!(m.confirm().is_none());
    }

    #[test]
    fn test_confirm_rejects_small_rect_and_keeps_state() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(10.0, 10.0));
        // 1.5 display px = 3 native px wide
        m.pointer_move(Point::new(11.5, 30.0));
        m.pointer_up();

        let before = m.state();
        assert!(m.confirm().is_none());
        assert_eq!(m.state(), before);
        assert!(m.state().is_active);
    }

    #[test]
    fn test_confirm_without_rect() {
        let mut m = mapper_200_on_100();
        m.activate();
        assert!(m.confirm().is_none());
        assert!(m.state().is_active);
    }

    #[test]
    fn test_confirm_during_drag_accepts_current_rect() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(0.0, 0.0));
        m.pointer_move(Point::new(10.0, 5.0));
        assert_eq!(m.confirm(), Some(CropRect::new(0.0, 0.0, 20.0, 10.0)));
        assert_eq!(m.phase(), SelectionPhase::Inert);
    }

    #[test]
    fn test_cancel_always_resets() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(5.0, 5.0));
        m.cancel();
        assert_eq!(m.state(), CropSelectionState::default());
    }

    #[test]
    fn test_drag_outside_display_saturates() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(50.0, 50.0));
        m.pointer_move(Point::new(500.0, -30.0));
        m.pointer_up();
        let rect = m.state().rect.expect("rect");
        assert_eq!(rect, CropRect::new(100.0, 0.0, 100.0, 100.0));
        assert!(rect.x + rect.width <= 200.0);
    }

    #[test]
    fn test_zero_display_size_treated_as_one() {
        let t = CoordinateTransform::new(300, 200, 0.0, 0.0);
        assert_eq!(t.scale_x, 300.0);
        assert_eq!(t.scale_y, 200.0);
        assert_eq!(t.to_native(Point::new(1.0, 1.0)), Point::new(300.0, 200.0));
    }

    #[test]
    fn test_display_rect_back_conversion() {
        let mut m = mapper_200_on_100();
        m.activate();
        m.pointer_down(Point::new(10.0, 20.0));
        m.pointer_move(Point::new(30.0, 60.0));
        assert_eq!(m.display_rect(), Some(CropRect::new(10.0, 20.0, 20.0, 40.0)));
    }

    #[test]
    fn test_display_defaults_to_native_size() {
        let mut m = CropSelectionMapper::new(0, 0);
        m.set_native_size(40, 30);
        assert_eq!(m.transform().scale_x, 1.0);
        assert_eq!(m.transform().scale_y, 1.0);
    }

    #[test]
    fn test_full_drag_stays_inside_native_bounds() {
        // Non-terminating ratios such as 25/11 round the far edge past the bitmap.
        for display in [3.0, 7.0, 9.0, 11.0, 13.0, 49.0, 97.0] {
            for native in 1..200u32 {
                let mut m = CropSelectionMapper::new(native, native);
                m.set_display_size(display, display);
                m.activate();
                m.pointer_down(Point::new(0.0, 0.0));
                m.pointer_move(Point::new(1e9, 1e9));
                m.pointer_up();

                let limit = native as f64;
                let rect = m.state().rect.expect("rect after drag");
                assert!(rect.x + rect.width <= limit, "{native} on {display}: {rect:?}");
                assert!(rect.y + rect.height <= limit, "{native} on {display}: {rect:?}");
                if let Some(confirmed) = m.confirm() {
                    assert!(confirmed.x + confirmed.width <= limit);
                    assert!(confirmed.y + confirmed.height <= limit);
                }
            }
        }
    }

    #[test]
    fn test_native_size_change_rescales() {
        let mut m = mapper_200_on_100();
        m.set_native_size(400, 100);
        assert_eq!(m.transform().scale_x, 4.0);
        assert_eq!(m.transform().scale_y, 1.0);
    }
}
