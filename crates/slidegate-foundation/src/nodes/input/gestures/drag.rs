//! Slide-to-verify drag recogniser.
//!
//! [`DragSession`] is the pure state machine behind the slider captcha. It owns
//! `{is_dragging, offset, is_success}` and nothing else: no listeners, no
//! callbacks, no cached geometry. Callers hand it a fresh [`TrackGeometry`]
//! with every move so a track that reflows mid-drag is handled without a new
//! gesture.
//!
//! ```text
//!            start                 move past threshold
//!   Idle ───────────▶ Dragging ─────────────────────────▶ Success
//!    ▲                   │  ▲                                (terminal)
//!    └──── end ──────────┘  └─ move
//! ```

use crate::gesture_constants::{SLIDER_HANDLE_WIDTH, SLIDER_SUCCESS_TOLERANCE};
use slidegate_ui_graphics::Rect;

/// Fixed handle dimensions that shape the offset computation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragConstraints {
    pub handle_width: f32,
    pub success_tolerance: f32,
}

impl Default for DragConstraints {
    fn default() -> Self {
        Self {
            handle_width: SLIDER_HANDLE_WIDTH,
            success_tolerance: SLIDER_SUCCESS_TOLERANCE,
        }
    }
}

impl DragConstraints {
    pub fn new(handle_width: f32, success_tolerance: f32) -> Self {
        Self {
            handle_width,
            success_tolerance,
        }
    }

    /// Horizontal distance from the handle's left edge to where the pointer holds it.
    pub fn grab_offset(&self) -> f32 {
        self.handle_width / 2.0
    }

    /// Finite positive handle and finite non-negative tolerance.
    pub fn is_valid(&self) -> bool {
        self.handle_width.is_finite()
            && self.handle_width > 0.0
            && self.success_tolerance.is_finite()
            && self.success_tolerance >= 0.0
    }
}

/// Horizontal extent of the track, measured fresh for each event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackGeometry {
    pub left: f32,
    pub width: f32,
}

impl TrackGeometry {
    pub fn new(left: f32, width: f32) -> Self {
        Self { left, width }
    }

    pub fn from_rect(rect: Rect) -> Self {
        Self {
            left: rect.x,
            width: rect.width,
        }
    }

    pub fn max_offset(&self, constraints: &DragConstraints) -> f32 {
        self.width - constraints.handle_width
    }

    pub fn success_threshold(&self, constraints: &DragConstraints) -> f32 {
        self.max_offset(constraints) - constraints.success_tolerance
    }

    /// Maps a viewport X coordinate to a handle offset in `[0, max_offset]`.
    ///
    /// Returns `None` for non-finite input, invalid constraints, and tracks
    /// too narrow to hold the handle plus the tolerance; on such a track even
    /// offset 0 would sit past the threshold.
    pub fn resolve_offset(&self, pointer_x: f32, constraints: &DragConstraints) -> Option<f32> {
        if !pointer_x.is_finite() || !self.is_measurable(constraints) {
            return None;
        }
        let max_offset = self.max_offset(constraints);
        if max_offset <= constraints.success_tolerance {
            return None;
        }
        let raw = pointer_x - self.left - constraints.grab_offset();
        Some(raw.clamp(0.0, max_offset))
    }

    /// Pulls an existing offset back inside `[0, max(max_offset, 0)]`.
    pub fn clamp_offset(&self, offset: f32, constraints: &DragConstraints) -> f32 {
        if !self.is_measurable(constraints) {
            return offset;
        }
        offset.clamp(0.0, self.max_offset(constraints).max(0.0))
    }

    fn is_measurable(&self, constraints: &DragConstraints) -> bool {
        self.left.is_finite() && self.width.is_finite() && constraints.is_valid()
    }

    pub fn is_complete(&self, offset: f32, constraints: &DragConstraints) -> bool {
        offset >= self.success_threshold(constraints)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DragPhase {
    Idle,
    Dragging,
    Success,
}

/// Result of feeding one move event into a [`DragSession`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MoveOutcome {
    /// Not dragging, already verified, or the event carried no usable geometry.
    Ignored,
    Moved { offset: f32 },
    /// The threshold was crossed by this event. Reported once per session.
    Completed { offset: f32 },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DragSession {
    is_dragging: bool,
    offset: f32,
    is_success: bool,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        if self.is_success {
            DragPhase::Success
        } else if self.is_dragging {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.is_dragging
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Gesture start. Returns `true` only on the `Idle → Dragging` edge.
    pub fn start(&mut self) -> bool {
        if self.is_success || self.is_dragging {
            return false;
        }
        self.is_dragging = true;
        true
    }

    pub fn update(
        &mut self,
        pointer_x: f32,
        geometry: TrackGeometry,
        constraints: &DragConstraints,
    ) -> MoveOutcome {
        if !self.is_dragging || self.is_success {
            return MoveOutcome::Ignored;
        }
        let Some(offset) = geometry.resolve_offset(pointer_x, constraints) else {
            // A track that shrank below the handle still bounds the offset.
            self.offset = geometry.clamp_offset(self.offset, constraints);
            return MoveOutcome::Ignored;
        };

        self.offset = offset;
        if geometry.is_complete(offset, constraints) {
            self.is_success = true;
            self.is_dragging = false;
            MoveOutcome::Completed { offset }
        } else {
            MoveOutcome::Moved { offset }
        }
    }

    /// Gesture end. A verified session is left untouched; anything else snaps
    /// back to `Idle`. Returns `true` if a drag was actually in progress.
    pub fn end(&mut self) -> bool {
        if self.is_success {
            return false;
        }
        let was_dragging = self.is_dragging;
        self.is_dragging = false;
        self.offset = 0.0;
        was_dragging
    }
}
