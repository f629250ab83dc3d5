use super::spec::SliderCaptchaSpec;
use slidegate_foundation::{DragPhase, DragSession};
use slidegate_ui_graphics::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandleIcon {
    Chevron,
    Check,
}

/// Everything a renderer needs to paint the slider for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct SliderCaptchaVisuals {
    pub phase: DragPhase,
    /// Horizontal translation of the handle from its resting position.
    pub handle_offset: f32,
    /// Width of the progress fill, which ends at the handle's right edge.
    pub fill_width: f32,
    pub hint_visible: bool,
    pub handle_icon: HandleIcon,
    pub handle_highlighted: bool,
    pub verified_badge_visible: bool,
    /// Text overlay for the current phase, if any.
    pub label: Option<String>,
}

impl SliderCaptchaVisuals {
    pub fn resolve(session: &DragSession, spec: &SliderCaptchaSpec) -> Self {
        let phase = session.phase();
        let handle_offset = session.offset();
        let label = match phase {
            DragPhase::Idle => Some(spec.hint_label.clone()),
            DragPhase::Dragging => None,
            DragPhase::Success => Some(spec.verified_label.clone()),
        };
        Self {
            phase,
            handle_offset,
            fill_width: handle_offset + spec.handle_width - spec.handle_inset,
            hint_visible: phase == DragPhase::Idle,
            handle_icon: if phase == DragPhase::Success {
                HandleIcon::Check
            } else {
                HandleIcon::Chevron
            },
            handle_highlighted: phase == DragPhase::Dragging,
            verified_badge_visible: phase == DragPhase::Success,
            label,
        }
    }

    /// Painted handle rectangle inside `track`, also used for hit testing.
    pub fn handle_rect(&self, track: Rect, spec: &SliderCaptchaSpec) -> Rect {
        let inset = spec.handle_inset;
        Rect {
            x: track.x + inset + self.handle_offset,
            y: track.y + inset,
            width: spec.handle_width - inset * 2.0,
            height: (track.height - inset * 2.0).max(0.0),
        }
    }
}
