//! Slide-to-verify widget for Slidegate
//!
//! The host wires a [`SliderCaptcha`] to a [`PointerListenerHost`] (where
//! window-level move/end events come from) and a [`BoundsSource`] (where the
//! track currently sits), forwards presses on the handle to
//! [`SliderCaptcha::pointer_down`], and renders from
//! [`SliderCaptcha::visuals`]. The completion callback fires at most once.

mod verification_gate;
pub mod widgets;

pub use slidegate_foundation::{
    BoundsSource, DragConstraints, DragPhase, DragSession, GlobalPointerListeners, HostError,
    MoveOutcome, PointerEvent, PointerEventKind, PointerListenerHost, PointerListenerRegistration,
    PointerSource, SharedBounds, TrackGeometry,
};
pub use slidegate_ui_graphics::{Point, Rect, Size};
pub use verification_gate::{VerificationGate, VerificationRequired};
pub use widgets::*;

pub mod prelude {
    pub use crate::verification_gate::{VerificationGate, VerificationRequired};
    pub use crate::widgets::slider_captcha::{
        HandleIcon, SliderCaptcha, SliderCaptchaSpec, SliderCaptchaVisuals, SpecError,
    };
    pub use slidegate_foundation::prelude::*;
    pub use slidegate_ui_graphics::prelude::*;
}
