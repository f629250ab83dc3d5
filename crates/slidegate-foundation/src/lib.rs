//! Input foundation for Slidegate widgets.
//!
//! Platform adapters translate native mouse/touch input into [`PointerEvent`]s.
//! Widgets subscribe to window-level move/end streams through a
//! [`PointerListenerHost`] and read their current layout through a
//! [`BoundsSource`]. The pure drag state machine lives in
//! [`nodes::input::gestures::drag`].

pub mod gesture_constants;
pub mod nodes;

pub use nodes::input::bounds::{BoundsSource, SharedBounds};
pub use nodes::input::dispatcher::{
    GlobalPointerListeners, HostError, PointerHandler, PointerListenerHost,
    PointerListenerRegistration,
};
pub use nodes::input::gestures::{
    DragConstraints, DragPhase, DragSession, MoveOutcome, TrackGeometry,
};
pub use nodes::input::types::{
    PointerEvent, PointerEventKind, PointerId, PointerPhase, PointerSource,
};

pub mod prelude {
    pub use crate::nodes::input::prelude::*;
}
