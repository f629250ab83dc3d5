pub mod bounds;
pub mod dispatcher;
pub mod gestures;
pub mod types;

pub use types::{PointerEvent, PointerEventKind, PointerId, PointerPhase, PointerSource};

pub mod prelude {
    pub use super::bounds::{BoundsSource, SharedBounds};
    pub use super::dispatcher::{
        GlobalPointerListeners, HostError, PointerListenerHost, PointerListenerRegistration,
    };
    pub use super::gestures::{DragConstraints, DragPhase, DragSession, MoveOutcome, TrackGeometry};
    pub use super::types::{
        PointerEvent, PointerEventKind, PointerId, PointerPhase, PointerSource,
    };
}
