pub mod drag;

pub use drag::{DragConstraints, DragPhase, DragSession, MoveOutcome, TrackGeometry};
