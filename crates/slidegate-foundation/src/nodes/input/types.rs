use slidegate_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerPhase {
    Start,
    Move,
    End,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

impl PointerEventKind {
    /// True for the kinds that terminate a gesture.
    pub fn ends_gesture(self) -> bool {
        matches!(self, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

/// Which native input produced the event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PointerSource {
    #[default]
    Mouse,
    Touch,
}

/// Pointer event with consumption tracking.
///
/// A widget that handles an event marks it consumed so the platform adapter
/// can suppress the native default action (for touch input, page scrolling).
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub phase: PointerPhase,
    pub source: PointerSource,
    /// Position relative to the surface the adapter reports from.
    pub position: Point,
    /// Viewport position (`clientX`/`clientY` on the web).
    pub global_position: Point,
    /// Shared via Rc<Cell> so consumption is visible across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, global_position: Point) -> Self {
        Self {
            id: 0,
            kind,
            phase: match kind {
                PointerEventKind::Down => PointerPhase::Start,
                PointerEventKind::Move => PointerPhase::Move,
                PointerEventKind::Up => PointerPhase::End,
                PointerEventKind::Cancel => PointerPhase::Cancel,
            },
            source: PointerSource::Mouse,
            position,
            global_position,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    /// Convenience for viewport-level events where local and global coincide.
    pub fn at(kind: PointerEventKind, x: f32, y: f32) -> Self {
        let point = Point::new(x, y);
        Self::new(kind, point, point)
    }

    pub fn with_source(mut self, source: PointerSource) -> Self {
        self.source = source;
        self
    }

    pub fn consume(&self) {
        self.consumed.set(true);
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_follows_kind() {
        assert_eq!(
            PointerEvent::at(PointerEventKind::Down, 0.0, 0.0).phase,
            PointerPhase::Start
        );
        assert_eq!(
            PointerEvent::at(PointerEventKind::Cancel, 0.0, 0.0).phase,
            PointerPhase::Cancel
        );
    }

    #[test]
    fn consumption_is_shared_between_clones() {
        let event = PointerEvent::at(PointerEventKind::Move, 10.0, 5.0)
            .with_source(PointerSource::Touch);
        let copy = event.clone();
        assert!(!event.is_consumed());
        copy.consume();
        assert!(event.is_consumed());
        assert_eq!(event.source, PointerSource::Touch);
    }

    #[test]
    fn up_and_cancel_end_gestures() {
        assert!(PointerEventKind::Up.ends_gesture());
        assert!(PointerEventKind::Cancel.ends_gesture());
        assert!(!PointerEventKind::Move.ends_gesture());
        assert!(!PointerEventKind::Down.ends_gesture());
    }
}
