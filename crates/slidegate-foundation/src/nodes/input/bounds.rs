//! Live layout bounds for widgets that track pointer motion.
//!
//! Bounds are read on every event instead of being cached when a gesture
//! starts, so a reflow in the middle of a drag is picked up immediately.

use slidegate_ui_graphics::Rect;
use std::cell::Cell;
use std::rc::Rc;

/// Supplies the current on-screen rectangle of an element.
pub trait BoundsSource {
    /// Returns `None` while the element is not laid out (e.g. detached).
    fn current_bounds(&self) -> Option<Rect>;
}

/// Host-updated bounds shared between the layout pass and a widget.
#[derive(Clone, Debug, Default)]
pub struct SharedBounds {
    rect: Rc<Cell<Option<Rect>>>,
}

impl SharedBounds {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect: Rc::new(Cell::new(Some(rect))),
        }
    }

    pub fn detached() -> Self {
        Self::default()
    }

    pub fn set(&self, rect: Rect) {
        self.rect.set(Some(rect));
    }

    pub fn set_width(&self, width: f32) {
        if let Some(rect) = self.rect.get() {
            self.rect.set(Some(rect.with_width(width)));
        }
    }

    pub fn detach(&self) {
        self.rect.set(None);
    }

    pub fn get(&self) -> Option<Rect> {
        self.rect.get()
    }
}

impl BoundsSource for SharedBounds {
    fn current_bounds(&self) -> Option<Rect> {
        self.rect.get()
    }
}
