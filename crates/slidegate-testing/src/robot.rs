//! Robot-style driver for slide-to-verify widgets.
//!
//! The robot plays the part of the host page: it owns the window-level
//! listener registry, the track layout and a cursor, and turns high-level
//! gestures (press the handle, drag to a point, resize the track) into the
//! pointer event sequence a browser would deliver.
//!
//! # Example
//!
//! ```
//! use slidegate_testing::CaptchaRobot;
//! use slidegate_ui::{DragPhase, Rect};
//!
//! let mut robot = CaptchaRobot::new(Rect::new(0.0, 0.0, 300.0, 40.0));
//! robot.drag_handle_to(299.0);
//!
//! assert_eq!(robot.captcha().phase(), DragPhase::Success);
//! assert_eq!(robot.completions(), 1);
//! ```

use slidegate_foundation::{
    GlobalPointerListeners, PointerEvent, PointerEventKind, PointerSource, SharedBounds,
};
use slidegate_ui::{SliderCaptcha, SliderCaptchaSpec, SpecError};
use slidegate_ui_graphics::{Point, Rect};
use std::cell::Cell;
use std::rc::Rc;

/// Number of intermediate moves emitted by [`CaptchaRobot::drag_handle_to`].
pub const DRAG_STEPS: u32 = 10;

pub struct CaptchaRobot {
    listeners: GlobalPointerListeners,
    bounds: SharedBounds,
    captcha: SliderCaptcha,
    completions: Rc<Cell<u32>>,
    cursor: Point,
    source: PointerSource,
}

impl CaptchaRobot {
    /// Mounts a default widget on a track laid out at `track`.
    pub fn new(track: Rect) -> Self {
        let listeners = GlobalPointerListeners::new();
        let bounds = SharedBounds::new(track);
        let completions = Rc::new(Cell::new(0));
        let captcha = SliderCaptcha::new(
            Rc::new(listeners.clone()),
            Rc::new(bounds.clone()),
            counter(&completions),
        );
        Self::assemble(listeners, bounds, captcha, completions)
    }

    pub fn with_spec(track: Rect, spec: SliderCaptchaSpec) -> Result<Self, SpecError> {
        let listeners = GlobalPointerListeners::new();
        let bounds = SharedBounds::new(track);
        let completions = Rc::new(Cell::new(0));
        let captcha = SliderCaptcha::with_spec(
            spec,
            Rc::new(listeners.clone()),
            Rc::new(bounds.clone()),
            counter(&completions),
        )?;
        Ok(Self::assemble(listeners, bounds, captcha, completions))
    }

    fn assemble(
        listeners: GlobalPointerListeners,
        bounds: SharedBounds,
        captcha: SliderCaptcha,
        completions: Rc<Cell<u32>>,
    ) -> Self {
        Self {
            listeners,
            bounds,
            captcha,
            completions,
            cursor: Point::ZERO,
            source: PointerSource::Mouse,
        }
    }

    /// Emit touch events instead of mouse events from now on.
    pub fn use_touch(&mut self) {
        self.source = PointerSource::Touch;
    }

    pub fn captcha(&self) -> &SliderCaptcha {
        &self.captcha
    }

    pub fn listeners(&self) -> &GlobalPointerListeners {
        &self.listeners
    }

    /// How many times the completion callback has run.
    pub fn completions(&self) -> u32 {
        self.completions.get()
    }

    pub fn cursor(&self) -> Point {
        self.cursor
    }

    pub fn track(&self) -> Option<Rect> {
        self.bounds.get()
    }

    /// Simulates a reflow that changes the track width.
    pub fn resize_track(&mut self, width: f32) {
        self.bounds.set_width(width);
    }

    pub fn relayout_track(&mut self, track: Rect) {
        self.bounds.set(track);
    }

    pub fn detach_track(&mut self) {
        self.bounds.detach();
    }

    /// Viewport X that puts the handle at `offset` on the current track.
    pub fn pointer_x_for_offset(&self, offset: f32) -> Option<f32> {
        let track = self.bounds.get()?;
        let grab = self.captcha.spec().constraints().grab_offset();
        Some(track.x + grab + offset)
    }

    /// Presses at `(x, y)`. The widget only sees the press if it hits the handle.
    ///
    /// Returns true if the press started a drag.
    pub fn press_at(&mut self, x: f32, y: f32) -> bool {
        self.cursor = Point::new(x, y);
        if !self.captcha.hit_test(self.cursor) {
            return false;
        }
        let event = self.event(PointerEventKind::Down);
        self.captcha.pointer_down(&event)
    }

    /// Presses the centre of the handle.
    pub fn press_handle(&mut self) -> bool {
        match self.captcha.handle_rect() {
            Some(handle) => {
                let center = handle.center();
                self.press_at(center.x, center.y)
            }
            None => false,
        }
    }

    /// Moves the cursor and delivers a window-level move.
    ///
    /// Returns true if a listener consumed the event.
    pub fn move_to(&mut self, x: f32, y: f32) -> bool {
        self.cursor = Point::new(x, y);
        let event = self.event(PointerEventKind::Move);
        self.listeners.dispatch(&event);
        event.is_consumed()
    }

    pub fn release(&mut self) {
        let event = self.event(PointerEventKind::Up);
        self.listeners.dispatch(&event);
    }

    pub fn cancel(&mut self) {
        let event = self.event(PointerEventKind::Cancel);
        self.listeners.dispatch(&event);
    }

    /// Presses the handle, slides horizontally to `x` in [`DRAG_STEPS`]
    /// moves and releases.
    pub fn drag_handle_to(&mut self, x: f32) {
        let pressed = self.press_handle();
        let from = self.cursor;
        if pressed {
            for i in 1..=DRAG_STEPS {
                let t = i as f32 / DRAG_STEPS as f32;
                self.move_to(from.x + (x - from.x) * t, from.y);
            }
        }
        self.release();
    }

    /// Drags until the handle sits at `offset` on the current track.
    pub fn drag_handle_to_offset(&mut self, offset: f32) {
        if let Some(x) = self.pointer_x_for_offset(offset) {
            self.drag_handle_to(x);
        }
    }

    fn event(&self, kind: PointerEventKind) -> PointerEvent {
        PointerEvent::new(kind, self.cursor, self.cursor).with_source(self.source)
    }
}

fn counter(count: &Rc<Cell<u32>>) -> impl FnOnce() + 'static {
    let count = Rc::clone(count);
    move || count.set(count.get() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidegate_ui::DragPhase;

    fn track() -> Rect {
        Rect::new(50.0, 100.0, 300.0, 40.0)
    }

    #[test]
    fn press_outside_handle_is_ignored() {
        let mut robot = CaptchaRobot::new(track());
        assert!(!robot.press_at(200.0, 120.0));
        assert!(robot.listeners().is_empty());
    }

    #[test]
    fn press_handle_starts_drag() {
        let mut robot = CaptchaRobot::new(track());
        assert!(robot.press_handle());
        assert_eq!(robot.captcha().phase(), DragPhase::Dragging);
        assert_eq!(robot.cursor(), Point::new(70.0, 120.0));
    }

    #[test]
    fn pointer_x_for_offset_accounts_for_grab_point() {
        let robot = CaptchaRobot::new(track());
        assert_eq!(robot.pointer_x_for_offset(100.0), Some(170.0));
    }

    #[test]
    fn detached_track_cannot_be_pressed() {
        let mut robot = CaptchaRobot::new(track());
        robot.detach_track();
        assert!(!robot.press_handle());
        assert_eq!(robot.pointer_x_for_offset(0.0), None);
    }
}
