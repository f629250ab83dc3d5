use slidegate_foundation::{
    GlobalPointerListeners, PointerEvent, PointerEventKind, PointerSource,
};
use slidegate_ui_graphics::Point;
use winit::dpi::PhysicalPosition;

pub struct DesktopWinitPlatform {
    scale_factor: f64,
}

impl DesktopWinitPlatform {
    pub fn new(scale_factor: f64) -> Self {
        Self { scale_factor }
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.scale_factor = factor;
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    pub fn pointer_position(&self, position: PhysicalPosition<f64>) -> Point {
        Point {
            x: (position.x / self.scale_factor) as f32,
            y: (position.y / self.scale_factor) as f32,
        }
    }

    pub fn pointer_event(
        &self,
        kind: PointerEventKind,
        position: PhysicalPosition<f64>,
    ) -> PointerEvent {
        let logical = self.pointer_position(position);
        PointerEvent::new(kind, logical, logical)
    }

    pub fn touch_event(
        &self,
        kind: PointerEventKind,
        position: PhysicalPosition<f64>,
    ) -> PointerEvent {
        self.pointer_event(kind, position)
            .with_source(PointerSource::Touch)
    }
}

impl Default for DesktopWinitPlatform {
    fn default() -> Self {
        Self::new(1.0)
    }
}

/// Feeds window-level cursor activity into a [`GlobalPointerListeners`].
///
/// Presses are hit-tested by the host and go straight to the widget; only the
/// moves and releases a drag subscribes to pass through here.
pub struct DesktopPointerRouter {
    platform: DesktopWinitPlatform,
    listeners: GlobalPointerListeners,
    cursor: PhysicalPosition<f64>,
}

impl DesktopPointerRouter {
    pub fn new(platform: DesktopWinitPlatform, listeners: GlobalPointerListeners) -> Self {
        Self {
            platform,
            listeners,
            cursor: PhysicalPosition::new(0.0, 0.0),
        }
    }

    pub fn listeners(&self) -> &GlobalPointerListeners {
        &self.listeners
    }

    pub fn set_scale_factor(&mut self, factor: f64) {
        self.platform.set_scale_factor(factor);
    }

    /// Logical cursor position.
    pub fn cursor(&self) -> Point {
        self.platform.pointer_position(self.cursor)
    }

    /// Builds the event a press at the current cursor would produce.
    pub fn press_event(&self) -> PointerEvent {
        self.platform
            .pointer_event(PointerEventKind::Down, self.cursor)
    }

    /// Returns true if a listener consumed the move.
    pub fn cursor_moved(&mut self, position: PhysicalPosition<f64>) -> bool {
        self.cursor = position;
        let event = self.platform.pointer_event(PointerEventKind::Move, position);
        self.listeners.dispatch(&event);
        event.is_consumed()
    }

    pub fn button_released(&mut self) {
        let event = self.platform.pointer_event(PointerEventKind::Up, self.cursor);
        self.listeners.dispatch(&event);
    }

    /// Focus loss or cursor grab loss ends any drag in progress.
    pub fn focus_lost(&mut self) {
        let event = self
            .platform
            .pointer_event(PointerEventKind::Cancel, self.cursor);
        self.listeners.dispatch(&event);
    }
}
