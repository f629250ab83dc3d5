//! Slide-to-verify widget.
//!
//! The user proves manual interaction by dragging a handle from the left edge
//! of a track to within a few pixels of the right edge. The widget owns one
//! [`DragSession`] and wires it to the host:
//!
//! - A press on the handle starts a drag and subscribes to window-level
//!   move/end events. The subscription lives only while dragging; releasing,
//!   verifying and disposing all drop it.
//! - Every move re-reads the track bounds, so a reflow mid-drag changes the
//!   reachable offset without a new press.
//! - Crossing the threshold latches success and fires the completion callback.
//!   The callback is `FnOnce`; there is no way to re-arm a verified widget.

mod spec;
mod visuals;

pub use spec::{SliderCaptchaSpec, SpecError};
pub use visuals::{HandleIcon, SliderCaptchaVisuals};

use slidegate_foundation::{
    BoundsSource, DragConstraints, DragPhase, DragSession, MoveOutcome, PointerEvent,
    PointerEventKind, PointerHandler, PointerListenerHost, PointerListenerRegistration,
    TrackGeometry,
};
use slidegate_ui_graphics::{Point, Rect};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

type SuccessCallback = Box<dyn FnOnce()>;

pub struct SliderCaptcha {
    inner: Rc<RefCell<CaptchaInner>>,
}

struct CaptchaInner {
    spec: SliderCaptchaSpec,
    constraints: DragConstraints,
    session: DragSession,
    host: Rc<dyn PointerListenerHost>,
    bounds: Rc<dyn BoundsSource>,
    on_success: Option<SuccessCallback>,
    registration: Option<PointerListenerRegistration>,
}

impl SliderCaptcha {
    /// Creates a widget with the default handle geometry.
    pub fn new(
        host: Rc<dyn PointerListenerHost>,
        bounds: Rc<dyn BoundsSource>,
        on_success: impl FnOnce() + 'static,
    ) -> Self {
        Self::build(
            SliderCaptchaSpec::default(),
            host,
            bounds,
            Box::new(on_success),
        )
    }

    pub fn with_spec(
        spec: SliderCaptchaSpec,
        host: Rc<dyn PointerListenerHost>,
        bounds: Rc<dyn BoundsSource>,
        on_success: impl FnOnce() + 'static,
    ) -> Result<Self, SpecError> {
        spec.validate()?;
        Ok(Self::build(spec, host, bounds, Box::new(on_success)))
    }

    fn build(
        spec: SliderCaptchaSpec,
        host: Rc<dyn PointerListenerHost>,
        bounds: Rc<dyn BoundsSource>,
        on_success: SuccessCallback,
    ) -> Self {
        let constraints = spec.constraints();
        Self {
            inner: Rc::new(RefCell::new(CaptchaInner {
                spec,
                constraints,
                session: DragSession::new(),
                host,
                bounds,
                on_success: Some(on_success),
                registration: None,
            })),
        }
    }

    /// Press on the handle. The host routes only presses that hit
    /// [`handle_rect`](Self::handle_rect) here.
    ///
    /// Returns `true` if this press started a drag.
    pub fn pointer_down(&self, event: &PointerEvent) -> bool {
        if event.kind != PointerEventKind::Down {
            return false;
        }

        let host = {
            let mut inner = self.inner.borrow_mut();
            if !inner.session.start() {
                log::debug!(
                    "slider captcha ignored press in {:?} phase",
                    inner.session.phase()
                );
                return false;
            }
            Rc::clone(&inner.host)
        };

        match host.register(self.window_listener()) {
            Ok(registration) => {
                self.inner.borrow_mut().registration = Some(registration);
                event.consume();
                log::debug!("slider captcha drag started ({:?})", event.source);
                true
            }
            Err(err) => {
                self.inner.borrow_mut().session.end();
                log::error!("slider captcha could not track the drag: {err}");
                false
            }
        }
    }

    /// Tears the widget down: drops the window subscription and abandons any
    /// drag in progress. A verified widget stays verified.
    pub fn dispose(&self) {
        let registration = {
            let mut inner = self.inner.borrow_mut();
            inner.session.end();
            inner.registration.take()
        };
        if let Some(registration) = registration {
            log::debug!("slider captcha disposed mid-drag");
            registration.cancel();
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.inner.borrow().session.phase()
    }

    pub fn offset(&self) -> f32 {
        self.inner.borrow().session.offset()
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().session.is_dragging()
    }

    pub fn is_success(&self) -> bool {
        self.inner.borrow().session.is_success()
    }

    /// True while the widget holds a window-level subscription.
    pub fn is_listening(&self) -> bool {
        self.inner.borrow().registration.is_some()
    }

    pub fn spec(&self) -> SliderCaptchaSpec {
        self.inner.borrow().spec.clone()
    }

    pub fn visuals(&self) -> SliderCaptchaVisuals {
        let inner = self.inner.borrow();
        SliderCaptchaVisuals::resolve(&inner.session, &inner.spec)
    }

    /// Current handle rectangle, or `None` while the track is not laid out.
    pub fn handle_rect(&self) -> Option<Rect> {
        let inner = self.inner.borrow();
        let track = inner.bounds.current_bounds()?;
        let visuals = SliderCaptchaVisuals::resolve(&inner.session, &inner.spec);
        Some(visuals.handle_rect(track, &inner.spec))
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.handle_rect()
            .is_some_and(|rect| rect.contains(point.x, point.y))
    }

    fn window_listener(&self) -> PointerHandler {
        let widget = Rc::downgrade(&self.inner);
        Rc::new(RefCell::new(move |event: &PointerEvent| {
            let Some(inner) = widget.upgrade() else {
                return;
            };
            // Released before the callback runs so it may query the widget.
            let completed = inner.borrow_mut().on_window_event(event);
            if let Some(on_success) = completed {
                on_success();
            }
        }))
    }
}

impl CaptchaInner {
    fn on_window_event(&mut self, event: &PointerEvent) -> Option<SuccessCallback> {
        match event.kind {
            PointerEventKind::Move => self.track_pointer(event),
            kind if kind.ends_gesture() => {
                self.release();
                None
            }
            _ => None,
        }
    }

    fn track_pointer(&mut self, event: &PointerEvent) -> Option<SuccessCallback> {
        let Some(track) = self.bounds.current_bounds() else {
            log::trace!("slider track not laid out, move ignored");
            return None;
        };
        let geometry = TrackGeometry::from_rect(track);

        match self
            .session
            .update(event.global_position.x, geometry, &self.constraints)
        {
            MoveOutcome::Ignored => None,
            MoveOutcome::Moved { offset } => {
                event.consume();
                log::trace!(
                    "slider offset {offset:.1} of {:.1}",
                    geometry.max_offset(&self.constraints)
                );
                None
            }
            MoveOutcome::Completed { offset } => {
                event.consume();
                self.registration = None;
                log::info!("slider captcha verified at offset {offset:.1}");
                self.on_success.take()
            }
        }
    }

    fn release(&mut self) {
        if self.session.end() {
            log::debug!("slider captcha released short of threshold, reset to idle");
        }
        self.registration = None;
    }
}

impl fmt::Debug for SliderCaptcha {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SliderCaptcha")
            .field("phase", &inner.session.phase())
            .field("offset", &inner.session.offset())
            .field("listening", &inner.registration.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slidegate_foundation::{GlobalPointerListeners, HostError, SharedBounds};
    use std::cell::Cell;

    struct Fixture {
        listeners: GlobalPointerListeners,
        bounds: SharedBounds,
        fired: Rc<Cell<u32>>,
        captcha: SliderCaptcha,
    }

    fn fixture() -> Fixture {
        let listeners = GlobalPointerListeners::new();
        let bounds = SharedBounds::new(Rect::new(0.0, 0.0, 300.0, 40.0));
        let fired = Rc::new(Cell::new(0));
        let captcha = {
            let fired = Rc::clone(&fired);
            SliderCaptcha::new(
                Rc::new(listeners.clone()),
                Rc::new(bounds.clone()),
                move || fired.set(fired.get() + 1),
            )
        };
        Fixture {
            listeners,
            bounds,
            fired,
            captcha,
        }
    }

    fn down() -> PointerEvent {
        PointerEvent::at(PointerEventKind::Down, 20.0, 20.0)
    }

    fn move_to(x: f32) -> PointerEvent {
        PointerEvent::at(PointerEventKind::Move, x, 20.0)
    }

    fn up() -> PointerEvent {
        PointerEvent::at(PointerEventKind::Up, 0.0, 0.0)
    }

    #[test]
    fn listens_only_while_dragging() {
        let fx = fixture();
        assert_eq!(fx.listeners.listener_count(), 0);

        assert!(fx.captcha.pointer_down(&down()));
        assert_eq!(fx.listeners.listener_count(), 1);
        assert!(fx.captcha.is_listening());

        fx.listeners.dispatch(&up());
        assert_eq!(fx.listeners.listener_count(), 0);
        assert!(!fx.captcha.is_listening());
    }

    #[test]
    fn repeated_press_attaches_once() {
        let fx = fixture();
        assert!(fx.captcha.pointer_down(&down()));
        assert!(!fx.captcha.pointer_down(&down()));
        assert_eq!(fx.listeners.listener_count(), 1);
    }

    #[test]
    fn non_down_events_do_not_start_drag() {
        let fx = fixture();
        assert!(!fx.captcha.pointer_down(&move_to(20.0)));
        assert_eq!(fx.captcha.phase(), DragPhase::Idle);
    }

    #[test]
    fn verifies_once_and_detaches() {
        let fx = fixture();
        fx.captcha.pointer_down(&down());

        let crossing = move_to(278.0);
        fx.listeners.dispatch(&crossing);
        assert!(crossing.is_consumed());
        assert_eq!(fx.captcha.phase(), DragPhase::Success);
        assert_eq!(fx.captcha.offset(), 258.0);
        assert_eq!(fx.fired.get(), 1);
        assert!(fx.listeners.is_empty());

        // Nothing left to hear these.
        fx.listeners.dispatch(&move_to(290.0));
        fx.listeners.dispatch(&up());
        assert!(!fx.captcha.pointer_down(&down()));
        assert_eq!(fx.fired.get(), 1);
        assert_eq!(fx.captcha.offset(), 258.0);
    }

    #[test]
    fn short_release_resets() {
        let fx = fixture();
        fx.captcha.pointer_down(&down());
        fx.listeners.dispatch(&move_to(120.0));
        assert_eq!(fx.captcha.offset(), 100.0);

        fx.listeners.dispatch(&up());
        assert_eq!(fx.captcha.offset(), 0.0);
        assert_eq!(fx.captcha.phase(), DragPhase::Idle);
        assert_eq!(fx.fired.get(), 0);
    }

    #[test]
    fn cancel_behaves_like_release() {
        let fx = fixture();
        fx.captcha.pointer_down(&down());
        fx.listeners.dispatch(&move_to(200.0));
        fx.listeners
            .dispatch(&PointerEvent::at(PointerEventKind::Cancel, 0.0, 0.0));
        assert_eq!(fx.captcha.phase(), DragPhase::Idle);
        assert!(fx.listeners.is_empty());
    }

    #[test]
    fn detached_track_ignores_moves() {
        let fx = fixture();
        fx.captcha.pointer_down(&down());
        fx.bounds.detach();
        let event = move_to(278.0);
        fx.listeners.dispatch(&event);
        assert!(!event.is_consumed());
        assert_eq!(fx.captcha.phase(), DragPhase::Dragging);
        assert_eq!(fx.captcha.handle_rect(), None);
    }

    #[test]
    fn dispose_mid_drag_releases_listener() {
        let fx = fixture();
        fx.captcha.pointer_down(&down());
        fx.listeners.dispatch(&move_to(150.0));
        fx.captcha.dispose();
        assert!(fx.listeners.is_empty());
        assert_eq!(fx.captcha.phase(), DragPhase::Idle);
        assert_eq!(fx.captcha.offset(), 0.0);
    }

    #[test]
    fn dropping_widget_releases_listener() {
        let fx = fixture();
        fx.captcha.pointer_down(&down());
        let listeners = fx.listeners.clone();
        drop(fx);
        assert!(listeners.is_empty());
    }

    #[test]
    fn callback_may_query_widget() {
        let listeners = GlobalPointerListeners::new();
        let bounds = SharedBounds::new(Rect::new(0.0, 0.0, 300.0, 40.0));
        let slot: Rc<RefCell<Option<SliderCaptcha>>> = Rc::new(RefCell::new(None));
        let observed = Rc::new(Cell::new(None));

        let captcha = {
            let slot = Rc::clone(&slot);
            let observed = Rc::clone(&observed);
            SliderCaptcha::new(Rc::new(listeners.clone()), Rc::new(bounds), move || {
                let phase = slot.borrow().as_ref().map(SliderCaptcha::phase);
                observed.set(phase);
            })
        };
        captcha.pointer_down(&down());
        *slot.borrow_mut() = Some(captcha);

        listeners.dispatch(&move_to(299.0));
        assert_eq!(observed.get(), Some(DragPhase::Success));
    }

    struct RefusingHost;

    impl PointerListenerHost for RefusingHost {
        fn register(
            &self,
            _handler: PointerHandler,
        ) -> Result<PointerListenerRegistration, HostError> {
            Err(HostError::Detached)
        }
    }

    #[test]
    fn refused_subscription_rolls_back_to_idle() {
        let captcha = SliderCaptcha::new(
            Rc::new(RefusingHost),
            Rc::new(SharedBounds::new(Rect::new(0.0, 0.0, 300.0, 40.0))),
            || {},
        );
        assert!(!captcha.pointer_down(&down()));
        assert_eq!(captcha.phase(), DragPhase::Idle);
        assert!(!captcha.is_listening());
    }

    #[test]
    fn with_spec_rejects_invalid_spec() {
        let result = SliderCaptcha::with_spec(
            SliderCaptchaSpec::default().with_handle_width(0.0),
            Rc::new(GlobalPointerListeners::new()),
            Rc::new(SharedBounds::detached()),
            || {},
        );
        assert!(matches!(result, Err(SpecError::InvalidHandleWidth(_))));
    }

    #[test]
    fn hit_test_tracks_handle() {
        let fx = fixture();
        assert!(fx.captcha.hit_test(Point::new(20.0, 20.0)));
        assert!(!fx.captcha.hit_test(Point::new(150.0, 20.0)));

        fx.captcha.pointer_down(&down());
        fx.listeners.dispatch(&move_to(170.0));
        assert!(fx.captcha.hit_test(Point::new(170.0, 20.0)));
    }
}
