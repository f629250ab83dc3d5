//! Browser adapter for Slidegate.
//!
//! - DOM mouse/touch events become [`PointerEvent`]s in CSS pixels.
//! - [`WindowListenerHost`] backs the widget's drag subscription with real
//!   `window` listeners that are added on register and removed when the
//!   registration is dropped. Touch listeners are registered non-passive so
//!   a consumed move can cancel page scrolling, and `blur` ends the drag.
//! - [`ElementBounds`] reads `getBoundingClientRect()` on every call.

use slidegate_foundation::{
    BoundsSource, HostError, PointerEvent, PointerEventKind, PointerHandler, PointerListenerHost,
    PointerListenerRegistration, PointerSource,
};
use slidegate_ui_graphics::{Point, Rect};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    AddEventListenerOptions, Element, Event, EventTarget, MouseEvent, TouchEvent, Window,
};

const MOUSE_EVENTS: [(&str, PointerEventKind); 2] = [
    ("mousemove", PointerEventKind::Move),
    ("mouseup", PointerEventKind::Up),
];

const TOUCH_EVENTS: [(&str, PointerEventKind); 3] = [
    ("touchmove", PointerEventKind::Move),
    ("touchend", PointerEventKind::Up),
    ("touchcancel", PointerEventKind::Cancel),
];

/// Losing window focus mid-drag ends the gesture; no `mouseup` will follow.
const FOCUS_EVENTS: [(&str, PointerEventKind); 1] = [("blur", PointerEventKind::Cancel)];

/// How a window listener is added.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ListenerMode {
    /// Browser defaults. Window-level touch listeners default to passive.
    Default,
    /// `{ passive: false }`, required for `preventDefault()` to take effect.
    NonPassive,
}

const MOUSE_MODE: ListenerMode = ListenerMode::Default;
const TOUCH_MODE: ListenerMode = ListenerMode::NonPassive;
const FOCUS_MODE: ListenerMode = ListenerMode::Default;

/// Builds a viewport-level event. `clientX`/`clientY` are already CSS pixels
/// (logical coordinates), so no scale factor is applied.
pub fn pointer_event(kind: PointerEventKind, source: PointerSource, x: f64, y: f64) -> PointerEvent {
    let logical = Point {
        x: x as f32,
        y: y as f32,
    };
    PointerEvent::new(kind, logical, logical).with_source(source)
}

pub fn mouse_pointer_event(kind: PointerEventKind, event: &MouseEvent) -> PointerEvent {
    pointer_event(
        kind,
        PointerSource::Mouse,
        event.client_x() as f64,
        event.client_y() as f64,
    )
}

pub fn touch_pointer_event(kind: PointerEventKind, event: &TouchEvent) -> PointerEvent {
    let active = event
        .touches()
        .get(0)
        .map(|touch| (touch.client_x(), touch.client_y()));
    let changed = event
        .changed_touches()
        .get(0)
        .map(|touch| (touch.client_x(), touch.client_y()));
    let position = touch_position(active, changed);
    pointer_event(
        kind,
        PointerSource::Touch,
        position.x as f64,
        position.y as f64,
    )
}

/// Focus events carry no coordinates; the release position is unused.
pub fn focus_lost_pointer_event(kind: PointerEventKind) -> PointerEvent {
    pointer_event(kind, PointerSource::Mouse, f64::NAN, f64::NAN)
}

/// `touchend` has no active touches left; the lifted finger is only in
/// `changedTouches`. With neither, the position is NaN and moves are ignored.
fn touch_position(active: Option<(i32, i32)>, changed: Option<(i32, i32)>) -> Point {
    match active.or(changed) {
        Some((x, y)) => Point::new(x as f32, y as f32),
        None => Point::new(f32::NAN, f32::NAN),
    }
}

/// Listener host backed by the browser `window`.
pub struct WindowListenerHost {
    target: EventTarget,
}

impl WindowListenerHost {
    pub fn new(window: &Window) -> Self {
        Self {
            target: window.clone().into(),
        }
    }

    /// Host for the global `window`, if there is one (not in workers).
    pub fn from_global() -> Option<Self> {
        web_sys::window().map(|window| Self::new(&window))
    }
}

impl PointerListenerHost for WindowListenerHost {
    fn register(&self, handler: PointerHandler) -> Result<PointerListenerRegistration, HostError> {
        let mut attached = AttachedListeners::new(self.target.clone());

        for (name, kind) in MOUSE_EVENTS {
            let handler = Rc::clone(&handler);
            let closure = Closure::<dyn FnMut(MouseEvent)>::new(move |event: MouseEvent| {
                deliver(&handler, &mouse_pointer_event(kind, &event));
            });
            attached.attach(name, closure, MOUSE_MODE)?;
        }

        for (name, kind) in TOUCH_EVENTS {
            let handler = Rc::clone(&handler);
            let closure = Closure::<dyn FnMut(TouchEvent)>::new(move |event: TouchEvent| {
                let pointer = touch_pointer_event(kind, &event);
                deliver(&handler, &pointer);
                // Keeps the page from scrolling under an active slide.
                if pointer.is_consumed() {
                    event.prevent_default();
                }
            });
            attached.attach(name, closure, TOUCH_MODE)?;
        }

        for (name, kind) in FOCUS_EVENTS {
            let handler = Rc::clone(&handler);
            let closure = Closure::<dyn FnMut(Event)>::new(move |_: Event| {
                deliver(&handler, &focus_lost_pointer_event(kind));
            });
            attached.attach(name, closure, FOCUS_MODE)?;
        }

        log::debug!("window pointer listeners attached");
        Ok(PointerListenerRegistration::new(move || drop(attached)))
    }
}

fn deliver(handler: &PointerHandler, event: &PointerEvent) {
    match handler.try_borrow_mut() {
        Ok(mut handler) => (&mut *handler)(event),
        Err(_) => log::warn!("pointer handler busy, dropped {:?} event", event.kind),
    };
}

/// Window listeners added for one registration. Dropping removes them all.
struct AttachedListeners {
    target: EventTarget,
    closures: Vec<(&'static str, Box<dyn AsRef<JsValue>>)>,
}

impl AttachedListeners {
    fn new(target: EventTarget) -> Self {
        Self {
            target,
            closures: Vec::with_capacity(
                MOUSE_EVENTS.len() + TOUCH_EVENTS.len() + FOCUS_EVENTS.len(),
            ),
        }
    }

    fn attach<C>(
        &mut self,
        event: &'static str,
        closure: C,
        mode: ListenerMode,
    ) -> Result<(), HostError>
    where
        C: AsRef<JsValue> + 'static,
    {
        let callback = closure.as_ref().unchecked_ref();
        let added = match mode {
            ListenerMode::Default => self.target.add_event_listener_with_callback(event, callback),
            ListenerMode::NonPassive => {
                let options = AddEventListenerOptions::new();
                options.set_passive(false);
                self.target
                    .add_event_listener_with_callback_and_add_event_listener_options(
                        event, callback, &options,
                    )
            }
        };
        added.map_err(|err| HostError::Rejected {
            event,
            reason: format!("{err:?}"),
        })?;
        let closure: Box<dyn AsRef<JsValue>> = Box::new(closure);
        self.closures.push((event, closure));
        Ok(())
    }
}

impl Drop for AttachedListeners {
    fn drop(&mut self) {
        for (event, closure) in self.closures.drain(..) {
            let callback = AsRef::<JsValue>::as_ref(&*closure).unchecked_ref();
            if let Err(err) = self
                .target
                .remove_event_listener_with_callback(event, callback)
            {
                log::warn!("failed to detach {event} listener: {err:?}");
            }
        }
        log::debug!("window pointer listeners detached");
    }
}

/// Track bounds read from a DOM element on every call.
pub struct ElementBounds {
    element: Element,
}

impl ElementBounds {
    pub fn new(element: Element) -> Self {
        Self { element }
    }

    pub fn element(&self) -> &Element {
        &self.element
    }
}

impl BoundsSource for ElementBounds {
    fn current_bounds(&self) -> Option<Rect> {
        if !self.element.is_connected() {
            return None;
        }
        let rect = self.element.get_bounding_client_rect();
        Some(Rect::new(
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
            rect.height() as f32,
        ))
    }
}
