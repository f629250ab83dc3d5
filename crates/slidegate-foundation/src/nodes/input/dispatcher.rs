//! Window-level pointer listener plumbing.
//!
//! While a widget tracks a drag it needs every move/end event, including the
//! ones that land outside its own bounds. It gets them by registering a
//! handler with a [`PointerListenerHost`]. Registration hands back a
//! [`PointerListenerRegistration`] guard; dropping the guard deregisters the
//! handler, so a handler can never outlive the drag that installed it.

use super::types::PointerEvent;
use indexmap::IndexMap;
use smallvec::SmallVec;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Handler invoked for every window-level pointer event.
pub type PointerHandler = Rc<RefCell<dyn FnMut(&PointerEvent)>>;

type ListenerId = u64;

/// Something that owns the global move/end event stream (a browser window,
/// a desktop event loop, a test robot).
pub trait PointerListenerHost {
    fn register(&self, handler: PointerHandler) -> Result<PointerListenerRegistration, HostError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The host has gone away (window closed, event loop torn down).
    Detached,
    /// The host refused to attach a listener for `event`.
    Rejected { event: &'static str, reason: String },
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Detached => write!(f, "pointer listener host is detached"),
            HostError::Rejected { event, reason } => {
                write!(f, "failed to attach {event} listener: {reason}")
            }
        }
    }
}

impl std::error::Error for HostError {}

/// RAII guard for a registered listener.
///
/// Dropping (or [`cancel`](Self::cancel)ling) the guard runs the host's
/// release hook exactly once.
pub struct PointerListenerRegistration {
    release: Option<Box<dyn FnOnce()>>,
}

impl PointerListenerRegistration {
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn is_active(&self) -> bool {
        self.release.is_some()
    }

    pub fn cancel(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for PointerListenerRegistration {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for PointerListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointerListenerRegistration")
            .field("active", &self.is_active())
            .finish()
    }
}

struct ListenerTable {
    next_id: ListenerId,
    handlers: IndexMap<ListenerId, PointerHandler>,
}

impl Default for ListenerTable {
    fn default() -> Self {
        Self {
            next_id: 1,
            handlers: IndexMap::new(),
        }
    }
}

/// In-process listener host.
///
/// The desktop event loop and the test robot feed window-level events in
/// through [`dispatch`](Self::dispatch). Handlers run in registration order.
#[derive(Clone, Default)]
pub struct GlobalPointerListeners {
    table: Rc<RefCell<ListenerTable>>,
}

impl GlobalPointerListeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listener_count(&self) -> usize {
        self.table.borrow().handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }

    /// Delivers `event` to every listener registered when dispatch began.
    ///
    /// Handlers may drop their own (or another) registration while running;
    /// a listener removed mid-dispatch is not invoked afterwards. Returns the
    /// number of handlers that ran.
    pub fn dispatch(&self, event: &PointerEvent) -> usize {
        let snapshot: SmallVec<[(ListenerId, PointerHandler); 4]> = self
            .table
            .borrow()
            .handlers
            .iter()
            .map(|(id, handler)| (*id, Rc::clone(handler)))
            .collect();

        let mut delivered = 0;
        for (id, handler) in snapshot {
            let still_registered = self.table.borrow().handlers.contains_key(&id);
            if !still_registered {
                continue;
            }
            match handler.try_borrow_mut() {
                Ok(mut handler) => {
                    (&mut *handler)(event);
                    delivered += 1;
                }
                Err(_) => log::warn!("pointer listener {id} re-entered during dispatch, skipped"),
            }
        }
        delivered
    }
}

impl PointerListenerHost for GlobalPointerListeners {
    fn register(&self, handler: PointerHandler) -> Result<PointerListenerRegistration, HostError> {
        let id = {
            let mut table = self.table.borrow_mut();
            let id = table.next_id;
            table.next_id += 1;
            table.handlers.insert(id, handler);
            id
        };
        log::trace!("pointer listener {id} registered");

        let table: Weak<RefCell<ListenerTable>> = Rc::downgrade(&self.table);
        Ok(PointerListenerRegistration::new(move || {
            if let Some(table) = table.upgrade() {
                table.borrow_mut().handlers.shift_remove(&id);
                log::trace!("pointer listener {id} released");
            }
        }))
    }
}

impl fmt::Debug for GlobalPointerListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalPointerListeners")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nodes::input::types::PointerEventKind;
    use std::cell::Cell;

    fn counting_handler(counter: &Rc<Cell<u32>>) -> PointerHandler {
        let counter = Rc::clone(counter);
        Rc::new(RefCell::new(move |_: &PointerEvent| {
            counter.set(counter.get() + 1);
        }))
    }

    fn move_event() -> PointerEvent {
        PointerEvent::at(PointerEventKind::Move, 1.0, 1.0)
    }

    #[test]
    fn dropping_registration_removes_listener() {
        let listeners = GlobalPointerListeners::new();
        let hits = Rc::new(Cell::new(0));

        let registration = listeners
            .register(counting_handler(&hits))
            .expect("in-process host accepts listeners");
        assert_eq!(listeners.listener_count(), 1);
        assert_eq!(listeners.dispatch(&move_event()), 1);

        drop(registration);
        assert!(listeners.is_empty());
        assert_eq!(listeners.dispatch(&move_event()), 0);
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let listeners = GlobalPointerListeners::new();
        let order = Rc::new(RefCell::new(Vec::new()));

        let mut registrations = Vec::new();
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            let handler: PointerHandler = Rc::new(RefCell::new(move |_: &PointerEvent| {
                order.borrow_mut().push(tag);
            }));
            registrations.push(listeners.register(handler).unwrap());
        }

        // Removing from the middle keeps the remaining order.
        registrations.remove(1);
        listeners.dispatch(&move_event());
        assert_eq!(*order.borrow(), vec!["first", "third"]);
    }

    #[test]
    fn handler_can_release_itself_mid_dispatch() {
        let listeners = GlobalPointerListeners::new();
        let slot: Rc<RefCell<Option<PointerListenerRegistration>>> = Rc::new(RefCell::new(None));
        let later_hits = Rc::new(Cell::new(0));

        let self_releasing: PointerHandler = {
            let slot = Rc::clone(&slot);
            Rc::new(RefCell::new(move |_: &PointerEvent| {
                slot.borrow_mut().take();
            }))
        };
        *slot.borrow_mut() = Some(listeners.register(self_releasing).unwrap());
        let _other = listeners.register(counting_handler(&later_hits)).unwrap();

        assert_eq!(listeners.dispatch(&move_event()), 2);
        assert_eq!(listeners.listener_count(), 1);
        assert_eq!(later_hits.get(), 1);
    }

    #[test]
    fn listener_removed_by_earlier_handler_is_skipped() {
        let listeners = GlobalPointerListeners::new();
        let victim_hits = Rc::new(Cell::new(0));
        let victim: Rc<RefCell<Option<PointerListenerRegistration>>> = Rc::new(RefCell::new(None));

        let killer: PointerHandler = {
            let victim = Rc::clone(&victim);
            Rc::new(RefCell::new(move |_: &PointerEvent| {
                victim.borrow_mut().take();
            }))
        };
        let _killer = listeners.register(killer).unwrap();
        *victim.borrow_mut() = Some(listeners.register(counting_handler(&victim_hits)).unwrap());

        assert_eq!(listeners.dispatch(&move_event()), 1);
        assert_eq!(victim_hits.get(), 0);
        assert!(listeners.listener_count() == 1);
    }

    #[test]
    fn registration_outliving_host_is_harmless() {
        let hits = Rc::new(Cell::new(0));
        let registration = {
            let listeners = GlobalPointerListeners::new();
            listeners.register(counting_handler(&hits)).unwrap()
        };
        assert!(registration.is_active());
        registration.cancel();
    }

    #[test]
    fn host_error_messages() {
        assert_eq!(
            HostError::Detached.to_string(),
            "pointer listener host is detached"
        );
        let rejected = HostError::Rejected {
            event: "mousemove",
            reason: "no window".into(),
        };
        assert_eq!(
            rejected.to_string(),
            "failed to attach mousemove listener: no window"
        );
    }
}
