//! Host-side gate for actions that require a completed slide verification.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Records whether a [`SliderCaptcha`](crate::SliderCaptcha) completion
/// callback has fired.
///
/// ```
/// use slidegate_ui::VerificationGate;
///
/// let gate = VerificationGate::new();
/// let on_success = gate.on_success();
/// assert!(gate.require().is_err());
/// on_success();
/// assert!(gate.require().is_ok());
/// ```
#[derive(Clone, Debug, Default)]
pub struct VerificationGate {
    verified: Rc<Cell<bool>>,
}

impl VerificationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Completion callback to hand to a widget.
    pub fn on_success(&self) -> impl FnOnce() + 'static {
        let verified = Rc::clone(&self.verified);
        move || verified.set(true)
    }

    pub fn is_verified(&self) -> bool {
        self.verified.get()
    }

    pub fn require(&self) -> Result<(), VerificationRequired> {
        if self.verified.get() {
            Ok(())
        } else {
            Err(VerificationRequired)
        }
    }

    /// Closes the gate again, e.g. after a rejected login. The host must mount
    /// a fresh widget; a verified widget never fires twice.
    pub fn rearm(&self) {
        self.verified.set(false);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerificationRequired;

impl fmt::Display for VerificationRequired {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("please complete verification")
    }
}

impl std::error::Error for VerificationRequired {}
