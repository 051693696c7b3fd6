//! One-shot readiness gate.
//!
//! The upload input starts disabled and is enabled when the gate opens, which
//! happens once the engine is mounted and its first frame is scheduled.

use std::sync::OnceLock;

#[cfg(test)]
#[path = "gate_test.rs"]
mod gate_test;

#[derive(Debug, thiserror::Error)]
pub enum GateError {
    #[error("readiness gate is already open")]
    AlreadyOpen,
}

/// A flag that goes from closed to open exactly once.
#[derive(Debug, Default)]
pub struct ReadyGate {
    opened: OnceLock<()>,
}

impl ReadyGate {
    #[must_use]
    pub const fn new() -> Self {
        Self { opened: OnceLock::new() }
    }

    /// Open the gate.
    ///
    /// # Errors
    ///
    /// Returns [`GateError::AlreadyOpen`] on every call after the first.
    pub fn open(&self) -> Result<(), GateError> {
        self.opened.set(()).map_err(|()| GateError::AlreadyOpen)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.opened.get().is_some()
    }
}
