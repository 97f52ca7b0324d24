//! Capture now, relay on the next observation cycle.
//!
//! Reports go through a channel instead of touching the slot directly, so a
//! report made from a timer callback, a worker thread, or a failed async task
//! never relays inline. The owner drives [`ErrorBridge::run_cycle`] once per
//! update cycle:
//!
//! ```text
//! handle_error(e1) ─┐
//! handle_error(e2) ─┼─► channel ─► run_cycle: drain → commit → relay(e2) → apply decision
//! clear_error()?  ──┘
//! ```
//!
//! Ordering: every change reported before `run_cycle` is committed first, in
//! call order, and the relay happens before `run_cycle` returns.

use super::boundary::{RecoveryBoundary, RecoveryDecision};
use super::slot::{ErrorSlot, StateChange};
use std::sync::mpsc::{self, Receiver, Sender};

/// Cloneable handle for reporting errors into a bridge.
///
/// `Send` whenever `E` is, so it can move into callbacks and threads.
pub struct ErrorReporter<E> {
    tx: Sender<StateChange<E>>,
}

impl<E> Clone for ErrorReporter<E> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<E> ErrorReporter<E> {
    /// Record `error`, replacing whatever is held once committed.
    pub fn handle_error(&self, error: E) {
        self.send(StateChange::Set(error));
    }

    /// Forget any held or pending error.
    pub fn clear_error(&self) {
        self.send(StateChange::Clear);
    }

    fn send(&self, change: StateChange<E>) {
        // The bridge is gone: the component unmounted and nothing is left to fail.
        if self.tx.send(change).is_err() {
            tracing::debug!("error bridge dropped, discarding report");
        }
    }
}

/// Per-component error state wired to a recovery boundary.
pub struct ErrorBridge<E, B> {
    slot: ErrorSlot<E>,
    tx: Sender<StateChange<E>>,
    rx: Receiver<StateChange<E>>,
    boundary: B,
}

impl<E, B: RecoveryBoundary<E>> ErrorBridge<E, B> {
    pub fn new(boundary: B) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            slot: ErrorSlot::new(),
            tx,
            rx,
            boundary,
        }
    }

    pub fn reporter(&self) -> ErrorReporter<E> {
        ErrorReporter {
            tx: self.tx.clone(),
        }
    }

    pub fn handle_error(&self, error: E) {
        self.reporter().handle_error(error);
    }

    pub fn clear_error(&self) {
        self.reporter().clear_error();
    }

    /// The committed error, if any. Pending reports are not visible until
    /// the next [`run_cycle`](Self::run_cycle).
    pub fn error(&self) -> Option<&E> {
        self.slot.get()
    }

    pub fn boundary(&self) -> &B {
        &self.boundary
    }

    pub fn into_boundary(self) -> B {
        self.boundary
    }

    /// Commit pending changes, then relay the held error if anything changed.
    ///
    /// Returns the boundary's decision when a relay happened.
    pub fn run_cycle(&mut self) -> Option<RecoveryDecision> {
        let mut changes = 0usize;
        while let Ok(change) = self.rx.try_recv() {
            tracing::trace!(set = matches!(change, StateChange::Set(_)), "error state change");
            self.slot.apply(change);
            changes += 1;
        }
        if changes == 0 {
            return None;
        }

        let error = self.slot.get()?;
        let decision = self.boundary.handle_captured_failure(error);
        if decision == RecoveryDecision::Reset {
            self.slot.take();
        }
        Some(decision)
    }
}
