//! Recovery boundary trait and shared types.
//!
//! A [`RecoveryBoundary`] is whatever sits above a component and decides what
//! to show when that component fails: a fallback panel, an error page, a log
//! line. The bridge only relays; every decision is made here.

use std::fmt::Display;

/// What the boundary wants done with the held error after a relay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryDecision {
    /// The boundary re-mounted a fresh subtree; the slot is emptied.
    Reset,
    /// The error stays held. It is relayed again only after another state change.
    Retain,
}

/// Trait for recovery boundaries.
pub trait RecoveryBoundary<E> {
    /// Called once per observation cycle in which a captured error is held.
    fn handle_captured_failure(&mut self, error: &E) -> RecoveryDecision;
}

impl<E, F> RecoveryBoundary<E> for F
where
    F: FnMut(&E) -> RecoveryDecision,
{
    fn handle_captured_failure(&mut self, error: &E) -> RecoveryDecision {
        self(error)
    }
}

/// Boundary that logs every relayed error and resets.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingBoundary;

impl<E: Display> RecoveryBoundary<E> for TracingBoundary {
    fn handle_captured_failure(&mut self, error: &E) -> RecoveryDecision {
        tracing::error!(%error, "captured failure reached recovery boundary");
        RecoveryDecision::Reset
    }
}
