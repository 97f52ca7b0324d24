//! Deferred error relay for components that fail outside their render path.
//!
//! - **Slot**: [`ErrorSlot`] holds at most one captured error
//! - **Boundary**: [`RecoveryBoundary`] trait + [`TracingBoundary`]
//! - **Bridge**: [`ErrorBridge`] / [`ErrorReporter`], the capture-then-relay cycle

mod boundary;
mod bridge;
mod slot;

pub use boundary::{RecoveryBoundary, RecoveryDecision, TracingBoundary};
pub use bridge::{ErrorBridge, ErrorReporter};
pub use slot::{ErrorSlot, StateChange};
