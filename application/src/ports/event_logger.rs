//! Port for persisting debate events.
//!
//! Separate from `tracing`: tracing carries human-readable diagnostics, this
//! port captures the protocol transcript in a machine-readable form.

use council_domain::DebateEvent;

/// Records debate events.
///
/// Synchronous and infallible so that a broken transcript never disturbs a
/// running debate; implementations swallow their own errors.
pub trait EventLogger: Send + Sync {
    fn log(&self, event: &DebateEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: &DebateEvent) {}
}
