//! Port for structured engine event logging.
//!
//! Defines the [`EventLogger`] trait for recording decisions (trigger
//! evaluations, scheduled and cancelled replies, permission denials) to a
//! structured log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! decision trail (JSONL).

use serde_json::Value;

/// A structured engine event.
pub struct EngineEvent {
    /// Event type identifier (e.g., "trigger_evaluated", "response_scheduled").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl EngineEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging engine events.
///
/// `log` is synchronous and infallible so a broken log sink can never
/// disturb a decision; implementations swallow their own write failures.
pub trait EventLogger: Send + Sync {
    fn log(&self, event: EngineEvent);
}

/// No-op implementation for tests and when event logging is disabled.
pub struct NoEventLogger;

impl EventLogger for NoEventLogger {
    fn log(&self, _event: EngineEvent) {}
}
