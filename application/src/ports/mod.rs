//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod event_logger;
pub mod jitter;
pub mod message_history;
pub mod response_generator;
pub mod state_listener;
