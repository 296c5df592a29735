//! Application layer for colloquy
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::{OrchestratorConfig, SchedulerConfig};
pub use ports::{
    event_logger::{EngineEvent, EventLogger, NoEventLogger},
    jitter::{DelayJitter, FixedJitter},
    message_history::{HistoryError, MessageHistory},
    response_generator::{GenerationError, GenerationRequest, ResponseGenerator},
    state_listener::ConversationStateListener,
};
pub use use_cases::analyze_triggers::{AiResponseOrchestrator, OrchestratorError};
pub use use_cases::handle_message::{
    MessageAuthor, MessageEventError, MessageEventOutcome, MessageEventUseCase,
};
pub use use_cases::schedule_responses::{ResponseScheduler, ScheduleKey};
