//! Infrastructure layer for colloquy
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod generation;
pub mod history;
pub mod jitter;
pub mod logging;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileLoggingConfig, FileOrchestratorConfig,
    FileSchedulerConfig,
};
pub use generation::LoggingResponseGenerator;
pub use history::InMemoryMessageHistory;
pub use jitter::RandomJitter;
pub use logging::JsonlEventLogger;
