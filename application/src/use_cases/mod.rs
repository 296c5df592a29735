//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod analyze_triggers;
pub mod handle_message;
pub mod schedule_responses;
