//! Domain layer for colloquy
//!
//! This crate contains the conversation model and the two decision engines.
//! It performs no I/O and has no dependency on an async runtime.
//!
//! # Core Concepts
//!
//! ## Permission Engine
//!
//! Decides what a user may do to a conversation. Independent rules each
//! assert part of a seven-field [`PermissionSet`]; the engine OR-merges them.
//!
//! ## Response Scoring
//!
//! Decides which AI personas should reply to a new message, with what
//! confidence and after what delay. See [`response`].

pub mod conversation;
pub mod core;
pub mod permission;
pub mod persona;
pub mod response;
pub mod user;
pub mod util;

// Re-export commonly used types
pub use conversation::{
    Conversation, ConversationStatus, Message, Participant, ParticipantRole, Visibility,
};
pub use crate::core::{
    error::DomainError,
    ids::{ConversationId, MessageId, PersonaId, UserId},
};
pub use permission::{
    PermissionAction, PermissionContext, PermissionEngine, PermissionGrant, PermissionMetadata,
    PermissionResult, PermissionRule, PermissionSet, PermissionVerdict, ResourceType, RuleOutcome,
};
pub use persona::{CommunicationStyle, InteractionType, Persona, PersonaType, PersonalityTraits};
pub use response::{
    AiResponseTrigger, CandidateInput, CandidateScorer, DelayPolicy, ScoreBreakdown,
    ScoringWeights, TriggerDecision,
};
pub use user::{User, UserRole};
