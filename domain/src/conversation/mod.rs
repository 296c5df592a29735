//! Conversations, their participants and messages.
//!
//! These are read-only snapshots supplied by the caller; the engines never
//! mutate or persist them.

pub mod entities;
pub mod message;

pub use entities::{Conversation, ConversationStatus, Participant, ParticipantRole, Visibility};
pub use message::Message;
