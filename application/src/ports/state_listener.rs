//! Hook for conversation state transitions.
//!
//! The persistence layer calls this whenever a conversation's status
//! changes so that work tied to the old state can be withdrawn.

use colloquy_domain::{ConversationId, ConversationStatus};

pub trait ConversationStateListener: Send + Sync {
    fn on_status_changed(&self, conversation_id: &ConversationId, status: ConversationStatus);
}
