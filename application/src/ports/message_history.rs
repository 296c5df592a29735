//! Message history port
//!
//! The one read the trigger analysis depends on.

use async_trait::async_trait;
use colloquy_domain::{ConversationId, Message};
use thiserror::Error;

/// Errors that can occur while reading recent messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History store unavailable: {0}")]
    Unavailable(String),

    #[error("History read timed out")]
    Timeout,

    #[error("Unknown conversation: {0}")]
    UnknownConversation(ConversationId),

    #[error("Other error: {0}")]
    Other(String),
}

impl HistoryError {
    /// Whether retrying the same read may succeed.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, HistoryError::UnknownConversation(_))
    }
}

/// Read access to recent conversation messages.
///
/// Implementations return at most `limit` visible, non-archived messages,
/// newest first.
#[async_trait]
pub trait MessageHistory: Send + Sync {
    async fn recent_messages(
        &self,
        conversation_id: &ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, HistoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(HistoryError::Timeout.is_retryable());
        assert!(HistoryError::Unavailable("db down".into()).is_retryable());
        assert!(!HistoryError::UnknownConversation(ConversationId::new("c-1")).is_retryable());
    }
}
