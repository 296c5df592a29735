//! Message snapshot.

use crate::core::ids::{ConversationId, MessageId, PersonaId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single message in a conversation.
///
/// `sequence_number` increases monotonically within a conversation; the
/// persistence layer assigns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub conversation_id: ConversationId,
    pub author_persona_id: PersonaId,
    pub content: String,
    pub sequence_number: u64,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub archived: bool,
}

fn default_visible() -> bool {
    true
}

impl Message {
    pub fn new(
        id: impl Into<MessageId>,
        conversation_id: impl Into<ConversationId>,
        author_persona_id: impl Into<PersonaId>,
        content: impl Into<String>,
        sequence_number: u64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            conversation_id: conversation_id.into(),
            author_persona_id: author_persona_id.into(),
            content: content.into(),
            sequence_number,
            timestamp,
            visible: true,
            archived: false,
        }
    }

    /// Visible and not archived: eligible for the recent-history window.
    pub fn is_listed(&self) -> bool {
        self.visible && !self.archived
    }

    pub fn is_authored_by(&self, persona_id: &PersonaId) -> bool {
        &self.author_persona_id == persona_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_message_is_listed() {
        let msg = Message::new("m-1", "c-1", "p-1", "hello", 1, Utc::now());
        assert!(msg.is_listed());
        assert!(msg.is_authored_by(&PersonaId::new("p-1")));
    }

    #[test]
    fn test_archived_message_is_not_listed() {
        let mut msg = Message::new("m-1", "c-1", "p-1", "hello", 1, Utc::now());
        msg.archived = true;
        assert!(!msg.is_listed());
    }

    #[test]
    fn test_visibility_flags_default_on_deserialize() {
        let msg: Message = serde_json::from_str(
            r#"{"id":"m-1","conversation_id":"c-1","author_persona_id":"p-1",
                "content":"hi","sequence_number":3,"timestamp":"2026-01-01T10:00:00Z"}"#,
        )
        .unwrap();
        assert!(msg.visible);
        assert!(!msg.archived);
        assert_eq!(msg.sequence_number, 3);
    }
}
