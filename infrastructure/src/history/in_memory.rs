//! In-process message store implementing the [`MessageHistory`] port.

use async_trait::async_trait;
use colloquy_application::{HistoryError, MessageHistory};
use colloquy_domain::{ConversationId, Message, MessageId};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// Messages grouped by conversation, held in memory.
///
/// Reads return only listed (visible, non-archived) messages, newest first
/// by sequence number. An unknown conversation reads as empty.
#[derive(Default)]
pub struct InMemoryMessageHistory {
    conversations: RwLock<HashMap<ConversationId, Vec<Message>>>,
}

impl InMemoryMessageHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-filled with `messages`.
    pub fn with_messages(messages: impl IntoIterator<Item = Message>) -> Self {
        let history = Self::new();
        for message in messages {
            history.append(message);
        }
        history
    }

    pub fn append(&self, message: Message) {
        let mut conversations = self
            .conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        conversations
            .entry(message.conversation_id.clone())
            .or_default()
            .push(message);
    }

    /// Mark a message archived. Returns whether it was found.
    pub fn archive(&self, message_id: &MessageId) -> bool {
        self.update(message_id, |m| m.archived = true)
    }

    /// Hide a message from listings. Returns whether it was found.
    pub fn hide(&self, message_id: &MessageId) -> bool {
        self.update(message_id, |m| m.visible = false)
    }

    /// Total stored messages, listed or not.
    pub fn len(&self) -> usize {
        self.conversations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update(&self, message_id: &MessageId, apply: impl FnOnce(&mut Message)) -> bool {
        let mut conversations = self
            .conversations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let found = conversations
            .values_mut()
            .flat_map(|messages| messages.iter_mut())
            .find(|m| &m.id == message_id);

        match found {
            Some(message) => {
                apply(message);
                true
            }
            None => {
                debug!(message_id = %message_id, "Message not found");
                false
            }
        }
    }
}

#[async_trait]
impl MessageHistory for InMemoryMessageHistory {
    async fn recent_messages(
        &self,
        conversation_id: &ConversationId,
        limit: usize,
    ) -> Result<Vec<Message>, HistoryError> {
        let conversations = self
            .conversations
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let Some(messages) = conversations.get(conversation_id) else {
            return Ok(Vec::new());
        };

        let mut listed: Vec<Message> = messages.iter().filter(|m| m.is_listed()).cloned().collect();
        listed.sort_by(|a, b| b.sequence_number.cmp(&a.sequence_number));
        listed.truncate(limit);
        Ok(listed)
    }
}
