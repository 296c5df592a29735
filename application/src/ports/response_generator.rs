//! Response generator port
//!
//! Produces the actual reply text for a persona. The language-model call
//! behind it is external to this crate.

use async_trait::async_trait;
use colloquy_domain::{ConversationId, MessageId, PersonaId};
use thiserror::Error;

/// Errors that can occur during response generation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    #[error("Generation failed: {0}")]
    Failed(String),

    #[error("Generation timed out")]
    Timeout,

    #[error("Generation rejected: {0}")]
    Rejected(String),
}

/// One scheduled reply to generate.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub conversation_id: ConversationId,
    pub persona_id: PersonaId,
    /// The message that triggered this reply.
    pub trigger_message_id: MessageId,
    pub confidence: f64,
    pub reason: String,
}

#[async_trait]
pub trait ResponseGenerator: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<(), GenerationError>;
}
