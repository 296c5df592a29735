//! Generator that records what it would have produced.
//!
//! Stands in for the language-model call, which lives outside this system.

use async_trait::async_trait;
use colloquy_application::{GenerationError, GenerationRequest, ResponseGenerator};
use std::sync::atomic::{AtomicUsize, Ordering};
use tracing::info;

#[derive(Debug, Default)]
pub struct LoggingResponseGenerator {
    generated: AtomicUsize,
}

impl LoggingResponseGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of generation requests served so far.
    pub fn generated(&self) -> usize {
        self.generated.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResponseGenerator for LoggingResponseGenerator {
    async fn generate(&self, request: GenerationRequest) -> Result<(), GenerationError> {
        self.generated.fetch_add(1, Ordering::SeqCst);
        info!(
            conversation_id = %request.conversation_id,
            persona_id = %request.persona_id,
            message_id = %request.trigger_message_id,
            confidence = request.confidence,
            reason = %request.reason,
            "Generating response"
        );
        Ok(())
    }
}
