//! Handle New Message use case
//!
//! Entry point for a posted message: gatekeeps the post, analyzes which AI
//! personas should reply, and hands the responders to the scheduler. Returns
//! as soon as the replies are scheduled.

use super::analyze_triggers::{AiResponseOrchestrator, OrchestratorError};
use super::schedule_responses::{ResponseScheduler, ScheduleKey};
use crate::ports::event_logger::{EngineEvent, EventLogger, NoEventLogger};
use crate::ports::message_history::MessageHistory;
use crate::ports::response_generator::ResponseGenerator;
use colloquy_domain::util::truncate_str;
use colloquy_domain::{
    AiResponseTrigger, Conversation, Message, PermissionEngine, Persona, PersonaId, User,
};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Fallback when no rule supplied a reason for the denial.
const REASON_DENIED: &str = "permission denied";

/// Errors that can occur while handling a new message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageEventError {
    #[error("Message rejected: {reason}")]
    Denied { reason: String },

    #[error(transparent)]
    Orchestration(#[from] OrchestratorError),
}

impl MessageEventError {
    pub fn is_retryable(&self) -> bool {
        match self {
            MessageEventError::Denied { .. } => false,
            MessageEventError::Orchestration(e) => e.is_retryable(),
        }
    }
}

/// Who posted the message.
#[derive(Debug, Clone, Copy)]
pub struct MessageAuthor<'a> {
    pub user: &'a User,
    /// Personas owned by `user`.
    pub owned_persona_ids: &'a [PersonaId],
}

/// Result of handling one message
#[derive(Debug, Clone, Serialize)]
pub struct MessageEventOutcome {
    /// Every candidate's trigger, responders first.
    pub triggers: Vec<AiResponseTrigger>,
    /// Replies handed to the scheduler.
    pub scheduled: Vec<ScheduleKey>,
}

/// Use case wiring the permission engine, orchestrator and scheduler
pub struct MessageEventUseCase<H: MessageHistory + 'static, R: ResponseGenerator + 'static> {
    permissions: PermissionEngine,
    orchestrator: AiResponseOrchestrator<H>,
    scheduler: Arc<ResponseScheduler<R>>,
    event_logger: Arc<dyn EventLogger>,
}

impl<H: MessageHistory + 'static, R: ResponseGenerator + 'static> MessageEventUseCase<H, R> {
    pub fn new(
        permissions: PermissionEngine,
        orchestrator: AiResponseOrchestrator<H>,
        scheduler: Arc<ResponseScheduler<R>>,
    ) -> Self {
        Self {
            permissions,
            orchestrator,
            scheduler,
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub fn scheduler(&self) -> &Arc<ResponseScheduler<R>> {
        &self.scheduler
    }

    pub async fn handle_new_message(
        &self,
        author: MessageAuthor<'_>,
        conversation: &Conversation,
        message: &Message,
        roster: &[Persona],
    ) -> Result<MessageEventOutcome, MessageEventError> {
        let verdict = self.permissions.can_user_post_message(
            author.user,
            conversation,
            &message.author_persona_id,
            author.owned_persona_ids,
        );

        if !verdict.granted {
            let reason = verdict.reason.unwrap_or_else(|| REASON_DENIED.to_string());
            warn!(
                user_id = %author.user.id,
                conversation_id = %conversation.id,
                persona_id = %message.author_persona_id,
                reason = %reason,
                "Message rejected"
            );
            self.event_logger.log(EngineEvent::new(
                "permission_denied",
                json!({
                    "user_id": author.user.id,
                    "conversation_id": conversation.id,
                    "persona_id": message.author_persona_id,
                    "action": "add_message",
                    "reason": reason,
                }),
            ));
            return Err(MessageEventError::Denied { reason });
        }

        let triggers = self
            .orchestrator
            .analyze_response_triggers(conversation, message, roster)
            .await?;
        let scheduled = self
            .scheduler
            .schedule(&conversation.id, &message.id, &triggers);

        info!(
            conversation_id = %conversation.id,
            message_id = %message.id,
            preview = truncate_str(&message.content, 60),
            scheduled = scheduled.len(),
            "Message accepted"
        );

        Ok(MessageEventOutcome {
            triggers,
            scheduled,
        })
    }
}
