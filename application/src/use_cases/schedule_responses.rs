//! Response scheduling
//!
//! Turns accepted triggers into delayed, independently failing generation
//! tasks. Every task is keyed by (conversation, persona, trigger message) and
//! can be withdrawn until it fires, either directly or by closing the
//! conversation.
//!
//! Tasks are spawned onto the Tokio runtime, so they outlive the request that
//! scheduled them. A task's failure is logged and never reaches the caller or
//! its siblings.

use crate::config::SchedulerConfig;
use crate::ports::event_logger::{EngineEvent, EventLogger, NoEventLogger};
use crate::ports::response_generator::{GenerationError, GenerationRequest, ResponseGenerator};
use crate::ports::state_listener::ConversationStateListener;
use colloquy_domain::{AiResponseTrigger, ConversationId, ConversationStatus, MessageId, PersonaId};
use serde::Serialize;
use serde_json::json;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, info, warn};

/// Identity of one scheduled reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScheduleKey {
    pub conversation_id: ConversationId,
    pub persona_id: PersonaId,
    pub trigger_message_id: MessageId,
}

impl ScheduleKey {
    pub fn new(
        conversation_id: impl Into<ConversationId>,
        persona_id: impl Into<PersonaId>,
        trigger_message_id: impl Into<MessageId>,
    ) -> Self {
        Self {
            conversation_id: conversation_id.into(),
            persona_id: persona_id.into(),
            trigger_message_id: trigger_message_id.into(),
        }
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}@{}",
            self.conversation_id, self.persona_id, self.trigger_message_id
        )
    }
}

struct PendingEntry {
    token: CancellationToken,
    /// Distinguishes a task from a later replacement under the same key.
    ticket: u64,
}

type PendingTable = Arc<Mutex<HashMap<ScheduleKey, PendingEntry>>>;

fn lock(table: &PendingTable) -> MutexGuard<'_, HashMap<ScheduleKey, PendingEntry>> {
    table.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Removes the task's own entry on every exit path, panics included.
struct PendingGuard {
    table: PendingTable,
    key: ScheduleKey,
    ticket: u64,
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        let mut table = lock(&self.table);
        if table.get(&self.key).is_some_and(|e| e.ticket == self.ticket) {
            table.remove(&self.key);
        }
    }
}

enum TaskOutcome {
    Completed,
    Failed(GenerationError),
    Cancelled,
}

/// Schedules delayed response generation with per-key cancellation
pub struct ResponseScheduler<R: ResponseGenerator + 'static> {
    generator: Arc<R>,
    config: SchedulerConfig,
    pending: PendingTable,
    next_ticket: AtomicU64,
    tracker: TaskTracker,
    root: CancellationToken,
    event_logger: Arc<dyn EventLogger>,
}

impl<R: ResponseGenerator + 'static> ResponseScheduler<R> {
    pub fn new(generator: Arc<R>) -> Self {
        Self::with_config(generator, SchedulerConfig::default())
    }

    pub fn with_config(generator: Arc<R>, config: SchedulerConfig) -> Self {
        Self {
            generator,
            config,
            pending: Arc::new(Mutex::new(HashMap::new())),
            next_ticket: AtomicU64::new(0),
            tracker: TaskTracker::new(),
            root: CancellationToken::new(),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    /// Dispatch one task per responding trigger and return their keys.
    ///
    /// Returns immediately. A key that is already pending is replaced: the
    /// earlier task is cancelled before the new one starts. After
    /// [`shutdown`](Self::shutdown) nothing is scheduled.
    pub fn schedule(
        &self,
        conversation_id: &ConversationId,
        trigger_message_id: &MessageId,
        triggers: &[AiResponseTrigger],
    ) -> Vec<ScheduleKey> {
        if self.root.is_cancelled() {
            warn!(conversation_id = %conversation_id, "Scheduler is shut down, ignoring triggers");
            return Vec::new();
        }

        let mut keys = Vec::new();
        for trigger in triggers.iter().filter(|t| t.should_respond) {
            let key = ScheduleKey::new(
                conversation_id.clone(),
                trigger.persona_id.clone(),
                trigger_message_id.clone(),
            );
            let token = self.root.child_token();
            let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);

            let replaced = lock(&self.pending).insert(
                key.clone(),
                PendingEntry {
                    token: token.clone(),
                    ticket,
                },
            );
            if let Some(previous) = replaced {
                debug!(key = %key, "Replacing pending response");
                previous.token.cancel();
            }

            let request = GenerationRequest {
                conversation_id: conversation_id.clone(),
                persona_id: trigger.persona_id.clone(),
                trigger_message_id: trigger_message_id.clone(),
                confidence: trigger.response_confidence,
                reason: trigger.trigger_reason.clone(),
            };
            let guard = PendingGuard {
                table: Arc::clone(&self.pending),
                key: key.clone(),
                ticket,
            };

            self.event_logger.log(EngineEvent::new(
                "response_scheduled",
                json!({
                    "key": key,
                    "delay_ms": trigger.response_delay_ms,
                    "confidence": trigger.response_confidence,
                }),
            ));

            self.tracker.spawn(Self::run_task(
                Arc::clone(&self.generator),
                Arc::clone(&self.event_logger),
                request,
                trigger.response_delay(),
                self.config.generation_timeout,
                token,
                guard,
            ));
            keys.push(key);
        }

        info!(
            conversation_id = %conversation_id,
            message_id = %trigger_message_id,
            scheduled = keys.len(),
            "Scheduled responses"
        );
        keys
    }

    /// Cancel one pending task. Returns whether it was still pending.
    pub fn cancel(&self, key: &ScheduleKey) -> bool {
        match lock(&self.pending).remove(key) {
            Some(entry) => {
                entry.token.cancel();
                true
            }
            None => false,
        }
    }

    /// Cancel every pending task of a conversation and return the count.
    pub fn cancel_conversation(&self, conversation_id: &ConversationId) -> usize {
        let mut cancelled = 0;
        lock(&self.pending).retain(|key, entry| {
            if &key.conversation_id == conversation_id {
                entry.token.cancel();
                cancelled += 1;
                false
            } else {
                true
            }
        });
        if cancelled > 0 {
            info!(conversation_id = %conversation_id, cancelled, "Cancelled pending responses");
        }
        cancelled
    }

    /// Keys still waiting or generating, sorted.
    pub fn pending(&self) -> Vec<ScheduleKey> {
        let mut keys: Vec<_> = lock(&self.pending).keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Cancel everything and refuse further scheduling.
    pub fn shutdown(&self) {
        self.root.cancel();
        lock(&self.pending).clear();
        self.tracker.close();
    }

    /// Wait until every spawned task has finished.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        if !self.root.is_cancelled() {
            self.tracker.reopen();
        }
    }

    async fn run_task(
        generator: Arc<R>,
        event_logger: Arc<dyn EventLogger>,
        request: GenerationRequest,
        delay: Duration,
        generation_timeout: Option<Duration>,
        token: CancellationToken,
        guard: PendingGuard,
    ) {
        let outcome = tokio::select! {
            _ = token.cancelled() => TaskOutcome::Cancelled,
            result = async move {
                tokio::time::sleep(delay).await;
                Self::generate(generator.as_ref(), request, generation_timeout).await
            } => match result {
                Ok(()) => TaskOutcome::Completed,
                Err(e) => TaskOutcome::Failed(e),
            },
        };

        let key = &guard.key;
        match outcome {
            TaskOutcome::Completed => {
                debug!(key = %key, "Response generated");
                event_logger.log(EngineEvent::new("response_completed", json!({ "key": key })));
            }
            TaskOutcome::Failed(e) => {
                warn!(key = %key, error = %e, "Response generation failed");
                event_logger.log(EngineEvent::new(
                    "response_failed",
                    json!({ "key": key, "error": e.to_string() }),
                ));
            }
            TaskOutcome::Cancelled => {
                debug!(key = %key, "Response cancelled before completion");
                event_logger.log(EngineEvent::new("response_cancelled", json!({ "key": key })));
            }
        }
    }

    async fn generate(
        generator: &R,
        request: GenerationRequest,
        generation_timeout: Option<Duration>,
    ) -> Result<(), GenerationError> {
        match generation_timeout {
            Some(limit) => tokio::time::timeout(limit, generator.generate(request))
                .await
                .unwrap_or(Err(GenerationError::Timeout)),
            None => generator.generate(request).await,
        }
    }
}

impl<R: ResponseGenerator + 'static> ConversationStateListener for ResponseScheduler<R> {
    fn on_status_changed(&self, conversation_id: &ConversationId, status: ConversationStatus) {
        if !status.is_active() {
            self.cancel_conversation(conversation_id);
        }
    }
}
