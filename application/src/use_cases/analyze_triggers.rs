//! Analyze Response Triggers use case
//!
//! Decides, after each new message, which AI personas in the conversation
//! should reply autonomously. Performs exactly one read (the recent-message
//! window) and delegates all scoring to the domain.

use crate::config::OrchestratorConfig;
use crate::ports::event_logger::{EngineEvent, EventLogger, NoEventLogger};
use crate::ports::jitter::{DelayJitter, FixedJitter};
use crate::ports::message_history::{HistoryError, MessageHistory};
use colloquy_domain::{
    AiResponseTrigger, CandidateInput, CandidateScorer, Conversation, Message, Persona,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during trigger analysis
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrchestratorError {
    #[error("Failed to read recent messages: {0}")]
    History(#[from] HistoryError),
}

impl OrchestratorError {
    pub fn is_retryable(&self) -> bool {
        match self {
            OrchestratorError::History(e) => e.is_retryable(),
        }
    }
}

/// Use case for selecting and scoring AI responders
pub struct AiResponseOrchestrator<H: MessageHistory + 'static> {
    history: Arc<H>,
    config: OrchestratorConfig,
    scorer: CandidateScorer,
    jitter: Arc<dyn DelayJitter>,
    event_logger: Arc<dyn EventLogger>,
}

impl<H: MessageHistory + 'static> AiResponseOrchestrator<H> {
    pub fn new(history: Arc<H>) -> Self {
        Self::with_config(history, OrchestratorConfig::default())
    }

    pub fn with_config(history: Arc<H>, config: OrchestratorConfig) -> Self {
        Self {
            history,
            scorer: config.scorer(),
            config,
            jitter: Arc::new(FixedJitter::default()),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_jitter(mut self, jitter: Arc<dyn DelayJitter>) -> Self {
        self.jitter = jitter;
        self
    }

    pub fn with_event_logger(mut self, logger: Arc<dyn EventLogger>) -> Self {
        self.event_logger = logger;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Produce one trigger per AI candidate, responders first.
    ///
    /// Candidates are the active participants whose persona in `roster` is
    /// autonomous. A participant missing from the roster is skipped with a
    /// warning. A failed history read is returned to the caller untouched;
    /// no retry happens here.
    ///
    /// The result is sorted by confidence, highest first. Equal confidences
    /// keep participant order.
    pub async fn analyze_response_triggers(
        &self,
        conversation: &Conversation,
        message: &Message,
        roster: &[Persona],
    ) -> Result<Vec<AiResponseTrigger>, OrchestratorError> {
        let candidates = Self::select_candidates(conversation, roster);
        if candidates.is_empty() {
            debug!(conversation_id = %conversation.id, "No AI candidates in conversation");
            return Ok(Vec::new());
        }

        let history = self
            .history
            .recent_messages(&conversation.id, self.config.history_limit)
            .await?;

        let mut triggers: Vec<AiResponseTrigger> = candidates
            .into_iter()
            .map(|persona| {
                let input = CandidateInput {
                    persona,
                    message,
                    conversation,
                    history: &history,
                };
                let jitter = self
                    .jitter
                    .sample(self.scorer.delay.jitter_min, self.scorer.delay.jitter_max);
                let trigger = self.scorer.score(&input, jitter);
                self.record(conversation, message, &trigger);
                trigger
            })
            .collect();

        triggers.sort_by(|a, b| b.response_confidence.total_cmp(&a.response_confidence));

        info!(
            conversation_id = %conversation.id,
            message_id = %message.id,
            candidates = triggers.len(),
            responders = triggers.iter().filter(|t| t.should_respond).count(),
            "Analyzed response triggers"
        );

        Ok(triggers)
    }

    fn select_candidates<'a>(conversation: &Conversation, roster: &'a [Persona]) -> Vec<&'a Persona> {
        conversation
            .active_participants()
            .filter_map(|participant| {
                let persona = roster.iter().find(|p| p.id == participant.persona_id);
                if persona.is_none() {
                    warn!(
                        conversation_id = %conversation.id,
                        persona_id = %participant.persona_id,
                        "Participant persona not found in roster, skipping"
                    );
                }
                persona
            })
            .filter(|persona| persona.is_autonomous())
            .collect()
    }

    fn record(&self, conversation: &Conversation, message: &Message, trigger: &AiResponseTrigger) {
        debug!(
            persona_id = %trigger.persona_id,
            should_respond = trigger.should_respond,
            confidence = trigger.response_confidence,
            delay_ms = trigger.response_delay_ms,
            "{}",
            trigger.trigger_reason
        );

        self.event_logger.log(EngineEvent::new(
            "trigger_evaluated",
            json!({
                "conversation_id": conversation.id,
                "message_id": message.id,
                "persona_id": trigger.persona_id,
                "should_respond": trigger.should_respond,
                "confidence": trigger.response_confidence,
                "delay_ms": trigger.response_delay_ms,
                "reason": trigger.trigger_reason,
                "breakdown": trigger.score_breakdown,
            }),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use colloquy_domain::{
        ConversationId, InteractionType, Participant, ParticipantRole, PersonaType,
        PersonalityTraits,
    };
    use std::sync::Mutex;

    struct MockHistory {
        messages: Vec<Message>,
        failure: Option<HistoryError>,
        reads: Mutex<Vec<(ConversationId, usize)>>,
    }

    impl MockHistory {
        fn with(messages: Vec<Message>) -> Self {
            Self {
                messages,
                failure: None,
                reads: Mutex::new(Vec::new()),
            }
        }

        fn failing(error: HistoryError) -> Self {
            Self {
                messages: Vec::new(),
                failure: Some(error),
                reads: Mutex::new(Vec::new()),
            }
        }

        fn read_count(&self) -> usize {
            self.reads.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl MessageHistory for MockHistory {
        async fn recent_messages(
            &self,
            conversation_id: &ConversationId,
            limit: usize,
        ) -> Result<Vec<Message>, HistoryError> {
            self.reads
                .lock()
                .unwrap()
                .push((conversation_id.clone(), limit));
            match &self.failure {
                Some(e) => Err(e.clone()),
                None => Ok(self.messages.iter().take(limit).cloned().collect()),
            }
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl EventLogger for RecordingLogger {
        fn log(&self, event: EngineEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn message(id: &str, author: &str, content: &str, seq: u64) -> Message {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        Message::new(id, "c-1", author, content, seq, ts)
    }

    fn join(conv: Conversation, persona: &str) -> Conversation {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();
        conv.with_participant(Participant::new(persona, ParticipantRole::Responder, ts))
    }

    fn nova() -> Persona {
        Persona::new("ai-nova", "Nova", PersonaType::AiAgent)
            .with_knowledge(["technology"])
            .with_interactions([InteractionType::CasualChat])
            .with_personality(PersonalityTraits::uniform(50).with_agreeableness(90))
    }

    fn echo() -> Persona {
        Persona::new("ai-echo", "Echo", PersonaType::AiAmbiguous)
            .with_knowledge(["cooking"])
    }

    fn human() -> Persona {
        Persona::new("host", "Host", PersonaType::HumanPersona).with_owner("u-1")
    }

    fn conversation() -> Conversation {
        let conv = Conversation::new("c-1", "host").with_topic("Technology Trends");
        let conv = join(conv, "host");
        let conv = join(conv, "ai-nova");
        join(conv, "ai-echo")
    }

    #[tokio::test]
    async fn test_only_ai_participants_are_candidates() {
        let history = Arc::new(MockHistory::with(Vec::new()));
        let orchestrator = AiResponseOrchestrator::new(history.clone());
        let msg = message("m-1", "host", "hello there", 1);

        let triggers = orchestrator
            .analyze_response_triggers(&conversation(), &msg, &[human(), nova(), echo()])
            .await
            .unwrap();

        let ids: Vec<_> = triggers.iter().map(|t| t.persona_id.as_str()).collect();
        assert_eq!(triggers.len(), 2);
        assert!(ids.contains(&"ai-nova"));
        assert!(ids.contains(&"ai-echo"));
        assert_eq!(history.read_count(), 1);
    }

    #[tokio::test]
    async fn test_departed_participant_is_not_a_candidate() {
        let left_at = Utc.with_ymd_and_hms(2024, 5, 1, 11, 30, 0).unwrap();
        let joined = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();
        let conv = Conversation::new("c-1", "host")
            .with_participant(Participant::new("ai-nova", ParticipantRole::Responder, joined).left(left_at));
        let history = Arc::new(MockHistory::with(Vec::new()));
        let orchestrator = AiResponseOrchestrator::new(history.clone());

        let triggers = orchestrator
            .analyze_response_triggers(&conv, &message("m-1", "host", "hi?", 1), &[nova()])
            .await
            .unwrap();

        assert!(triggers.is_empty());
        assert_eq!(history.read_count(), 0);
    }

    #[tokio::test]
    async fn test_unresolvable_persona_is_skipped() {
        let history = Arc::new(MockHistory::with(Vec::new()));
        let orchestrator = AiResponseOrchestrator::new(history);
        let msg = message("m-1", "host", "Nova, what do you think?", 1);

        // ai-echo is a participant but missing from the roster
        let triggers = orchestrator
            .analyze_response_triggers(&conversation(), &msg, &[human(), nova()])
            .await
            .unwrap();

        assert_eq!(triggers.len(), 1);
        assert_eq!(triggers[0].persona_id.as_str(), "ai-nova");
    }

    #[tokio::test]
    async fn test_history_failure_propagates_as_retryable() {
        let history = Arc::new(MockHistory::failing(HistoryError::Timeout));
        let orchestrator = AiResponseOrchestrator::new(history);
        let msg = message("m-1", "host", "anyone?", 1);

        let err = orchestrator
            .analyze_response_triggers(&conversation(), &msg, &[nova(), echo()])
            .await
            .unwrap_err();

        assert_eq!(err, OrchestratorError::History(HistoryError::Timeout));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_self_authored_message_short_circuits() {
        let history = Arc::new(MockHistory::with(Vec::new()));
        let orchestrator = AiResponseOrchestrator::new(history);
        let msg = message("m-1", "ai-nova", "Nova here, what do you think?", 1);

        let triggers = orchestrator
            .analyze_response_triggers(&conversation(), &msg, &[nova()])
            .await
            .unwrap();

        let nova_trigger = triggers
            .iter()
            .find(|t| t.persona_id.as_str() == "ai-nova")
            .unwrap();
        assert!(!nova_trigger.should_respond);
        assert_eq!(nova_trigger.trigger_reason, "message from self");
        assert_eq!(nova_trigger.response_delay_ms, 0);
        assert_eq!(nova_trigger.response_confidence, 0.0);
    }

    #[tokio::test]
    async fn test_named_question_makes_persona_respond_first() {
        let history = Arc::new(MockHistory::with(vec![message(
            "m-0",
            "host",
            "Let's talk about technology",
            0,
        )]));
        let orchestrator = AiResponseOrchestrator::new(history);
        let msg = message(
            "m-1",
            "host",
            "Nova, what do you think about this new software?",
            1,
        );

        let triggers = orchestrator
            .analyze_response_triggers(&conversation(), &msg, &[human(), nova(), echo()])
            .await
            .unwrap();

        assert_eq!(triggers[0].persona_id.as_str(), "ai-nova");
        assert!(triggers[0].should_respond);
        assert!(triggers[0].response_delay_ms >= 500);
        assert!(triggers[0].response_delay_ms <= 10_000);
        assert!(
            triggers
                .windows(2)
                .all(|w| w[0].response_confidence >= w[1].response_confidence)
        );
    }

    #[tokio::test]
    async fn test_history_window_uses_configured_limit() {
        let history = Arc::new(MockHistory::with(Vec::new()));
        let config = OrchestratorConfig {
            history_limit: 4,
            ..OrchestratorConfig::default()
        };
        let orchestrator = AiResponseOrchestrator::with_config(history.clone(), config);

        orchestrator
            .analyze_response_triggers(&conversation(), &message("m-1", "host", "hi", 1), &[nova()])
            .await
            .unwrap();

        let reads = history.reads.lock().unwrap();
        assert_eq!(reads[0].1, 4);
        assert_eq!(reads[0].0.as_str(), "c-1");
    }

    #[tokio::test]
    async fn test_each_candidate_logs_an_evaluation_event() {
        let history = Arc::new(MockHistory::with(Vec::new()));
        let logger = Arc::new(RecordingLogger::default());
        let orchestrator =
            AiResponseOrchestrator::new(history).with_event_logger(logger.clone());

        orchestrator
            .analyze_response_triggers(
                &conversation(),
                &message("m-1", "host", "hello", 1),
                &[human(), nova(), echo()],
            )
            .await
            .unwrap();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec!["trigger_evaluated", "trigger_evaluated"]
        );
    }
}
