//! Response triggers: the per-persona output of trigger analysis.

use crate::core::ids::PersonaId;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Trigger reason for a persona that authored the message itself.
pub const REASON_SELF: &str = "message from self";

/// Final decision recorded in a [`ScoreBreakdown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerDecision {
    Respond,
    Skip,
}

impl TriggerDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerDecision::Respond => "respond",
            TriggerDecision::Skip => "skip",
        }
    }
}

impl std::fmt::Display for TriggerDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Weighted component scores behind a decision.
///
/// For observability only; callers should not re-derive decisions from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub topic_relevance: f64,
    pub personality_alignment: f64,
    pub conversation_flow: f64,
    pub direct_mention: f64,
    pub frequency_penalty: f64,
    /// Weighted sum before the frequency penalty.
    pub raw_total: f64,
    /// `raw_total * (1 - frequency_penalty)`.
    pub adjusted_total: f64,
    pub threshold: f64,
    pub decision: TriggerDecision,
}

/// Whether, when, and how confidently a persona should reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiResponseTrigger {
    pub persona_id: PersonaId,
    pub should_respond: bool,
    /// Milliseconds to wait before generating; 500-10000 for scored candidates.
    pub response_delay_ms: u64,
    pub response_confidence: f64,
    pub trigger_reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_breakdown: Option<ScoreBreakdown>,
}

impl AiResponseTrigger {
    /// The fixed non-response for a persona reacting to its own message.
    pub fn self_authored(persona_id: PersonaId) -> Self {
        Self {
            persona_id,
            should_respond: false,
            response_delay_ms: 0,
            response_confidence: 0.0,
            trigger_reason: REASON_SELF.to_string(),
            score_breakdown: None,
        }
    }

    pub fn response_delay(&self) -> Duration {
        Duration::from_millis(self.response_delay_ms)
    }
}
