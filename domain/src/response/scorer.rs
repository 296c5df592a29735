//! Candidate scoring: combines the primitives into one trigger.

use super::scoring::{
    MENTION_AI_DIRECTED, MENTION_BY_NAME, clamp_unit, conversation_flow, direct_mention,
    personality_alignment, topic_relevance,
};
use super::timing::{DelayPolicy, frequency_penalty, participation_ratio};
use super::trigger::{AiResponseTrigger, ScoreBreakdown, TriggerDecision};
use crate::conversation::{Conversation, Message};
use crate::persona::Persona;
use serde::{Deserialize, Serialize};

/// Weight of each score component in the total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub topic_relevance: f64,
    pub personality_alignment: f64,
    pub conversation_flow: f64,
    pub direct_mention: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            topic_relevance: 0.30,
            personality_alignment: 0.25,
            conversation_flow: 0.25,
            direct_mention: 0.20,
        }
    }
}

/// Everything the scorer needs besides the policy.
#[derive(Debug, Clone, Copy)]
pub struct CandidateInput<'a> {
    pub persona: &'a Persona,
    pub message: &'a Message,
    pub conversation: &'a Conversation,
    /// Recent listed messages, newest first.
    pub history: &'a [Message],
}

/// Scores one candidate persona against one message.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CandidateScorer {
    pub weights: ScoringWeights,
    /// A candidate responds when its adjusted total is strictly above this.
    pub threshold: f64,
    pub delay: DelayPolicy,
}

impl Default for CandidateScorer {
    fn default() -> Self {
        Self {
            weights: ScoringWeights::default(),
            threshold: 0.30,
            delay: DelayPolicy::default(),
        }
    }
}

impl CandidateScorer {
    /// Produce the trigger for `input`.
    ///
    /// `jitter` is the random delay factor, drawn by the caller.
    pub fn score(&self, input: &CandidateInput<'_>, jitter: f64) -> AiResponseTrigger {
        let persona = input.persona;
        if input.message.is_authored_by(&persona.id) {
            return AiResponseTrigger::self_authored(persona.id.clone());
        }

        let content = input.message.content.as_str();
        let topic = topic_relevance(persona, content, &input.conversation.topic);
        let personality = personality_alignment(persona, content);
        let flow = conversation_flow(&persona.id, input.history);
        let mention = direct_mention(persona, content);

        let w = &self.weights;
        let weighted_topic = w.topic_relevance * topic;
        let weighted_personality = w.personality_alignment * personality;
        let weighted_flow = w.conversation_flow * flow;
        let weighted_mention = w.direct_mention * mention;
        let raw_total = weighted_topic + weighted_personality + weighted_flow + weighted_mention;

        let penalty = frequency_penalty(participation_ratio(&persona.id, input.history));
        let adjusted_total = raw_total * (1.0 - penalty);

        let should_respond = adjusted_total > self.threshold;
        let confidence = clamp_unit(adjusted_total);
        let decision = if should_respond {
            TriggerDecision::Respond
        } else {
            TriggerDecision::Skip
        };

        let breakdown = ScoreBreakdown {
            topic_relevance: weighted_topic,
            personality_alignment: weighted_personality,
            conversation_flow: weighted_flow,
            direct_mention: weighted_mention,
            frequency_penalty: penalty,
            raw_total,
            adjusted_total,
            threshold: self.threshold,
            decision,
        };

        AiResponseTrigger {
            persona_id: persona.id.clone(),
            should_respond,
            response_delay_ms: self.delay.response_delay(&persona.personality, confidence, jitter),
            response_confidence: confidence,
            trigger_reason: describe(&breakdown, topic, personality, flow, mention),
            score_breakdown: Some(breakdown),
        }
    }
}

/// Human-readable summary of the strongest signals.
fn describe(b: &ScoreBreakdown, topic: f64, personality: f64, flow: f64, mention: f64) -> String {
    let mut signals = Vec::new();

    if mention >= MENTION_BY_NAME {
        signals.push("mentioned by name");
    } else if mention >= MENTION_AI_DIRECTED {
        signals.push("question aimed at AI participants");
    }
    if topic >= 0.5 {
        signals.push("strong topic relevance");
    }
    if personality >= 0.3 {
        signals.push("personality fits the message");
    }
    if flow >= 0.5 {
        signals.push("conversation invites a new voice");
    }
    if b.frequency_penalty > 0.0 {
        signals.push("dampened by recent participation");
    }

    let summary = if signals.is_empty() {
        "no strong signal".to_string()
    } else {
        signals.join(", ")
    };

    format!(
        "{}: score {:.2} vs threshold {:.2} ({})",
        b.decision, b.adjusted_total, b.threshold, summary
    )
}
