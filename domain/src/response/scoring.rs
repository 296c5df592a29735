//! Score primitives for one (persona, message, history) triple.
//!
//! Every function returns a value clamped to [0, 1]. History slices are
//! ordered newest first, as returned by the recent-message read.

use super::keywords::{AI_DIRECTED_RE, CREATIVE_RE, GREETING_RE, HELP_RE, keywords_for};
use crate::conversation::Message;
use crate::core::ids::PersonaId;
use crate::persona::{InteractionType, Persona, PersonalityTraits};
use crate::util::{has_keyword, phrase_regex, word_set};
use std::collections::HashSet;

/// Value of one knowledge-keyword hit.
const KEYWORD_HIT: f64 = 0.25;
/// Ceiling of the knowledge-keyword part of topic relevance.
const KEYWORD_CAP: f64 = 0.5;
/// Weight of the topic/content word-overlap ratio.
const TOPIC_OVERLAP_WEIGHT: f64 = 0.3;
/// Flat bonus when the persona accepts the message's interaction type.
const INTERACTION_BONUS: f64 = 0.2;

/// Weight of each matched trait pattern in personality alignment.
const TRAIT_PATTERN_WEIGHT: f64 = 0.3;
/// Ceiling of the communication-style part of personality alignment.
const STYLE_WEIGHT: f64 = 0.1;

/// Gap between messages above which a conversation counts as slow.
const SLOW_GAP_SECONDS: f64 = 300.0;
/// Number of newest messages inspected for voice diversity.
const DIVERSITY_WINDOW: usize = 5;

pub const MENTION_BY_NAME: f64 = 0.9;
pub const MENTION_AI_DIRECTED: f64 = 0.6;
pub const MENTION_QUESTION: f64 = 0.3;

pub(crate) fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// How well the message matches the persona's knowledge and the conversation topic.
///
/// - up to 0.5 from knowledge-domain keyword hits (0.25 per distinct keyword)
/// - up to 0.3 from the share of topic words found in the message
/// - 0.2 when the persona accepts the message's interaction type
pub fn topic_relevance(persona: &Persona, content: &str, topic: &str) -> f64 {
    let phrase_hit = |phrase: &str| phrase_regex(phrase).is_some_and(|re| re.is_match(content));
    let words = word_set(content);

    let mut matched: HashSet<&str> = HashSet::new();
    for domain in &persona.knowledge {
        match keywords_for(domain) {
            Some(keywords) => {
                for keyword in keywords {
                    let hit = if keyword.contains(' ') {
                        phrase_hit(keyword)
                    } else {
                        has_keyword(&words, keyword)
                    };
                    if hit {
                        matched.insert(keyword);
                    }
                }
            }
            None => {
                if phrase_hit(domain) {
                    matched.insert(domain.as_str());
                }
            }
        }
    }
    let keyword_score = (matched.len() as f64 * KEYWORD_HIT).min(KEYWORD_CAP);

    let topic_words: HashSet<String> = word_set(topic)
        .into_iter()
        .filter(|w| w.chars().count() > 2)
        .collect();
    let topic_score = if topic_words.is_empty() {
        0.0
    } else {
        let overlap = topic_words.iter().filter(|w| words.contains(*w)).count();
        overlap as f64 / topic_words.len() as f64 * TOPIC_OVERLAP_WEIGHT
    };

    let interaction_score = if persona.allows_interaction(InteractionType::classify(content)) {
        INTERACTION_BONUS
    } else {
        0.0
    };

    clamp_unit(keyword_score + topic_score + interaction_score)
}

/// How well the message's tone suits the persona's personality.
pub fn personality_alignment(persona: &Persona, content: &str) -> f64 {
    let traits = &persona.personality;
    let mut score = 0.0;

    if GREETING_RE.is_match(content) {
        score += PersonalityTraits::fraction(traits.extraversion) * TRAIT_PATTERN_WEIGHT;
    }
    if CREATIVE_RE.is_match(content) {
        score += PersonalityTraits::fraction(traits.openness) * TRAIT_PATTERN_WEIGHT;
    }
    if content.contains('?') || HELP_RE.is_match(content) {
        score += PersonalityTraits::fraction(traits.agreeableness) * TRAIT_PATTERN_WEIGHT;
    }

    let style_keywords = persona.communication_style.keywords();
    if !style_keywords.is_empty() {
        let words = word_set(content);
        let hits = style_keywords
            .iter()
            .filter(|k| has_keyword(&words, k))
            .count();
        score += hits as f64 / style_keywords.len() as f64 * STYLE_WEIGHT;
    }

    clamp_unit(score)
}

/// How much the conversation's rhythm invites this persona to speak.
///
/// - 0.4 if the persona has not posted in the window; otherwise 0.3 when
///   2-4 messages have passed since its last post, 0.5 when more than 4
/// - 0.2 when the average gap between window messages exceeds five minutes
/// - 0.3 when the newest five messages come from at most two personas
///
/// An empty window earns no diversity bonus: with no messages there is no
/// dominant pair of voices to break up, so a fresh conversation scores only
/// the "never posted" part.
pub fn conversation_flow(persona_id: &PersonaId, history: &[Message]) -> f64 {
    let mut score = 0.0;

    match history.iter().position(|m| m.is_authored_by(persona_id)) {
        None => score += 0.4,
        Some(since) if since > 4 => score += 0.5,
        Some(since) if since >= 2 => score += 0.3,
        Some(_) => {}
    }

    if average_gap_seconds(history).is_some_and(|gap| gap > SLOW_GAP_SECONDS) {
        score += 0.2;
    }

    if !history.is_empty() {
        let voices: HashSet<&PersonaId> = history
            .iter()
            .take(DIVERSITY_WINDOW)
            .map(|m| &m.author_persona_id)
            .collect();
        if voices.len() <= 2 {
            score += 0.3;
        }
    }

    clamp_unit(score)
}

/// Mean gap in seconds between consecutive messages, if there are at least two.
pub fn average_gap_seconds(history: &[Message]) -> Option<f64> {
    if history.len() < 2 {
        return None;
    }
    let mut stamps: Vec<_> = history.iter().map(|m| m.timestamp).collect();
    stamps.sort_unstable();

    let total: f64 = stamps
        .windows(2)
        .map(|w| (w[1] - w[0]).num_milliseconds() as f64 / 1000.0)
        .sum();
    Some(total / (stamps.len() - 1) as f64)
}

/// Whether and how directly the message addresses the persona.
pub fn direct_mention(persona: &Persona, content: &str) -> f64 {
    let lower = content.to_lowercase();
    let name = persona.name.trim().to_lowercase();

    if !name.is_empty() && lower.contains(&name) {
        MENTION_BY_NAME
    } else if AI_DIRECTED_RE.is_match(content) {
        MENTION_AI_DIRECTED
    } else if lower.contains('?') {
        MENTION_QUESTION
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persona::{CommunicationStyle, PersonaType};
    use chrono::{Duration, TimeZone, Utc};

    fn tech_persona() -> Persona {
        Persona::new("ai-1", "Nova", PersonaType::AiAgent)
            .with_knowledge(["technology"])
            .with_interactions([InteractionType::CasualChat, InteractionType::Debate])
    }

    fn history(authors: &[&str], gap_minutes: i64) -> Vec<Message> {
        let base = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let count = authors.len() as i64;
        authors
            .iter()
            .enumerate()
            .map(|(i, author)| {
                let seq = count - i as i64;
                Message::new(
                    format!("m-{seq}"),
                    "c-1",
                    *author,
                    "text",
                    seq as u64,
                    base + Duration::minutes(seq * gap_minutes),
                )
            })
            .collect()
    }

    #[test]
    fn test_topic_relevance_technology_question() {
        let score = topic_relevance(
            &tech_persona(),
            "What do you think about the new algorithm?",
            "Technology Trends",
        );
        assert!(score > 0.4, "score was {score}");
    }

    #[test]
    fn test_topic_relevance_keyword_cap() {
        let persona = tech_persona().with_interactions(Vec::<InteractionType>::new());
        let score = topic_relevance(
            &persona,
            "software hardware computer algorithm code",
            "",
        );
        assert!((score - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_topic_overlap_ratio() {
        let persona = Persona::new("ai-1", "Nova", PersonaType::AiAgent);
        let score = topic_relevance(&persona, "current trends are wild", "Technology Trends");
        assert!((score - 0.15).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_domain_matches_its_name() {
        let persona =
            Persona::new("ai-1", "Nova", PersonaType::AiAgent).with_knowledge(["astrology"]);
        let score = topic_relevance(&persona, "Astrology is fun", "");
        assert!((score - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_personality_greeting_scales_with_extraversion() {
        let shy = Persona::new("a", "A", PersonaType::AiAgent)
            .with_personality(PersonalityTraits::uniform(0).with_extraversion(10));
        let outgoing = Persona::new("b", "B", PersonaType::AiAgent)
            .with_personality(PersonalityTraits::uniform(0).with_extraversion(90));

        assert!(personality_alignment(&outgoing, "Hello everyone") > personality_alignment(&shy, "Hello everyone"));
        assert!((personality_alignment(&outgoing, "Hello everyone") - 0.27).abs() < 1e-9);
    }

    #[test]
    fn test_personality_style_keywords() {
        let persona = Persona::new("a", "A", PersonaType::AiAgent)
            .with_personality(PersonalityTraits::uniform(0))
            .with_style(CommunicationStyle::Technical);
        let score = personality_alignment(&persona, "the system code and data");
        assert!((score - 3.0 / 8.0 * 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_personality_is_clamped() {
        let persona = Persona::new("a", "A", PersonaType::AiAgent)
            .with_personality(PersonalityTraits::uniform(100))
            .with_style(CommunicationStyle::Casual);
        let score = personality_alignment(
            &persona,
            "hey hello, cool new idea, yeah can you help? lol awesome stuff, gonna chill",
        );
        assert!(score <= 1.0);
        assert!(score > 0.9);
    }

    #[test]
    fn test_flow_never_posted() {
        let h = history(&["x", "y", "z", "w", "v", "u"], 1);
        assert!((conversation_flow(&PersonaId::new("ai-1"), &h) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_flow_messages_since_last_post() {
        let me = PersonaId::new("me");
        let h = history(&["x", "y", "z", "me", "w", "v"], 1);
        assert!((conversation_flow(&me, &h) - 0.3).abs() < 1e-9);

        let h = history(&["x", "y", "z", "w", "v", "me"], 1);
        assert!((conversation_flow(&me, &h) - 0.5).abs() < 1e-9);

        let h = history(&["x", "me", "y", "z", "w", "v"], 1);
        assert!(conversation_flow(&me, &h).abs() < 1e-9);
    }

    #[test]
    fn test_flow_slow_conversation_bonus() {
        let h = history(&["x", "y", "z", "w", "v", "u"], 10);
        assert!((conversation_flow(&PersonaId::new("ai-1"), &h) - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_flow_low_diversity_bonus() {
        let h = history(&["x", "y", "x", "y", "x", "z"], 1);
        assert!((conversation_flow(&PersonaId::new("ai-1"), &h) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_flow_is_capped() {
        let me = PersonaId::new("me");
        let h = history(&["x", "x", "x", "x", "x", "me"], 30);
        assert!((conversation_flow(&me, &h) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_flow_empty_history() {
        // never posted, no diversity bonus without messages
        assert!((conversation_flow(&PersonaId::new("me"), &[]) - 0.4).abs() < 1e-9);
    }

    #[test]
    fn test_average_gap() {
        assert!(average_gap_seconds(&history(&["x"], 5)).is_none());
        let gap = average_gap_seconds(&history(&["x", "y", "z"], 2)).unwrap();
        assert!((gap - 120.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_mention_levels() {
        let persona = tech_persona();
        assert_eq!(direct_mention(&persona, "nova, are you there"), MENTION_BY_NAME);
        assert_eq!(
            direct_mention(&persona, "What do you think about the new algorithm?"),
            MENTION_AI_DIRECTED
        );
        assert_eq!(direct_mention(&persona, "Is it raining?"), MENTION_QUESTION);
        assert_eq!(direct_mention(&persona, "It is raining."), 0.0);
    }

    #[test]
    fn test_ai_directed_pattern_ignores_spacing() {
        let persona = tech_persona();
        for content in [
            "What do you think?",
            "What do you  think?",
            "What do you\nthink?",
            "what do you\tthink about it",
        ] {
            assert_eq!(direct_mention(&persona, content), MENTION_AI_DIRECTED, "{content:?}");
        }
    }

    #[test]
    fn test_multi_word_domain_keyword_ignores_spacing() {
        let persona = Persona::new("ai-1", "Sage", PersonaType::AiAgent)
            .with_knowledge(["philosophy"])
            .with_interactions(Vec::<InteractionType>::new());
        let score = topic_relevance(&persona, "Free\n will?", "");
        assert!((score - 0.25).abs() < 1e-9, "score was {score}");
    }

    #[test]
    fn test_name_mention_beats_question_pattern() {
        let persona = tech_persona();
        let plain = direct_mention(&persona, "What do you think about the new algorithm?");
        let named = direct_mention(&persona, "Nova, what do you think about the new algorithm?");
        assert!(named > plain);
    }
}
