//! Over-participation penalty and response delay.

use crate::conversation::Message;
use crate::core::ids::PersonaId;
use crate::persona::PersonalityTraits;
use serde::{Deserialize, Serialize};

/// Participation share above which a persona starts being dampened.
pub const PARTICIPATION_THRESHOLD: f64 = 0.4;
/// Maximum dampening applied to a dominant persona.
pub const MAX_FREQUENCY_PENALTY: f64 = 0.6;

/// Shortest delay any scored trigger may carry.
pub const MIN_DELAY_MS: u64 = 500;
/// Longest delay any scored trigger may carry.
pub const MAX_DELAY_MS: u64 = 10_000;
/// Lowest jitter factor a policy may use.
pub const JITTER_FLOOR: f64 = 0.7;
/// Highest jitter factor a policy may use.
pub const JITTER_CEILING: f64 = 1.3;

/// Share of `history` authored by `persona_id`; zero for an empty window.
pub fn participation_ratio(persona_id: &PersonaId, history: &[Message]) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let own = history.iter().filter(|m| m.is_authored_by(persona_id)).count();
    own as f64 / history.len() as f64
}

/// Penalty for a persona that dominates the recent window.
///
/// Zero up to a 0.4 share, then rising linearly at twice the excess,
/// capped at 0.6.
pub fn frequency_penalty(participation_ratio: f64) -> f64 {
    if participation_ratio > PARTICIPATION_THRESHOLD {
        ((participation_ratio - PARTICIPATION_THRESHOLD) * 2.0).min(MAX_FREQUENCY_PENALTY)
    } else {
        0.0
    }
}

/// Parameters of the response-delay formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DelayPolicy {
    pub base_ms: f64,
    pub min_ms: u64,
    pub max_ms: u64,
    pub jitter_min: f64,
    pub jitter_max: f64,
}

impl Default for DelayPolicy {
    fn default() -> Self {
        Self {
            base_ms: 2000.0,
            min_ms: MIN_DELAY_MS,
            max_ms: MAX_DELAY_MS,
            jitter_min: JITTER_FLOOR,
            jitter_max: JITTER_CEILING,
        }
    }
}

impl DelayPolicy {
    /// Delay in milliseconds before a persona replies.
    ///
    /// Extraverted personas answer sooner, conscientious ones take a little
    /// longer, and confidence shortens the wait. `jitter` is clamped into the
    /// policy's jitter range and the result into `[min_ms, max_ms]`. Both
    /// ranges are first narrowed to [0.7, 1.3] and [500, 10000] ms, so a
    /// loose policy can never produce a delay outside those bounds.
    pub fn response_delay(
        &self,
        personality: &PersonalityTraits,
        confidence: f64,
        jitter: f64,
    ) -> u64 {
        let extraversion = f64::from(personality.extraversion.min(100));
        let conscientiousness = f64::from(personality.conscientiousness.min(100));
        let confidence = super::scoring::clamp_unit(confidence);
        let (jitter_min, jitter_max) = self.jitter_range();
        let jitter = if jitter.is_nan() {
            1.0
        } else {
            jitter.clamp(jitter_min, jitter_max)
        };

        let delay = self.base_ms
            * ((150.0 - extraversion) / 100.0)
            * ((50.0 + conscientiousness) / 100.0)
            * (2.0 - confidence)
            * jitter;

        let (min_ms, max_ms) = self.delay_range();
        (delay.round().max(0.0) as u64).clamp(min_ms, max_ms)
    }

    /// `[min_ms, max_ms]` narrowed to [`MIN_DELAY_MS`, `MAX_DELAY_MS`].
    fn delay_range(&self) -> (u64, u64) {
        let min = self.min_ms.clamp(MIN_DELAY_MS, MAX_DELAY_MS);
        let max = self.max_ms.clamp(min, MAX_DELAY_MS);
        (min, max)
    }

    /// `[jitter_min, jitter_max]` narrowed to [`JITTER_FLOOR`, `JITTER_CEILING`].
    fn jitter_range(&self) -> (f64, f64) {
        let narrow = |value: f64, floor: f64, fallback: f64| {
            if value.is_nan() {
                fallback
            } else {
                value.clamp(floor, JITTER_CEILING)
            }
        };
        let min = narrow(self.jitter_min, JITTER_FLOOR, JITTER_FLOOR);
        let max = narrow(self.jitter_max, min, JITTER_CEILING);
        (min, max)
    }
}
