//! Application-level configuration.
//!
//! These structs control how the use cases behave. They are built once
//! (usually from the infrastructure config loader) and injected at
//! construction; nothing here is global.

use colloquy_domain::{CandidateScorer, DelayPolicy, ScoringWeights};
use std::time::Duration;

/// Number of recent messages read for trigger analysis.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Trigger analysis configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrchestratorConfig {
    /// Size of the recent-message window.
    pub history_limit: usize,
    pub weights: ScoringWeights,
    /// A candidate responds when its adjusted score is strictly above this.
    pub threshold: f64,
    pub delay: DelayPolicy,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        let scorer = CandidateScorer::default();
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            weights: scorer.weights,
            threshold: scorer.threshold,
            delay: scorer.delay,
        }
    }
}

impl OrchestratorConfig {
    pub fn scorer(&self) -> CandidateScorer {
        CandidateScorer {
            weights: self.weights,
            threshold: self.threshold,
            delay: self.delay,
        }
    }
}

/// Response scheduling configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SchedulerConfig {
    /// Upper bound on a single generation call. `None` waits indefinitely.
    pub generation_timeout: Option<Duration>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            generation_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl SchedulerConfig {
    /// Creates a SchedulerConfig from an optional timeout in seconds.
    ///
    /// If `seconds` is `None`, no timeout is applied.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            generation_timeout: seconds.map(Duration::from_secs),
        }
    }
}
