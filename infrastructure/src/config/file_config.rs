//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and reuse domain types where the shapes
//! already match.
//!
//! ```toml
//! [orchestrator]
//! history_limit = 10
//! threshold = 0.30
//!
//! [orchestrator.weights]
//! topic_relevance = 0.30
//! personality_alignment = 0.25
//! conversation_flow = 0.25
//! direct_mention = 0.20
//!
//! [orchestrator.delay]
//! base_ms = 2000.0
//! min_ms = 500
//! max_ms = 10000
//!
//! [scheduler]
//! generation_timeout_seconds = 30
//!
//! [logging]
//! event_log = "colloquy-events.jsonl"
//! ```

use colloquy_application::{OrchestratorConfig, SchedulerConfig};
use colloquy_domain::response::timing::{
    JITTER_CEILING, JITTER_FLOOR, MAX_DELAY_MS, MIN_DELAY_MS,
};
use colloquy_domain::{DelayPolicy, ScoringWeights};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("orchestrator.history_limit must be at least 1")]
    EmptyHistoryWindow,

    #[error("orchestrator.threshold must be within [0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    #[error("orchestrator.weights.{0} cannot be negative")]
    NegativeWeight(&'static str),

    #[error("orchestrator.weights.{0} must be a finite number")]
    NonFiniteWeight(&'static str),

    #[error("orchestrator.delay.base_ms must be a positive number, got {0}")]
    InvalidBaseDelay(f64),

    #[error("orchestrator.delay.min_ms ({min}) exceeds max_ms ({max})")]
    DelayBoundsInverted { min: u64, max: u64 },

    #[error("orchestrator.delay jitter_min ({min}) exceeds jitter_max ({max})")]
    JitterBoundsInverted { min: f64, max: f64 },

    #[error("orchestrator.delay min_ms/max_ms ({min}..{max}) must lie within [500, 10000]")]
    DelayOutOfRange { min: u64, max: u64 },

    #[error("orchestrator.delay jitter_min/jitter_max ({min}..{max}) must lie within [0.7, 1.3]")]
    JitterOutOfRange { min: f64, max: f64 },

    #[error("scheduler.generation_timeout_seconds cannot be 0")]
    InvalidTimeout,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub orchestrator: FileOrchestratorConfig,
    pub scheduler: FileSchedulerConfig,
    pub logging: FileLoggingConfig,
}

/// Raw `[orchestrator]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOrchestratorConfig {
    /// Number of recent messages read per analysis
    pub history_limit: usize,
    /// Minimum adjusted score for a persona to reply
    pub threshold: f64,
    pub weights: ScoringWeights,
    pub delay: DelayPolicy,
}

impl Default for FileOrchestratorConfig {
    fn default() -> Self {
        OrchestratorConfig::default().into()
    }
}

impl From<OrchestratorConfig> for FileOrchestratorConfig {
    fn from(config: OrchestratorConfig) -> Self {
        Self {
            history_limit: config.history_limit,
            threshold: config.threshold,
            weights: config.weights,
            delay: config.delay,
        }
    }
}

impl From<&FileOrchestratorConfig> for OrchestratorConfig {
    fn from(file: &FileOrchestratorConfig) -> Self {
        Self {
            history_limit: file.history_limit,
            weights: file.weights,
            threshold: file.threshold,
            delay: file.delay,
        }
    }
}

/// Raw `[scheduler]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileSchedulerConfig {
    /// Upper bound on one generation call, in seconds
    pub generation_timeout_seconds: u64,
}

impl Default for FileSchedulerConfig {
    fn default() -> Self {
        Self {
            generation_timeout_seconds: 30,
        }
    }
}

impl From<&FileSchedulerConfig> for SchedulerConfig {
    fn from(file: &FileSchedulerConfig) -> Self {
        SchedulerConfig::from_timeout_seconds(Some(file.generation_timeout_seconds))
    }
}

/// Raw `[logging]` section
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL file receiving engine decision events
    pub event_log: Option<PathBuf>,
    /// Diagnostic log file, written in addition to stderr
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        let orchestrator = &self.orchestrator;

        if orchestrator.history_limit == 0 {
            return Err(ConfigValidationError::EmptyHistoryWindow);
        }

        if !(0.0..=1.0).contains(&orchestrator.threshold) {
            return Err(ConfigValidationError::ThresholdOutOfRange(
                orchestrator.threshold,
            ));
        }

        let weights = &orchestrator.weights;
        for (name, value) in [
            ("topic_relevance", weights.topic_relevance),
            ("personality_alignment", weights.personality_alignment),
            ("conversation_flow", weights.conversation_flow),
            ("direct_mention", weights.direct_mention),
        ] {
            if !value.is_finite() {
                return Err(ConfigValidationError::NonFiniteWeight(name));
            }
            if value < 0.0 {
                return Err(ConfigValidationError::NegativeWeight(name));
            }
        }

        let delay = &orchestrator.delay;
        if !(delay.base_ms.is_finite() && delay.base_ms > 0.0) {
            return Err(ConfigValidationError::InvalidBaseDelay(delay.base_ms));
        }
        if delay.min_ms > delay.max_ms {
            return Err(ConfigValidationError::DelayBoundsInverted {
                min: delay.min_ms,
                max: delay.max_ms,
            });
        }
        if delay.min_ms < MIN_DELAY_MS || delay.max_ms > MAX_DELAY_MS {
            return Err(ConfigValidationError::DelayOutOfRange {
                min: delay.min_ms,
                max: delay.max_ms,
            });
        }
        if delay.jitter_min > delay.jitter_max {
            return Err(ConfigValidationError::JitterBoundsInverted {
                min: delay.jitter_min,
                max: delay.jitter_max,
            });
        }
        let jitter_bounds = JITTER_FLOOR..=JITTER_CEILING;
        if !(jitter_bounds.contains(&delay.jitter_min) && jitter_bounds.contains(&delay.jitter_max)) {
            return Err(ConfigValidationError::JitterOutOfRange {
                min: delay.jitter_min,
                max: delay.jitter_max,
            });
        }

        if self.scheduler.generation_timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        Ok(())
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        (&self.orchestrator).into()
    }

    pub fn scheduler_config(&self) -> SchedulerConfig {
        (&self.scheduler).into()
    }
}
