//! Autonomous response scoring.
//!
//! Decides, for one AI persona and one new message, whether the persona
//! should reply, how confident it is, and how long it should wait.
//!
//! ```text
//!  topic relevance ──────── ×0.30 ┐
//!  personality alignment ── ×0.25 ├─ raw total ── ×(1 - frequency penalty) ── > 0.30 ?
//!  conversation flow ────── ×0.25 │
//!  direct mention ───────── ×0.20 ┘
//! ```
//!
//! - [`scoring`]: the four score primitives
//! - [`timing`]: frequency penalty and response delay
//! - [`scorer::CandidateScorer`]: combines them into an [`AiResponseTrigger`]

pub mod keywords;
pub mod scorer;
pub mod scoring;
pub mod timing;
pub mod trigger;

pub use scorer::{CandidateInput, CandidateScorer, ScoringWeights};
pub use timing::{DelayPolicy, frequency_penalty, participation_ratio};
pub use trigger::{AiResponseTrigger, REASON_SELF, ScoreBreakdown, TriggerDecision};
