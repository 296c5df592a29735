//! Conversation authorization.
//!
//! Permissions are decided by a fixed-order registry of independent rules.
//! Every rule sees the same [`PermissionContext`] and returns a partial
//! [`RuleOutcome`]; the [`PermissionEngine`] merges them:
//!
//! ```text
//! ┌──────────┐   ┌──────────┐   ┌─────────────┐   ┌───────────────┐
//! │ View     │ → │ Message  │ → │ Management  │ → │ AdminOverride │
//! └────┬─────┘   └────┬─────┘   └──────┬──────┘   └───────┬───────┘
//!      └──────────────┴──── OR-merge ──┴──────────────────┘
//!                            │
//!                     PermissionResult
//! ```
//!
//! - Boolean fields are OR-merged: a `false` never clears a `true`.
//! - The first non-empty reason in registry order wins.
//! - Constraint maps are shallow-merged, later rules overwriting earlier keys.

pub mod context;
pub mod engine;
pub mod rule;
pub mod set;

pub use context::{PermissionAction, PermissionContext, PermissionMetadata, ResourceType};
pub use engine::{PermissionEngine, PermissionVerdict};
pub use rule::PermissionRule;
pub use set::{PermissionGrant, PermissionResult, PermissionSet, RuleOutcome};
