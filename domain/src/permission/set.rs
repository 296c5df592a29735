//! Permission vectors and rule results.

use super::context::PermissionAction;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The seven capabilities a caller may hold on a conversation.
///
/// Every field defaults to `false`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionSet {
    pub can_view: bool,
    pub can_add_message: bool,
    pub can_join: bool,
    pub can_close: bool,
    pub can_add_participant: bool,
    pub can_remove_participant: bool,
    pub can_delete: bool,
}

impl PermissionSet {
    /// Whether this set grants `action`.
    ///
    /// [`PermissionAction::Evaluate`] asks for no specific capability and is
    /// granted when anything at all is.
    pub fn allows(&self, action: PermissionAction) -> bool {
        match action {
            PermissionAction::View => self.can_view,
            PermissionAction::AddMessage => self.can_add_message,
            PermissionAction::Join => self.can_join,
            PermissionAction::Close => self.can_close,
            PermissionAction::AddParticipant => self.can_add_participant,
            PermissionAction::RemoveParticipant => self.can_remove_participant,
            PermissionAction::Delete => self.can_delete,
            PermissionAction::Evaluate => self.any(),
        }
    }

    pub fn any(&self) -> bool {
        self.can_view
            || self.can_add_message
            || self.can_join
            || self.can_close
            || self.can_add_participant
            || self.can_remove_participant
            || self.can_delete
    }

    /// OR every asserted field of `grant` into this set.
    ///
    /// An asserted `false` is a no-op: once a field is `true` it stays `true`.
    pub fn absorb(&mut self, grant: &PermissionGrant) {
        fn or(field: &mut bool, asserted: Option<bool>) {
            if asserted == Some(true) {
                *field = true;
            }
        }

        or(&mut self.can_view, grant.can_view);
        or(&mut self.can_add_message, grant.can_add_message);
        or(&mut self.can_join, grant.can_join);
        or(&mut self.can_close, grant.can_close);
        or(&mut self.can_add_participant, grant.can_add_participant);
        or(&mut self.can_remove_participant, grant.can_remove_participant);
        or(&mut self.can_delete, grant.can_delete);
    }
}

/// Partial permission assertions returned by a single rule.
///
/// `None` means the rule has no opinion on that field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionGrant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_view: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_add_message: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_join: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_close: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_add_participant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_remove_participant: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_delete: Option<bool>,
}

impl PermissionGrant {
    /// Whether any field is asserted `true`.
    pub fn grants_anything(&self) -> bool {
        [
            self.can_view,
            self.can_add_message,
            self.can_join,
            self.can_close,
            self.can_add_participant,
            self.can_remove_participant,
            self.can_delete,
        ]
        .contains(&Some(true))
    }
}

/// What one rule reports for one context.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RuleOutcome {
    pub allowed: bool,
    pub reason: Option<String>,
    pub grant: PermissionGrant,
    pub constraints: BTreeMap<String, serde_json::Value>,
}

impl RuleOutcome {
    /// An outcome with no assertions.
    pub fn abstain() -> Self {
        Self::default()
    }

    /// An outcome carrying `grant`; `allowed` follows whether it grants anything.
    pub fn from_grant(grant: PermissionGrant) -> Self {
        Self {
            allowed: grant.grants_anything(),
            grant,
            ..Self::default()
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_constraint(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.constraints.insert(key.into(), value);
        self
    }
}

/// The merged decision for one request.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PermissionResult {
    pub allowed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub permissions: PermissionSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constraints: Option<BTreeMap<String, serde_json::Value>>,
}

impl PermissionResult {
    /// All-false, not allowed, no reason, no constraints.
    pub fn denied() -> Self {
        Self::default()
    }

    /// Fold one rule outcome into this result.
    pub fn merge(&mut self, outcome: RuleOutcome) {
        self.permissions.absorb(&outcome.grant);
        self.allowed |= outcome.allowed;

        if self.reason.is_none()
            && let Some(reason) = outcome.reason.filter(|r| !r.is_empty())
        {
            self.reason = Some(reason);
        }

        if !outcome.constraints.is_empty() {
            self.constraints
                .get_or_insert_with(BTreeMap::new)
                .extend(outcome.constraints);
        }
    }
}
