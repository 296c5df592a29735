//! Independent permission rules.
//!
//! Each variant inspects the context on its own and asserts only the fields
//! it is responsible for. Rules never see each other's output.

use super::context::PermissionContext;
use super::set::{PermissionGrant, RuleOutcome};
use crate::conversation::Visibility;
use serde::{Deserialize, Serialize};

/// Denial reason when the conversation does not accept messages.
pub const REASON_CLOSED: &str = "conversation is closed for new messages";
/// Denial reason when the caller posts as a persona they do not own.
pub const REASON_NOT_OWNER: &str = "user does not own this persona";
/// Denial reason when the target persona is not an active participant.
pub const REASON_NOT_PARTICIPANT: &str = "persona is not a participant in this conversation";

/// A permission rule.
///
/// The order rules are registered in decides which denial reason a caller
/// sees when several rules report one; see [`PermissionRule::DEFAULT_ORDER`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionRule {
    /// Public visibility or active participation grants viewing.
    View,
    /// Sole authority over `can_add_message`.
    Message,
    /// Owners of the initiator persona manage the conversation.
    Management,
    /// Admins can view and manage anything, but never post.
    AdminOverride,
}

impl PermissionRule {
    /// Registry order used by [`PermissionEngine::default`](super::PermissionEngine).
    ///
    /// `Message` precedes the others so its denial reason is the one
    /// reported to a caller who cannot post.
    pub const DEFAULT_ORDER: [PermissionRule; 4] = [
        PermissionRule::View,
        PermissionRule::Message,
        PermissionRule::Management,
        PermissionRule::AdminOverride,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PermissionRule::View => "view",
            PermissionRule::Message => "message",
            PermissionRule::Management => "management",
            PermissionRule::AdminOverride => "admin_override",
        }
    }

    pub fn evaluate(&self, ctx: &PermissionContext<'_>) -> RuleOutcome {
        match self {
            PermissionRule::View => view(ctx),
            PermissionRule::Message => message(ctx),
            PermissionRule::Management => management(ctx),
            PermissionRule::AdminOverride => admin_override(ctx),
        }
    }
}

impl std::fmt::Display for PermissionRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

fn view(ctx: &PermissionContext<'_>) -> RuleOutcome {
    let mut grant = PermissionGrant::default();

    if ctx.resource.visibility == Visibility::Public {
        grant.can_view = Some(true);
        grant.can_join = Some(true);
    }

    // Participants can see the conversation; they have nothing left to join.
    if ctx.caller_participates() {
        grant.can_view = Some(true);
    }

    RuleOutcome::from_grant(grant)
}

fn message(ctx: &PermissionContext<'_>) -> RuleOutcome {
    let deny = |reason: &str| {
        RuleOutcome::from_grant(PermissionGrant {
            can_add_message: Some(false),
            ..Default::default()
        })
        .with_reason(reason)
    };

    if !ctx.resource.accepts_messages() {
        return deny(REASON_CLOSED);
    }

    let Some(target) = ctx.metadata.target_persona_id.as_ref() else {
        return RuleOutcome::from_grant(PermissionGrant {
            can_add_message: Some(ctx.caller_participates()),
            ..Default::default()
        });
    };

    if !ctx.metadata.owns(target) {
        deny(REASON_NOT_OWNER)
    } else if !ctx.resource.is_active_participant(target) {
        deny(REASON_NOT_PARTICIPANT)
    } else {
        RuleOutcome::from_grant(PermissionGrant {
            can_add_message: Some(true),
            ..Default::default()
        })
    }
}

fn management(ctx: &PermissionContext<'_>) -> RuleOutcome {
    if !ctx.metadata.owns(&ctx.resource.initiator_persona_id) {
        return RuleOutcome::abstain();
    }

    RuleOutcome::from_grant(PermissionGrant {
        can_close: Some(true),
        can_add_participant: Some(true),
        can_remove_participant: Some(true),
        ..Default::default()
    })
}

fn admin_override(ctx: &PermissionContext<'_>) -> RuleOutcome {
    if !ctx.user.is_admin() {
        return RuleOutcome::abstain();
    }

    // No can_add_message: an admin still posts only as a persona they own.
    RuleOutcome::from_grant(PermissionGrant {
        can_view: Some(true),
        can_close: Some(true),
        can_add_participant: Some(true),
        can_remove_participant: Some(true),
        can_delete: Some(true),
        ..Default::default()
    })
}
