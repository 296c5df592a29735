//! Permission engine: runs the rule registry and merges the outcomes.

use super::context::{PermissionAction, PermissionContext, PermissionMetadata};
use super::rule::PermissionRule;
use super::set::PermissionResult;
use crate::conversation::Conversation;
use crate::core::ids::PersonaId;
use crate::user::User;

/// Projection of a [`PermissionResult`] onto a single capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionVerdict {
    pub granted: bool,
    pub reason: Option<String>,
}

/// Evaluates an ordered list of [`PermissionRule`]s.
///
/// Stateless and infallible: the result depends only on the context passed
/// in, and missing metadata degrades to an all-false result.
///
/// # Example
///
/// ```
/// use colloquy_domain::{Conversation, PermissionEngine, User, Visibility};
///
/// let engine = PermissionEngine::default();
/// let conv = Conversation::new("c-1", "host").with_visibility(Visibility::Public);
///
/// assert!(engine.can_user_view_conversation(&User::regular("u-1"), &conv, &[]));
/// ```
#[derive(Debug, Clone)]
pub struct PermissionEngine {
    rules: Vec<PermissionRule>,
}

impl Default for PermissionEngine {
    fn default() -> Self {
        Self::with_rules(PermissionRule::DEFAULT_ORDER.to_vec())
    }
}

impl PermissionEngine {
    /// Engine with a custom registry; the order defines reason precedence.
    pub fn with_rules(rules: Vec<PermissionRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[PermissionRule] {
        &self.rules
    }

    /// Run every rule once, in order, and merge the outcomes.
    pub fn evaluate_permissions(&self, ctx: &PermissionContext<'_>) -> PermissionResult {
        self.rules
            .iter()
            .fold(PermissionResult::denied(), |mut result, rule| {
                result.merge(rule.evaluate(ctx));
                result
            })
    }

    pub fn can_user_view_conversation(
        &self,
        user: &User,
        conversation: &Conversation,
        owned_persona_ids: &[PersonaId],
    ) -> bool {
        self.check(user, PermissionAction::View, conversation, owned_persona_ids, None)
            .granted
    }

    /// Whether `user` may post to `conversation` as `persona_id`.
    pub fn can_user_post_message(
        &self,
        user: &User,
        conversation: &Conversation,
        persona_id: &PersonaId,
        owned_persona_ids: &[PersonaId],
    ) -> PermissionVerdict {
        self.check(
            user,
            PermissionAction::AddMessage,
            conversation,
            owned_persona_ids,
            Some(persona_id),
        )
    }

    pub fn can_user_join_conversation(
        &self,
        user: &User,
        conversation: &Conversation,
        owned_persona_ids: &[PersonaId],
    ) -> bool {
        self.check(user, PermissionAction::Join, conversation, owned_persona_ids, None)
            .granted
    }

    /// Whether `user` may close the conversation.
    pub fn can_user_manage_conversation(
        &self,
        user: &User,
        conversation: &Conversation,
        owned_persona_ids: &[PersonaId],
    ) -> bool {
        self.check(user, PermissionAction::Close, conversation, owned_persona_ids, None)
            .granted
    }

    pub fn can_user_delete_conversation(
        &self,
        user: &User,
        conversation: &Conversation,
        owned_persona_ids: &[PersonaId],
    ) -> bool {
        self.check(user, PermissionAction::Delete, conversation, owned_persona_ids, None)
            .granted
    }

    fn check(
        &self,
        user: &User,
        action: PermissionAction,
        conversation: &Conversation,
        owned_persona_ids: &[PersonaId],
        target: Option<&PersonaId>,
    ) -> PermissionVerdict {
        let mut metadata = PermissionMetadata::owning(owned_persona_ids.to_vec());
        metadata.target_persona_id = target.cloned();

        let ctx = PermissionContext::new(user, action, conversation).with_metadata(metadata);
        let result = self.evaluate_permissions(&ctx);

        PermissionVerdict {
            granted: result.permissions.allows(action),
            reason: result.reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::conversation::{ConversationStatus, Participant, ParticipantRole, Visibility};
    use crate::permission::rule::{REASON_CLOSED, REASON_NOT_OWNER};
    use chrono::Utc;

    fn ids(raw: &[&str]) -> Vec<PersonaId> {
        raw.iter().map(|s| PersonaId::new(*s)).collect()
    }

    fn conversation() -> Conversation {
        Conversation::new("c-1", "host")
            .with_topic("Technology Trends")
            .with_participant(Participant::new("host", ParticipantRole::Initiator, Utc::now()))
            .with_participant(Participant::new("guest", ParticipantRole::Responder, Utc::now()))
    }

    #[test]
    fn test_default_registry_order() {
        assert_eq!(
            PermissionEngine::default().rules(),
            &PermissionRule::DEFAULT_ORDER
        );
    }

    #[test]
    fn test_empty_metadata_is_all_false() {
        let engine = PermissionEngine::default();
        let user = User::regular("u-1");
        let conv = conversation();
        let ctx = PermissionContext::new(&user, PermissionAction::Evaluate, &conv);

        let result = engine.evaluate_permissions(&ctx);
        assert!(!result.allowed);
        assert!(!result.permissions.any());
        assert!(result.reason.is_none());
        assert!(result.constraints.is_none());
    }

    #[test]
    fn test_public_outsider_can_view_and_join_but_not_post() {
        let engine = PermissionEngine::default();
        let user = User::regular("u-1");
        let conv = conversation().with_visibility(Visibility::Public);
        let ctx = PermissionContext::new(&user, PermissionAction::Evaluate, &conv)
            .with_metadata(PermissionMetadata::owning(ids(&["stranger"])));

        let result = engine.evaluate_permissions(&ctx);
        assert!(result.permissions.can_view);
        assert!(result.permissions.can_join);
        assert!(!result.permissions.can_add_message);
        assert!(result.allowed);
    }

    #[test]
    fn test_admin_can_always_view() {
        let engine = PermissionEngine::default();
        let admin = User::admin("root");
        for conv in [
            conversation(),
            conversation().with_visibility(Visibility::Unlisted),
            conversation().with_status(ConversationStatus::Terminated),
        ] {
            assert!(engine.can_user_view_conversation(&admin, &conv, &[]));
        }
    }

    #[test]
    fn test_admin_cannot_post_without_owning_persona() {
        let engine = PermissionEngine::default();
        let admin = User::admin("root");
        let verdict =
            engine.can_user_post_message(&admin, &conversation(), &PersonaId::new("guest"), &[]);
        assert!(!verdict.granted);
        assert_eq!(verdict.reason.as_deref(), Some(REASON_NOT_OWNER));
    }

    #[test]
    fn test_post_to_closed_conversation() {
        let engine = PermissionEngine::default();
        let user = User::regular("u-1");
        let mut conv = conversation();
        conv.can_add_messages = false;

        let verdict =
            engine.can_user_post_message(&user, &conv, &PersonaId::new("guest"), &ids(&["guest"]));
        assert!(!verdict.granted);
        assert!(verdict.reason.unwrap().contains("closed"));
        assert_eq!(
            engine
                .can_user_post_message(&user, &conv, &PersonaId::new("guest"), &ids(&["guest"]))
                .reason
                .as_deref(),
            Some(REASON_CLOSED)
        );
    }

    #[test]
    fn test_post_as_unowned_persona() {
        let engine = PermissionEngine::default();
        let user = User::regular("u-1");
        let verdict = engine.can_user_post_message(
            &user,
            &conversation(),
            &PersonaId::new("guest"),
            &ids(&["host"]),
        );
        assert!(!verdict.granted);
        assert_eq!(verdict.reason.as_deref(), Some("user does not own this persona"));
    }

    #[test]
    fn test_post_as_owned_participant() {
        let engine = PermissionEngine::default();
        let user = User::regular("u-1");
        let verdict = engine.can_user_post_message(
            &user,
            &conversation(),
            &PersonaId::new("guest"),
            &ids(&["guest"]),
        );
        assert!(verdict.granted);
        assert!(verdict.reason.is_none());
    }

    #[test]
    fn test_true_survives_regardless_of_rule_order() {
        let user = User::admin("root");
        let conv = conversation().with_visibility(Visibility::Public);
        let owned = ids(&["host"]);

        let orders = [
            PermissionRule::DEFAULT_ORDER.to_vec(),
            PermissionRule::DEFAULT_ORDER.iter().rev().copied().collect(),
            vec![
                PermissionRule::Message,
                PermissionRule::AdminOverride,
                PermissionRule::View,
                PermissionRule::Management,
            ],
        ];

        let results: Vec<_> = orders
            .into_iter()
            .map(|rules| {
                let ctx = PermissionContext::new(&user, PermissionAction::Evaluate, &conv)
                    .with_metadata(PermissionMetadata::owning(owned.clone()));
                PermissionEngine::with_rules(rules).evaluate_permissions(&ctx)
            })
            .collect();

        for result in &results {
            assert_eq!(result.permissions, results[0].permissions);
            assert!(result.permissions.can_view);
            assert!(result.permissions.can_delete);
            assert!(result.permissions.can_close);
            // initiator owner participates, so posting is open
            assert!(result.permissions.can_add_message);
        }
    }

    #[test]
    fn test_reason_follows_registry_order() {
        let user = User::regular("u-1");
        let mut conv = conversation();
        conv.can_add_messages = false;
        let ctx = PermissionContext::new(&user, PermissionAction::AddMessage, &conv)
            .with_metadata(PermissionMetadata::owning(ids(&["guest"])).acting_as("guest"));

        let result = PermissionEngine::default().evaluate_permissions(&ctx);
        assert_eq!(result.reason.as_deref(), Some(REASON_CLOSED));

        // a registry without the message rule reports no reason at all
        let without_message = PermissionEngine::with_rules(vec![
            PermissionRule::View,
            PermissionRule::Management,
        ]);
        assert!(without_message.evaluate_permissions(&ctx).reason.is_none());
    }

    #[test]
    fn test_manage_and_delete_wrappers() {
        let engine = PermissionEngine::default();
        let user = User::regular("u-1");
        let conv = conversation();

        assert!(engine.can_user_manage_conversation(&user, &conv, &ids(&["host"])));
        assert!(!engine.can_user_manage_conversation(&user, &conv, &ids(&["guest"])));
        assert!(!engine.can_user_delete_conversation(&user, &conv, &ids(&["host"])));
        assert!(engine.can_user_delete_conversation(&User::admin("root"), &conv, &[]));
    }

    #[test]
    fn test_join_wrapper() {
        let engine = PermissionEngine::default();
        let user = User::regular("u-1");
        assert!(!engine.can_user_join_conversation(&user, &conversation(), &[]));
        assert!(engine.can_user_join_conversation(
            &user,
            &conversation().with_visibility(Visibility::Public),
            &[]
        ));
    }
}
