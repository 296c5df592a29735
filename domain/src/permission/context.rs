//! Request context handed to every permission rule.

use crate::conversation::Conversation;
use crate::core::error::DomainError;
use crate::core::ids::PersonaId;
use crate::user::User;
use serde::{Deserialize, Serialize};

/// What the caller is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionAction {
    View,
    AddMessage,
    Join,
    Close,
    AddParticipant,
    RemoveParticipant,
    Delete,
    /// Compute the full permission set without a specific action in mind.
    Evaluate,
}

impl PermissionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PermissionAction::View => "view",
            PermissionAction::AddMessage => "add_message",
            PermissionAction::Join => "join",
            PermissionAction::Close => "close",
            PermissionAction::AddParticipant => "add_participant",
            PermissionAction::RemoveParticipant => "remove_participant",
            PermissionAction::Delete => "delete",
            PermissionAction::Evaluate => "evaluate",
        }
    }
}

impl std::fmt::Display for PermissionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PermissionAction {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "view" => Ok(PermissionAction::View),
            "add_message" | "post" => Ok(PermissionAction::AddMessage),
            "join" => Ok(PermissionAction::Join),
            "close" => Ok(PermissionAction::Close),
            "add_participant" => Ok(PermissionAction::AddParticipant),
            "remove_participant" => Ok(PermissionAction::RemoveParticipant),
            "delete" => Ok(PermissionAction::Delete),
            "evaluate" => Ok(PermissionAction::Evaluate),
            other => Err(DomainError::unknown("permission action", other)),
        }
    }
}

/// Kind of resource being accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    #[default]
    Conversation,
}

/// Caller facts the engine cannot derive from the resource itself.
///
/// An empty value means "owns no personas" and yields the most
/// conservative result.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionMetadata {
    /// Personas owned by the calling user.
    pub owned_persona_ids: Vec<PersonaId>,
    /// The persona the caller wants to act as, if any.
    pub target_persona_id: Option<PersonaId>,
}

impl PermissionMetadata {
    pub fn owning(owned_persona_ids: impl Into<Vec<PersonaId>>) -> Self {
        Self {
            owned_persona_ids: owned_persona_ids.into(),
            target_persona_id: None,
        }
    }

    pub fn acting_as(mut self, persona_id: impl Into<PersonaId>) -> Self {
        self.target_persona_id = Some(persona_id.into());
        self
    }

    pub fn owns(&self, persona_id: &PersonaId) -> bool {
        self.owned_persona_ids.contains(persona_id)
    }
}

/// Everything a rule may inspect for one request.
#[derive(Debug, Clone)]
pub struct PermissionContext<'a> {
    pub user: &'a User,
    pub action: PermissionAction,
    pub resource: &'a Conversation,
    pub resource_type: ResourceType,
    pub metadata: PermissionMetadata,
}

impl<'a> PermissionContext<'a> {
    pub fn new(user: &'a User, action: PermissionAction, resource: &'a Conversation) -> Self {
        Self {
            user,
            action,
            resource,
            resource_type: ResourceType::Conversation,
            metadata: PermissionMetadata::default(),
        }
    }

    pub fn with_metadata(mut self, metadata: PermissionMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Whether any caller-owned persona is an active participant.
    pub fn caller_participates(&self) -> bool {
        self.resource
            .has_any_active_participant(&self.metadata.owned_persona_ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_round_trip_str() {
        for action in [
            PermissionAction::View,
            PermissionAction::AddMessage,
            PermissionAction::RemoveParticipant,
            PermissionAction::Evaluate,
        ] {
            assert_eq!(action.as_str().parse::<PermissionAction>().unwrap(), action);
        }
        assert!("fly".parse::<PermissionAction>().is_err());
    }

    #[test]
    fn test_metadata_defaults_to_no_personas() {
        let metadata: PermissionMetadata = serde_json::from_str("{}").unwrap();
        assert!(metadata.owned_persona_ids.is_empty());
        assert!(metadata.target_persona_id.is_none());
    }

    #[test]
    fn test_metadata_owns() {
        let metadata = PermissionMetadata::owning(vec![PersonaId::new("p-1")]).acting_as("p-1");
        assert!(metadata.owns(&PersonaId::new("p-1")));
        assert!(!metadata.owns(&PersonaId::new("p-2")));
        assert_eq!(metadata.target_persona_id, Some(PersonaId::new("p-1")));
    }
}
