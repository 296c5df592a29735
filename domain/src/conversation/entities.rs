//! Conversation snapshot entities.

use crate::core::error::DomainError;
use crate::core::ids::{ConversationId, PersonaId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    #[default]
    Active,
    Paused,
    Completed,
    Terminated,
}

impl ConversationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversationStatus::Active => "active",
            ConversationStatus::Paused => "paused",
            ConversationStatus::Completed => "completed",
            ConversationStatus::Terminated => "terminated",
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, ConversationStatus::Active)
    }
}

impl std::fmt::Display for ConversationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ConversationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(ConversationStatus::Active),
            "paused" => Ok(ConversationStatus::Paused),
            "completed" => Ok(ConversationStatus::Completed),
            "terminated" => Ok(ConversationStatus::Terminated),
            other => Err(DomainError::unknown("conversation status", other)),
        }
    }
}

/// Who can see a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    Public,
    #[default]
    Private,
    Unlisted,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
            Visibility::Unlisted => "unlisted",
        }
    }
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Visibility {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            "unlisted" => Ok(Visibility::Unlisted),
            other => Err(DomainError::unknown("visibility", other)),
        }
    }
}

/// Role of a participant within one conversation.
///
/// Any role name other than `initiator` or `responder` loads as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParticipantRole {
    Initiator,
    #[default]
    Responder,
    #[serde(untagged)]
    Other(String),
}

/// A persona's membership record in a conversation.
///
/// Membership is active until `left_at` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub persona_id: PersonaId,
    #[serde(default)]
    pub role: ParticipantRole,
    #[serde(default)]
    pub is_revealed: bool,
    pub joined_at: DateTime<Utc>,
    #[serde(default)]
    pub last_active_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub left_at: Option<DateTime<Utc>>,
}

impl Participant {
    pub fn new(persona_id: impl Into<PersonaId>, role: ParticipantRole, joined_at: DateTime<Utc>) -> Self {
        Self {
            persona_id: persona_id.into(),
            role,
            is_revealed: false,
            joined_at,
            last_active_at: None,
            left_at: None,
        }
    }

    pub fn left(mut self, at: DateTime<Utc>) -> Self {
        self.left_at = Some(at);
        self
    }

    pub fn is_active(&self) -> bool {
        self.left_at.is_none()
    }
}

/// Conversation snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: ConversationId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub status: ConversationStatus,
    #[serde(default)]
    pub visibility: Visibility,
    #[serde(default = "default_can_add_messages")]
    pub can_add_messages: bool,
    pub initiator_persona_id: PersonaId,
    #[serde(default)]
    pub participants: Vec<Participant>,
}

fn default_can_add_messages() -> bool {
    true
}

impl Conversation {
    /// Creates an active, private conversation with no participants.
    pub fn new(id: impl Into<ConversationId>, initiator: impl Into<PersonaId>) -> Self {
        Self {
            id: id.into(),
            title: String::new(),
            topic: String::new(),
            status: ConversationStatus::Active,
            visibility: Visibility::Private,
            can_add_messages: true,
            initiator_persona_id: initiator.into(),
            participants: Vec::new(),
        }
    }

    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_status(mut self, status: ConversationStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_participant(mut self, participant: Participant) -> Self {
        self.participants.push(participant);
        self
    }

    /// Active participants, in list order.
    pub fn active_participants(&self) -> impl Iterator<Item = &Participant> {
        self.participants.iter().filter(|p| p.is_active())
    }

    pub fn is_active_participant(&self, persona_id: &PersonaId) -> bool {
        self.active_participants().any(|p| &p.persona_id == persona_id)
    }

    /// Whether any of `persona_ids` is an active participant.
    pub fn has_any_active_participant(&self, persona_ids: &[PersonaId]) -> bool {
        persona_ids.iter().any(|id| self.is_active_participant(id))
    }

    /// Open for new messages: active status and the flag set.
    pub fn accepts_messages(&self) -> bool {
        self.status.is_active() && self.can_add_messages
    }
}
