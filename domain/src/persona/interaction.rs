//! Interaction types and the content classifier that derives them.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Kind of exchange a message invites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    #[default]
    CasualChat,
    Debate,
    Storytelling,
    Brainstorm,
    Roleplay,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionType::CasualChat => "casual_chat",
            InteractionType::Debate => "debate",
            InteractionType::Storytelling => "storytelling",
            InteractionType::Brainstorm => "brainstorm",
            InteractionType::Roleplay => "roleplay",
        }
    }

    /// All interaction types.
    pub fn all() -> &'static [InteractionType] {
        &[
            InteractionType::CasualChat,
            InteractionType::Debate,
            InteractionType::Storytelling,
            InteractionType::Brainstorm,
            InteractionType::Roleplay,
        ]
    }

    /// Classify message content with simple keyword heuristics.
    ///
    /// Checks run in a fixed order and the first hit wins, so a question is
    /// always casual chat even if it also mentions a debate.
    pub fn classify(content: &str) -> Self {
        let lower = content.to_lowercase();

        if lower.contains('?') {
            InteractionType::CasualChat
        } else if lower.contains("debate") || lower.contains("argue") {
            InteractionType::Debate
        } else if lower.contains("story") || lower.contains("imagine") {
            InteractionType::Storytelling
        } else if lower.contains("idea") || lower.contains("brainstorm") {
            InteractionType::Brainstorm
        } else if lower.contains("role") || lower.contains("pretend") {
            InteractionType::Roleplay
        } else {
            InteractionType::CasualChat
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InteractionType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "casual_chat" | "casual" | "chat" => Ok(InteractionType::CasualChat),
            "debate" => Ok(InteractionType::Debate),
            "storytelling" | "story" => Ok(InteractionType::Storytelling),
            "brainstorm" => Ok(InteractionType::Brainstorm),
            "roleplay" => Ok(InteractionType::Roleplay),
            other => Err(DomainError::unknown("interaction type", other)),
        }
    }
}
