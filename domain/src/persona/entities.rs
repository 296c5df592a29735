//! Persona profile entity.

use super::interaction::InteractionType;
use super::personality::{CommunicationStyle, PersonalityTraits};
use crate::core::error::DomainError;
use crate::core::ids::{PersonaId, UserId};
use serde::{Deserialize, Serialize};

/// Whether a persona is driven by a human or by an autonomous agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaType {
    HumanPersona,
    AiAgent,
    /// Autonomous, but presented without disclosing that it is an AI.
    AiAmbiguous,
}

impl PersonaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaType::HumanPersona => "human_persona",
            PersonaType::AiAgent => "ai_agent",
            PersonaType::AiAmbiguous => "ai_ambiguous",
        }
    }

    /// Autonomous personas are the only candidates for generated replies.
    pub fn is_autonomous(&self) -> bool {
        matches!(self, PersonaType::AiAgent | PersonaType::AiAmbiguous)
    }
}

impl std::fmt::Display for PersonaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PersonaType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "human_persona" | "human" => Ok(PersonaType::HumanPersona),
            "ai_agent" | "ai" => Ok(PersonaType::AiAgent),
            "ai_ambiguous" | "ambiguous" => Ok(PersonaType::AiAmbiguous),
            other => Err(DomainError::unknown("persona type", other)),
        }
    }
}

/// Persona profile as seen by the engines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Persona {
    pub id: PersonaId,
    pub name: String,
    /// Owning user; `None` for unowned autonomous personas.
    #[serde(default)]
    pub owner: Option<UserId>,
    #[serde(rename = "type")]
    pub persona_type: PersonaType,
    /// Knowledge domains, e.g. "technology" or "philosophy".
    #[serde(default)]
    pub knowledge: Vec<String>,
    #[serde(default)]
    pub personality: PersonalityTraits,
    #[serde(default)]
    pub communication_style: CommunicationStyle,
    #[serde(default)]
    pub allowed_interactions: Vec<InteractionType>,
}

impl Persona {
    /// Creates a persona with neutral personality and no knowledge domains.
    pub fn new(id: impl Into<PersonaId>, name: impl Into<String>, persona_type: PersonaType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            owner: None,
            persona_type,
            knowledge: Vec::new(),
            personality: PersonalityTraits::default(),
            communication_style: CommunicationStyle::default(),
            allowed_interactions: Vec::new(),
        }
    }

    pub fn with_owner(mut self, owner: impl Into<UserId>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_knowledge<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.knowledge = domains.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_personality(mut self, personality: PersonalityTraits) -> Self {
        self.personality = personality;
        self
    }

    pub fn with_style(mut self, style: CommunicationStyle) -> Self {
        self.communication_style = style;
        self
    }

    pub fn with_interactions(mut self, interactions: impl Into<Vec<InteractionType>>) -> Self {
        self.allowed_interactions = interactions.into();
        self
    }

    pub fn is_autonomous(&self) -> bool {
        self.persona_type.is_autonomous()
    }

    pub fn allows_interaction(&self, interaction: InteractionType) -> bool {
        self.allowed_interactions.contains(&interaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_autonomous_types() {
        assert!(!PersonaType::HumanPersona.is_autonomous());
        assert!(PersonaType::AiAgent.is_autonomous());
        assert!(PersonaType::AiAmbiguous.is_autonomous());
    }

    #[test]
    fn test_persona_deserializes_with_defaults() {
        let persona: Persona = serde_json::from_str(
            r#"{"id": "p-1", "name": "Ada", "type": "ai_agent", "knowledge": ["technology"]}"#,
        )
        .unwrap();
        assert_eq!(persona.id.as_str(), "p-1");
        assert!(persona.is_autonomous());
        assert!(persona.owner.is_none());
        assert_eq!(persona.communication_style, CommunicationStyle::Casual);
        assert!(persona.allowed_interactions.is_empty());
    }

    #[test]
    fn test_builder() {
        let persona = Persona::new("p-2", "Bo", PersonaType::HumanPersona)
            .with_owner("u-1")
            .with_interactions([InteractionType::Debate]);
        assert_eq!(persona.owner, Some(UserId::new("u-1")));
        assert!(persona.allows_interaction(InteractionType::Debate));
        assert!(!persona.allows_interaction(InteractionType::Roleplay));
    }

    #[test]
    fn test_persona_type_from_str() {
        assert_eq!("ai-agent".parse::<PersonaType>().unwrap(), PersonaType::AiAgent);
        assert!("robot".parse::<PersonaType>().is_err());
    }
}
