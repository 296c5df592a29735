//! Scenario files: a conversation snapshot plus the people and personas in it.

use anyhow::{Context, Result, anyhow};
use colloquy_domain::{Conversation, Message, MessageId, Persona, PersonaId, User, UserId};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub personas: Vec<Persona>,
    pub conversation: Conversation,
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("could not read scenario {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let scenario: Scenario = serde_json::from_str(raw)?;
        for persona in &scenario.personas {
            persona
                .personality
                .validate()
                .with_context(|| format!("persona {}", persona.id))?;
        }
        Ok(scenario)
    }

    pub fn user(&self, id: &str) -> Result<&User> {
        let id = UserId::new(id);
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| anyhow!("user {} is not in the scenario", id))
    }

    pub fn message(&self, id: &str) -> Result<&Message> {
        let id = MessageId::new(id);
        self.messages
            .iter()
            .find(|m| m.id == id)
            .ok_or_else(|| anyhow!("message {} is not in the scenario", id))
    }

    /// Ids of the personas owned by `user`.
    pub fn owned_persona_ids(&self, user: &User) -> Vec<PersonaId> {
        self.personas
            .iter()
            .filter(|p| p.owner.as_ref() == Some(&user.id))
            .map(|p| p.id.clone())
            .collect()
    }
}
