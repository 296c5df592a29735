//! Personas: the identities that take part in conversations.
//!
//! - [`Persona`]: profile of a human-owned or autonomous participant
//! - [`PersonalityTraits`]: eight 0-100 trait values used by response scoring
//! - [`CommunicationStyle`]: preferred register, with its keyword vocabulary
//! - [`InteractionType`]: kinds of exchange a persona is willing to take part in

pub mod entities;
pub mod interaction;
pub mod personality;

pub use entities::{Persona, PersonaType};
pub use interaction::InteractionType;
pub use personality::{CommunicationStyle, PersonalityTraits};
