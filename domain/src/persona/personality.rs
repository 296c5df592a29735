//! Personality traits and communication styles.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Upper bound of every trait value.
pub const TRAIT_MAX: u8 = 100;

/// Eight personality traits on a 0-100 scale.
///
/// Missing fields deserialize to a neutral 50.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonalityTraits {
    pub openness: u8,
    pub conscientiousness: u8,
    pub extraversion: u8,
    pub agreeableness: u8,
    pub neuroticism: u8,
    pub creativity: u8,
    pub assertiveness: u8,
    pub empathy: u8,
}

impl Default for PersonalityTraits {
    fn default() -> Self {
        Self::uniform(50)
    }
}

impl PersonalityTraits {
    /// Every trait set to the same value.
    pub fn uniform(value: u8) -> Self {
        Self {
            openness: value,
            conscientiousness: value,
            extraversion: value,
            agreeableness: value,
            neuroticism: value,
            creativity: value,
            assertiveness: value,
            empathy: value,
        }
    }

    pub fn with_extraversion(mut self, value: u8) -> Self {
        self.extraversion = value;
        self
    }

    pub fn with_conscientiousness(mut self, value: u8) -> Self {
        self.conscientiousness = value;
        self
    }

    pub fn with_openness(mut self, value: u8) -> Self {
        self.openness = value;
        self
    }

    pub fn with_agreeableness(mut self, value: u8) -> Self {
        self.agreeableness = value;
        self
    }

    /// Trait values by name, in declaration order.
    pub fn named(&self) -> [(&'static str, u8); 8] {
        [
            ("openness", self.openness),
            ("conscientiousness", self.conscientiousness),
            ("extraversion", self.extraversion),
            ("agreeableness", self.agreeableness),
            ("neuroticism", self.neuroticism),
            ("creativity", self.creativity),
            ("assertiveness", self.assertiveness),
            ("empathy", self.empathy),
        ]
    }

    /// Reject any trait above [`TRAIT_MAX`].
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.named().into_iter().find(|(_, v)| *v > TRAIT_MAX) {
            Some((name, value)) => Err(DomainError::TraitOutOfRange { name, value }),
            None => Ok(()),
        }
    }

    /// A trait as a fraction in [0, 1]; out-of-range values saturate.
    pub fn fraction(value: u8) -> f64 {
        f64::from(value.min(TRAIT_MAX)) / f64::from(TRAIT_MAX)
    }
}

/// Preferred register of a persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommunicationStyle {
    Formal,
    #[default]
    Casual,
    Academic,
    Creative,
    Technical,
    Empathetic,
    Humorous,
}

impl CommunicationStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommunicationStyle::Formal => "formal",
            CommunicationStyle::Casual => "casual",
            CommunicationStyle::Academic => "academic",
            CommunicationStyle::Creative => "creative",
            CommunicationStyle::Technical => "technical",
            CommunicationStyle::Empathetic => "empathetic",
            CommunicationStyle::Humorous => "humorous",
        }
    }

    /// Words that signal a message written in (or inviting) this style.
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            CommunicationStyle::Formal => &[
                "please",
                "thank",
                "regards",
                "indeed",
                "furthermore",
                "therefore",
                "kindly",
                "sincerely",
            ],
            CommunicationStyle::Casual => &[
                "hey", "cool", "yeah", "lol", "awesome", "gonna", "stuff", "chill",
            ],
            CommunicationStyle::Academic => &[
                "research",
                "study",
                "theory",
                "analysis",
                "evidence",
                "hypothesis",
                "literature",
                "methodology",
            ],
            CommunicationStyle::Creative => &[
                "imagine", "create", "story", "dream", "color", "invent", "art", "inspire",
            ],
            CommunicationStyle::Technical => &[
                "system",
                "algorithm",
                "code",
                "data",
                "implementation",
                "architecture",
                "performance",
                "function",
            ],
            CommunicationStyle::Empathetic => &[
                "feel",
                "understand",
                "support",
                "care",
                "sorry",
                "together",
                "listen",
                "hope",
            ],
            CommunicationStyle::Humorous => &[
                "funny", "joke", "laugh", "haha", "lol", "hilarious", "silly", "pun",
            ],
        }
    }
}

impl std::fmt::Display for CommunicationStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CommunicationStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "formal" => Ok(CommunicationStyle::Formal),
            "casual" => Ok(CommunicationStyle::Casual),
            "academic" => Ok(CommunicationStyle::Academic),
            "creative" => Ok(CommunicationStyle::Creative),
            "technical" => Ok(CommunicationStyle::Technical),
            "empathetic" => Ok(CommunicationStyle::Empathetic),
            "humorous" => Ok(CommunicationStyle::Humorous),
            other => Err(DomainError::unknown("communication style", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_traits_are_neutral() {
        let traits = PersonalityTraits::default();
        assert!(traits.named().iter().all(|(_, v)| *v == 50));
    }

    #[test]
    fn test_partial_traits_deserialize_with_defaults() {
        let traits: PersonalityTraits =
            serde_json::from_str(r#"{"extraversion": 90}"#).unwrap();
        assert_eq!(traits.extraversion, 90);
        assert_eq!(traits.openness, 50);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let traits = PersonalityTraits::default().with_openness(101);
        assert_eq!(
            traits.validate(),
            Err(DomainError::TraitOutOfRange {
                name: "openness",
                value: 101
            })
        );
        assert!(PersonalityTraits::uniform(100).validate().is_ok());
    }

    #[test]
    fn test_fraction_saturates() {
        assert_eq!(PersonalityTraits::fraction(0), 0.0);
        assert_eq!(PersonalityTraits::fraction(100), 1.0);
        assert_eq!(PersonalityTraits::fraction(250), 1.0);
    }

    #[test]
    fn test_every_style_has_keywords() {
        for style in [
            CommunicationStyle::Formal,
            CommunicationStyle::Casual,
            CommunicationStyle::Academic,
            CommunicationStyle::Creative,
            CommunicationStyle::Technical,
            CommunicationStyle::Empathetic,
            CommunicationStyle::Humorous,
        ] {
            assert!(!style.keywords().is_empty(), "{style} has no keywords");
        }
    }
}
