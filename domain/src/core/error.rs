//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Unknown {kind}: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    #[error("Personality trait '{name}' must be within 0-100, got {value}")]
    TraitOutOfRange { name: &'static str, value: u8 },
}

impl DomainError {
    pub(crate) fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        DomainError::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_variant_display() {
        let error = DomainError::unknown("visibility", "secret");
        assert_eq!(error.to_string(), "Unknown visibility: 'secret'");
    }

    #[test]
    fn test_trait_out_of_range_display() {
        let error = DomainError::TraitOutOfRange {
            name: "openness",
            value: 140,
        };
        assert!(error.to_string().contains("openness"));
        assert!(error.to_string().contains("140"));
    }
}
