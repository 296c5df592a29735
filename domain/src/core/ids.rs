//! Strongly-typed identifiers.
//!
//! Every entity crossing the engine boundary is keyed by one of these
//! newtypes so a persona id can never be passed where a user id is expected.
//! They serialize as bare strings.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Creates an identifier from an existing string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Returns the identifier as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl<T: Into<String>> From<T> for $name {
            fn from(s: T) -> Self {
                Self::new(s)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

define_id! {
    /// Identifier of a platform user (the account behind a request).
    UserId
}

define_id! {
    /// Identifier of a persona, human-owned or autonomous.
    PersonaId
}

define_id! {
    /// Identifier of a conversation.
    ConversationId
}

define_id! {
    /// Identifier of a single message.
    MessageId
}
