//! Platform users.
//!
//! A user is the account behind a request. Its role is the only trust
//! elevation signal the permission engine looks at.

use crate::core::error::DomainError;
use crate::core::ids::UserId;
use serde::{Deserialize, Serialize};

/// Trust level of a user account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[default]
    Regular,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Regular => "regular",
            UserRole::Admin => "admin",
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for UserRole {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" | "user" => Ok(UserRole::Regular),
            "admin" => Ok(UserRole::Admin),
            other => Err(DomainError::unknown("user role", other)),
        }
    }
}

/// A platform user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub role: UserRole,
}

impl User {
    /// Creates a regular (non-admin) user.
    pub fn regular(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            role: UserRole::Regular,
        }
    }

    /// Creates an admin user.
    pub fn admin(id: impl Into<UserId>) -> Self {
        Self {
            id: id.into(),
            role: UserRole::Admin,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_defaults_to_regular() {
        let user: User = serde_json::from_str(r#"{"id": "u-1"}"#).unwrap();
        assert_eq!(user.role, UserRole::Regular);
        assert!(!user.is_admin());
    }

    #[test]
    fn test_admin_constructor() {
        assert!(User::admin("root").is_admin());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("ADMIN".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("regular".parse::<UserRole>().unwrap(), UserRole::Regular);
        assert!("superuser".parse::<UserRole>().is_err());
    }
}
