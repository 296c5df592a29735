//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: strongly-typed identifiers for users, personas, conversations and messages
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
