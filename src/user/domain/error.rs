//! Error types for user domain validation.

use thiserror::Error;

/// Errors returned while constructing user domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum UserDomainError {
    /// The user name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The email address is not plausibly deliverable.
    #[error("invalid email address '{0}'")]
    InvalidEmailAddress(String),
}
