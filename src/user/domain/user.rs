//! User identity record and validated contact scalars.

use super::{UserDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated email address used for notification dispatch.
///
/// Validation is deliberately shallow (a non-empty local part and domain
/// around a single `@`); deliverability is the mail collaborator's problem.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a validated email address.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::InvalidEmailAddress`] when the value does
    /// not contain exactly one `@` with text on both sides.
    pub fn new(value: impl Into<String>) -> Result<Self, UserDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        let mut parts = normalized.split('@');
        let local = parts.next().unwrap_or_default();
        let domain = parts.next().unwrap_or_default();
        let has_more_parts = parts.next().is_some();
        let is_valid = !local.is_empty()
            && !domain.is_empty()
            && !has_more_parts
            && !normalized.chars().any(char::is_whitespace);

        if !is_valid {
            return Err(UserDomainError::InvalidEmailAddress(raw));
        }

        Ok(Self(normalized.to_owned()))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// User identity record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    email: EmailAddress,
}

impl User {
    /// Creates a new user with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns [`UserDomainError::EmptyUserName`] when the name is blank
    /// after trimming.
    pub fn new(name: impl Into<String>, email: EmailAddress) -> Result<Self, UserDomainError> {
        let raw = name.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UserDomainError::EmptyUserName);
        }

        Ok(Self {
            id: UserId::new(),
            name: trimmed.to_owned(),
            email,
        })
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the contact address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }
}
