//! Rendered notification message.

use crate::user::domain::EmailAddress;
use serde::{Deserialize, Serialize};

/// A fully rendered message addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailMessage {
    to: EmailAddress,
    subject: String,
    body: String,
}

impl MailMessage {
    /// Creates a message from rendered parts.
    #[must_use]
    pub fn new(to: EmailAddress, subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            to,
            subject: subject.into(),
            body: body.into(),
        }
    }

    /// Returns the recipient address.
    #[must_use]
    pub const fn to(&self) -> &EmailAddress {
        &self.to
    }

    /// Returns the subject line.
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Returns the body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }
}
