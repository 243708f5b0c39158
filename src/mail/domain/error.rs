//! Error types for mail composition.

use thiserror::Error;

/// Errors returned while rendering notification templates.
#[derive(Debug, Error)]
pub enum MailComposeError {
    /// Template registration or rendering failed.
    #[error("template rendering failed: {0}")]
    Render(#[from] minijinja::Error),
}
