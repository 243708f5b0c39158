//! Dispatcher port for outbound notification mail.

use crate::mail::domain::MailMessage;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for mail dispatch operations.
pub type MailDispatchResult<T> = Result<T, MailDispatchError>;

/// Outbound mail contract.
///
/// Dispatch is best-effort: callers log failures and never roll back the
/// state change that triggered the notification.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    /// Dispatches one message per recipient.
    ///
    /// # Errors
    ///
    /// Returns [`MailDispatchError::Transport`] when the underlying transport
    /// rejects the batch.
    async fn dispatch_bulk(&self, messages: Vec<MailMessage>) -> MailDispatchResult<()>;
}

/// Errors returned by mail dispatcher implementations.
#[derive(Debug, Clone, Error)]
pub enum MailDispatchError {
    /// Transport-layer failure.
    #[error("mail transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl MailDispatchError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
