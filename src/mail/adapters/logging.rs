//! Tracing-backed dispatcher standing in for an external mail transport.

use async_trait::async_trait;

use crate::mail::{
    domain::MailMessage,
    ports::{MailDispatchResult, MailDispatcher},
};

/// [`MailDispatcher`] that logs each message instead of delivering it.
///
/// Useful as a deployment default until a real transport adapter is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingMailDispatcher;

impl LoggingMailDispatcher {
    /// Creates the logging dispatcher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl MailDispatcher for LoggingMailDispatcher {
    async fn dispatch_bulk(&self, messages: Vec<MailMessage>) -> MailDispatchResult<()> {
        for message in messages {
            tracing::info!(
                to = %message.to(),
                subject = %message.subject(),
                "notification mail dispatched"
            );
        }
        Ok(())
    }
}
