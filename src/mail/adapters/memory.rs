//! Recording dispatcher for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::mail::{
    domain::MailMessage,
    ports::{MailDispatchError, MailDispatchResult, MailDispatcher},
};

/// [`MailDispatcher`] that records every bulk call instead of sending.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailDispatcher {
    calls: Arc<RwLock<Vec<Vec<MailMessage>>>>,
}

impl RecordingMailDispatcher {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every recorded bulk call in dispatch order.
    ///
    /// # Errors
    ///
    /// Returns [`MailDispatchError::Transport`] when the record lock is
    /// poisoned.
    pub fn bulk_calls(&self) -> MailDispatchResult<Vec<Vec<MailMessage>>> {
        let calls = self
            .calls
            .read()
            .map_err(|err| MailDispatchError::transport(std::io::Error::other(err.to_string())))?;
        Ok(calls.clone())
    }

    /// Returns every recorded message, flattened across bulk calls.
    ///
    /// # Errors
    ///
    /// Returns [`MailDispatchError::Transport`] when the record lock is
    /// poisoned.
    pub fn sent_messages(&self) -> MailDispatchResult<Vec<MailMessage>> {
        Ok(self.bulk_calls()?.into_iter().flatten().collect())
    }
}

#[async_trait]
impl MailDispatcher for RecordingMailDispatcher {
    async fn dispatch_bulk(&self, messages: Vec<MailMessage>) -> MailDispatchResult<()> {
        let mut calls = self
            .calls
            .write()
            .map_err(|err| MailDispatchError::transport(std::io::Error::other(err.to_string())))?;
        calls.push(messages);
        Ok(())
    }
}
