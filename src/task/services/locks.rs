//! Per-task mutual exclusion for compare-then-write sequences.

use crate::task::domain::TaskId;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Lock map guaranteeing at most one in-flight committing mutation per task.
///
/// Entries are created on first use and kept for the task's lifetime; the map
/// is bounded by the number of tasks ever touched through one service.
#[derive(Debug, Default)]
pub(crate) struct TaskLocks {
    inner: Mutex<HashMap<TaskId, Arc<AsyncMutex<()>>>>,
}

impl TaskLocks {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Acquires the lock for a task, waiting behind any in-flight mutation.
    pub(crate) async fn acquire(&self, task_id: TaskId) -> OwnedMutexGuard<()> {
        let cell = {
            let mut map = self
                .inner
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(map.entry(task_id).or_default())
        };
        cell.lock_owned().await
    }
}
