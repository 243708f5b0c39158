//! Repository port for task, history, and relation persistence.

use crate::task::domain::{HistoryEntry, HistoryEntryId, Task, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
///
/// The assignee and subscriber relations are two sides of one logical
/// relationship; implementations maintain both sides on every task write so
/// the per-user views in [`TaskRepository::tasks_assigned_to`] and
/// [`TaskRepository::tasks_subscribed_by`] never diverge from the aggregates.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::DuplicateTask`] when the task id
    /// already exists.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Persists changes to an existing task (assignee, subscribers).
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Persists a field mutation and its history entry as one transaction.
    ///
    /// Either both writes land or neither does; a persisted entry without the
    /// updated task (or vice versa) is a correctness violation.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist
    /// and [`TaskRepositoryError::ForeignHistoryEntry`] when the entry was
    /// derived from a different task.
    async fn commit_update(
        &self,
        task: &Task,
        entry: &HistoryEntry,
    ) -> TaskRepositoryResult<()>;

    /// Returns a task's history entries, most recent edit first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not
    /// exist.
    async fn history_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<HistoryEntry>>;

    /// Returns the ids of tasks currently assigned to a user.
    async fn tasks_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<TaskId>>;

    /// Returns the ids of tasks a user subscribes to.
    async fn tasks_subscribed_by(&self, user_id: UserId) -> TaskRepositoryResult<Vec<TaskId>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The history entry does not belong to the task being committed.
    #[error("history entry {entry} was not derived from task {task}")]
    ForeignHistoryEntry {
        /// Task being committed.
        task: TaskId,
        /// Entry derived from another task.
        entry: HistoryEntryId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
