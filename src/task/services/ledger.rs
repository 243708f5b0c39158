//! Service layer for the diff-before-write task ledger.

use crate::error::ErrorKind;
use crate::project::domain::{Action, ProjectId};
use crate::project::ports::{MembershipRepository, ProjectRepository, ProjectRepositoryError};
use crate::task::{
    domain::{HistoryEntry, Task, TaskDomainError, TaskFields, TaskId, TaskPriority, TaskStatus},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::ActorToken;
use crate::user::ports::ActorResolver;
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

use crate::project::services::{AccessControl, AccessError};

use super::locks::TaskLocks;

/// Request payload carrying a full proposed field set.
///
/// The candidate state for change detection is built from this request
/// alone, as if applied to a blank task, never by patching the stored one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFieldsRequest {
    name: String,
    description: String,
    priority: String,
    status: String,
    end_date: DateTime<Utc>,
}

impl TaskFieldsRequest {
    /// Creates a request with all five observable fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: impl Into<String>,
        status: impl Into<String>,
        end_date: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            priority: priority.into(),
            status: status.into(),
            end_date,
        }
    }

    /// Validates the request into a domain field set.
    fn into_fields(self) -> Result<TaskFields, TaskDomainError> {
        let priority = TaskPriority::try_from(self.priority.as_str())?;
        let status = TaskStatus::try_from(self.status.as_str())?;
        TaskFields::new(self.name, self.description, priority, status, self.end_date)
    }
}

/// A task paired with its full history, most recent edit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskWithHistory {
    /// The task aggregate.
    pub task: Task,
    /// History entries sorted by edit timestamp descending.
    pub history: Vec<HistoryEntry>,
}

/// Service-level errors for ledger operations.
#[derive(Debug, Error)]
pub enum TaskLedgerError {
    /// Authorization failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The addressed task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The addressed project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project persistence failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
}

impl TaskLedgerError {
    /// Classifies the error for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(_) => ErrorKind::BadRequest,
            Self::TaskNotFound(_) | Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Projects(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for ledger service operations.
pub type TaskLedgerResult<T> = Result<T, TaskLedgerError>;

/// Task mutation and history orchestration service.
#[derive(Clone)]
pub struct TaskLedgerService<T, P, M, R, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    M: MembershipRepository,
    R: ActorResolver,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    access: Arc<AccessControl<M, R>>,
    clock: Arc<C>,
    locks: Arc<TaskLocks>,
}

impl<T, P, M, R, C> TaskLedgerService<T, P, M, R, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    M: MembershipRepository,
    R: ActorResolver,
    C: Clock + Send + Sync,
{
    /// Creates a new ledger service.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        projects: Arc<P>,
        access: Arc<AccessControl<M, R>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            projects,
            access,
            clock,
            locks: Arc::new(TaskLocks::new()),
        }
    }

    /// Creates a task in a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError`] when the project is missing, the actor
    /// fails the gate, or validation fails.
    pub async fn create_task(
        &self,
        project_id: ProjectId,
        request: TaskFieldsRequest,
        actor_token: &ActorToken,
    ) -> TaskLedgerResult<Task> {
        let actor = self.access.identify(actor_token).await?;
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(TaskLedgerError::ProjectNotFound(project_id))?;
        self.access
            .require(project_id, actor, Action::CreateTask)
            .await?;

        let fields = request.into_fields()?;
        let task = Task::new(project_id, fields);
        self.tasks.store(&task).await?;
        Ok(task)
    }

    /// Applies a proposed field set to a task, recording history on change.
    ///
    /// The candidate is compared field-wise against the stored task with a
    /// date-only end-date comparison. When nothing observable changes the
    /// stored task is returned untouched and no history entry is written.
    /// Otherwise the pre-update values are snapshotted and the snapshot and
    /// updated task are committed as one transaction. The whole
    /// read-compare-write sequence holds the task's lock, so concurrent
    /// updates cannot capture a stale before-image.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError`] when the task is missing, the actor fails
    /// the gate, or validation fails.
    pub async fn update_task(
        &self,
        task_id: TaskId,
        request: TaskFieldsRequest,
        actor_token: &ActorToken,
    ) -> TaskLedgerResult<Task> {
        let actor = self.access.identify(actor_token).await?;

        let _guard = self.locks.acquire(task_id).await;
        let stored = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLedgerError::TaskNotFound(task_id))?;
        self.access
            .require(stored.project_id(), actor, Action::UpdateTask)
            .await?;

        let proposed = request.into_fields()?;
        if proposed.matches(stored.fields()) {
            return Ok(stored);
        }

        let entry = HistoryEntry::snapshot_of(&stored, &*self.clock);
        let mut updated = stored;
        updated.apply_fields(proposed);
        self.tasks.commit_update(&updated, &entry).await?;
        Ok(updated)
    }

    /// Retrieves a task together with its history, most recent edit first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError`] when the task is missing or the actor
    /// holds no membership on its project.
    pub async fn task_with_history(
        &self,
        task_id: TaskId,
        actor_token: &ActorToken,
    ) -> TaskLedgerResult<TaskWithHistory> {
        let task = self.gated_task(task_id, actor_token).await?;
        let history = self.tasks.history_for_task(task_id).await?;
        Ok(TaskWithHistory { task, history })
    }

    /// Retrieves a task without its history, for lighter responses.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLedgerError`] when the task is missing or the actor
    /// holds no membership on its project.
    pub async fn task_without_history(
        &self,
        task_id: TaskId,
        actor_token: &ActorToken,
    ) -> TaskLedgerResult<Task> {
        self.gated_task(task_id, actor_token).await
    }

    async fn gated_task(
        &self,
        task_id: TaskId,
        actor_token: &ActorToken,
    ) -> TaskLedgerResult<Task> {
        let actor = self.access.identify(actor_token).await?;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLedgerError::TaskNotFound(task_id))?;
        self.access
            .require(task.project_id(), actor, Action::ViewTask)
            .await?;
        Ok(task)
    }
}
