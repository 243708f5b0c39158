//! Service layer for task assignment and notification subscriptions.

use crate::error::ErrorKind;
use crate::mail::domain::{AssignmentNotice, MailComposer};
use crate::mail::ports::MailDispatcher;
use crate::project::domain::{Action, Project, ProjectId};
use crate::project::ports::{MembershipRepository, ProjectRepository, ProjectRepositoryError};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use crate::user::domain::{ActorToken, User, UserId};
use crate::user::ports::{ActorResolver, UserDirectory, UserDirectoryError};
use std::sync::Arc;
use thiserror::Error;

use crate::project::services::{AccessControl, AccessError};

use super::locks::TaskLocks;

/// Service-level errors for assignment and subscription operations.
#[derive(Debug, Error)]
pub enum AssignmentServiceError {
    /// Authorization failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The addressed task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The task's owning project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The proposed assignee does not exist.
    #[error("assignee not found: {0}")]
    AssigneeNotFound(UserId),
    /// The proposed assignee holds no membership on the task's project.
    #[error("user {user} is not a member of project {project}")]
    AssigneeNotMember {
        /// Project owning the task.
        project: ProjectId,
        /// Proposed assignee without standing.
        user: UserId,
    },
    /// The task already has this exact assignee.
    #[error("task {task} is already assigned to user {user}")]
    AlreadyAssigned {
        /// Task the assignment targeted.
        task: TaskId,
        /// The unchanged assignee.
        user: UserId,
    },
    /// The task has no assignee to remove.
    #[error("task {0} has no assignee")]
    NothingToUnassign(TaskId),
    /// Task persistence failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Project persistence failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// User directory lookup failed.
    #[error(transparent)]
    Users(#[from] UserDirectoryError),
}

impl AssignmentServiceError {
    /// Classifies the error for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::TaskNotFound(_) | Self::ProjectNotFound(_) | Self::AssigneeNotFound(_) => {
                ErrorKind::NotFound
            }
            Self::AssigneeNotMember { .. }
            | Self::AlreadyAssigned { .. }
            | Self::NothingToUnassign(_) => ErrorKind::Forbidden,
            Self::Repository(_) | Self::Projects(_) | Self::Users(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for assignment service operations.
pub type AssignmentServiceResult<T> = Result<T, AssignmentServiceError>;

/// Assignment and notification-subscription orchestration service.
#[derive(Clone)]
pub struct AssignmentService<T, P, U, M, R, D>
where
    T: TaskRepository,
    P: ProjectRepository,
    U: UserDirectory,
    M: MembershipRepository,
    R: ActorResolver,
    D: MailDispatcher,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    users: Arc<U>,
    access: Arc<AccessControl<M, R>>,
    dispatcher: Arc<D>,
    composer: Arc<MailComposer>,
    locks: Arc<TaskLocks>,
}

impl<T, P, U, M, R, D> AssignmentService<T, P, U, M, R, D>
where
    T: TaskRepository,
    P: ProjectRepository,
    U: UserDirectory,
    M: MembershipRepository,
    R: ActorResolver,
    D: MailDispatcher,
{
    /// Creates a new assignment service.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        projects: Arc<P>,
        users: Arc<U>,
        access: Arc<AccessControl<M, R>>,
        dispatcher: Arc<D>,
        composer: Arc<MailComposer>,
    ) -> Self {
        Self {
            tasks,
            projects,
            users,
            access,
            dispatcher,
            composer,
            locks: Arc::new(TaskLocks::new()),
        }
    }

    /// Assigns a task to a project member and notifies subscribers.
    ///
    /// Reassigning the current assignee is rejected, not treated as an
    /// idempotent success. The notification recipients are the task's
    /// subscribers, regardless of whether the new assignee is among them;
    /// dispatch happens only after the assignment is durably persisted and
    /// its failure is logged, never propagated.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError`] when the gate fails, the assignee
    /// is unknown or not a member, or the task already has this assignee.
    pub async fn assign_task(
        &self,
        task_id: TaskId,
        new_assignee: UserId,
        actor_token: &ActorToken,
    ) -> AssignmentServiceResult<Task> {
        let actor = self.access.identify(actor_token).await?;

        let guard = self.locks.acquire(task_id).await;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(AssignmentServiceError::TaskNotFound(task_id))?;
        let project = self
            .projects
            .find_by_id(task.project_id())
            .await?
            .ok_or(AssignmentServiceError::ProjectNotFound(task.project_id()))?;
        self.access
            .require(task.project_id(), actor, Action::AssignTask)
            .await?;

        let assignee = self
            .users
            .find_by_id(new_assignee)
            .await?
            .ok_or(AssignmentServiceError::AssigneeNotFound(new_assignee))?;
        if self
            .access
            .role_of(task.project_id(), new_assignee)
            .await?
            .is_none()
        {
            return Err(AssignmentServiceError::AssigneeNotMember {
                project: task.project_id(),
                user: new_assignee,
            });
        }
        if task.assignee() == Some(new_assignee) {
            return Err(AssignmentServiceError::AlreadyAssigned {
                task: task_id,
                user: new_assignee,
            });
        }

        let mut updated = task;
        updated.assign(new_assignee);
        self.tasks.update(&updated).await?;
        drop(guard);

        self.notify_subscribers(&project, &updated, &assignee).await;
        Ok(updated)
    }

    /// Clears a task's assignee.
    ///
    /// No notification is sent on unassignment.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError::NothingToUnassign`] when the task
    /// has no assignee.
    pub async fn unassign_task(
        &self,
        task_id: TaskId,
        actor_token: &ActorToken,
    ) -> AssignmentServiceResult<Task> {
        let actor = self.access.identify(actor_token).await?;

        let _guard = self.locks.acquire(task_id).await;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(AssignmentServiceError::TaskNotFound(task_id))?;
        self.access
            .require(task.project_id(), actor, Action::UnassignTask)
            .await?;

        let mut updated = task;
        if updated.clear_assignee().is_none() {
            return Err(AssignmentServiceError::NothingToUnassign(task_id));
        }
        self.tasks.update(&updated).await?;
        Ok(updated)
    }

    /// Adds or removes the actor from a task's notification subscriber set.
    ///
    /// Requires only membership presence on the task's project; an Observer
    /// controls their own subscription like anyone else. Toggling to the
    /// current state is a no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`AssignmentServiceError`] when the task is missing or the
    /// actor holds no membership on its project.
    pub async fn set_notification_subscription(
        &self,
        task_id: TaskId,
        actor_token: &ActorToken,
        subscribe: bool,
    ) -> AssignmentServiceResult<Task> {
        let actor = self.access.identify(actor_token).await?;

        let _guard = self.locks.acquire(task_id).await;
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(AssignmentServiceError::TaskNotFound(task_id))?;
        self.access
            .require(
                task.project_id(),
                actor,
                Action::SetNotificationSubscription,
            )
            .await?;

        let mut updated = task;
        if subscribe {
            updated.subscribe(actor);
        } else {
            updated.unsubscribe(actor);
        }
        self.tasks.update(&updated).await?;
        Ok(updated)
    }

    /// Mails every subscriber about the new assignee; best-effort.
    async fn notify_subscribers(&self, project: &Project, task: &Task, assignee: &User) {
        let recipients = match self.subscriber_addresses(task).await {
            Ok(recipients) => recipients,
            Err(error) => {
                tracing::warn!(%error, "failed to resolve notification recipients");
                return;
            }
        };
        if recipients.is_empty() {
            return;
        }

        let notice = AssignmentNotice::new(project.name(), task.fields().name(), assignee.name());
        let messages = match self.composer.assignment_notifications(recipients, &notice) {
            Ok(messages) => messages,
            Err(error) => {
                tracing::warn!(%error, "failed to compose assignment notifications");
                return;
            }
        };

        tracing::debug!(
            task = %task.id(),
            count = messages.len(),
            "dispatching assignment notifications"
        );
        if let Err(error) = self.dispatcher.dispatch_bulk(messages).await {
            tracing::warn!(%error, "failed to dispatch assignment notifications");
        }
    }

    /// Resolves subscriber ids to addresses, sorted for deterministic
    /// dispatch order. Subscribers missing from the directory are skipped.
    async fn subscriber_addresses(
        &self,
        task: &Task,
    ) -> Result<Vec<crate::user::domain::EmailAddress>, UserDirectoryError> {
        let mut addresses = Vec::with_capacity(task.subscribers().len());
        for user_id in task.subscribers() {
            match self.users.find_by_id(*user_id).await? {
                Some(user) => addresses.push(user.email().clone()),
                None => {
                    tracing::warn!(user = %user_id, "subscriber missing from directory, skipping");
                }
            }
        }
        addresses.sort_unstable();
        Ok(addresses)
    }
}
