//! Task aggregate root.

use super::{TaskFields, TaskId};
use crate::project::domain::ProjectId;
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A work item inside a project.
///
/// The owning project never changes after creation. The subscriber set holds
/// users who opted in to assignment-change notifications; it is independent
/// of the assignee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    project_id: ProjectId,
    fields: TaskFields,
    assignee: Option<UserId>,
    subscribers: BTreeSet<UserId>,
}

impl Task {
    /// Creates a new unassigned task with a fresh identifier.
    #[must_use]
    pub fn new(project_id: ProjectId, fields: TaskFields) -> Self {
        Self {
            id: TaskId::new(),
            project_id,
            fields,
            assignee: None,
            subscribers: BTreeSet::new(),
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the owning project.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the observable field set.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns the notification subscriber set.
    #[must_use]
    pub const fn subscribers(&self) -> &BTreeSet<UserId> {
        &self.subscribers
    }

    /// Replaces the observable fields.
    ///
    /// Callers are responsible for snapshotting the prior values first; the
    /// aggregate itself does not record history.
    pub fn apply_fields(&mut self, fields: TaskFields) {
        self.fields = fields;
    }

    /// Sets the assignee, returning the previous one.
    pub fn assign(&mut self, user_id: UserId) -> Option<UserId> {
        self.assignee.replace(user_id)
    }

    /// Clears the assignee, returning the previous one.
    pub fn clear_assignee(&mut self) -> Option<UserId> {
        self.assignee.take()
    }

    /// Adds a user to the subscriber set; returns `false` if already present.
    pub fn subscribe(&mut self, user_id: UserId) -> bool {
        self.subscribers.insert(user_id)
    }

    /// Removes a user from the subscriber set; returns `false` if absent.
    pub fn unsubscribe(&mut self, user_id: UserId) -> bool {
        self.subscribers.remove(&user_id)
    }

    /// Returns whether the user has opted in to notifications.
    #[must_use]
    pub fn is_subscriber(&self, user_id: UserId) -> bool {
        self.subscribers.contains(&user_id)
    }
}
