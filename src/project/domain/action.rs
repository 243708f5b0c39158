//! Capability matrix for gated operations.

use super::Role;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An operation subject to project-scoped authorization.
///
/// The matrix in [`Action::minimum_role`] is the single source of truth for
/// role requirements; services never test roles directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// Read a project and its membership roster.
    ViewProject,
    /// Read a task, with or without its history.
    ViewTask,
    /// Toggle the actor's own assignment-notification subscription.
    SetNotificationSubscription,
    /// Change project name, description, or start date.
    UpdateProject,
    /// Create a task in a project.
    CreateTask,
    /// Mutate a task's observable fields.
    UpdateTask,
    /// Set a task's assignee.
    AssignTask,
    /// Clear a task's assignee.
    UnassignTask,
    /// Add a user to a project.
    AddMember,
    /// Change an existing member's role.
    ChangeRole,
}

impl Action {
    /// Returns the least role allowed to perform this action.
    ///
    /// Membership administration is strictly `Admin`; other mutations need
    /// `Member`; reads and subscription toggles need only membership
    /// presence, so `Observer` suffices.
    #[must_use]
    pub const fn minimum_role(self) -> Role {
        match self {
            Self::ViewProject | Self::ViewTask | Self::SetNotificationSubscription => {
                Role::Observer
            }
            Self::UpdateProject
            | Self::CreateTask
            | Self::UpdateTask
            | Self::AssignTask
            | Self::UnassignTask => Role::Member,
            Self::AddMember | Self::ChangeRole => Role::Admin,
        }
    }

    /// Returns the canonical label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewProject => "view_project",
            Self::ViewTask => "view_task",
            Self::SetNotificationSubscription => "set_notification_subscription",
            Self::UpdateProject => "update_project",
            Self::CreateTask => "create_task",
            Self::UpdateTask => "update_task",
            Self::AssignTask => "assign_task",
            Self::UnassignTask => "unassign_task",
            Self::AddMember => "add_member",
            Self::ChangeRole => "change_role",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
