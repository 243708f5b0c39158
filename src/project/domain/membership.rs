//! Membership: the (project, user, role) authority record.

use super::{MembershipId, ProjectId, Role};
use crate::user::domain::UserId;
use serde::{Deserialize, Serialize};

/// The sole source of permission truth for one user on one project.
///
/// At most one membership exists per (project, user) pair; the repository
/// enforces uniqueness on write. A membership is never deleted, only its
/// role changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    id: MembershipId,
    project_id: ProjectId,
    user_id: UserId,
    role: Role,
}

impl Membership {
    /// Creates a membership with a fresh identifier.
    #[must_use]
    pub fn new(project_id: ProjectId, user_id: UserId, role: Role) -> Self {
        Self {
            id: MembershipId::new(),
            project_id,
            user_id,
            role,
        }
    }

    /// Returns the membership identifier.
    #[must_use]
    pub const fn id(&self) -> MembershipId {
        self.id
    }

    /// Returns the project this membership is scoped to.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the held role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    /// Replaces the held role.
    pub const fn set_role(&mut self, role: Role) {
        self.role = role;
    }
}
