//! Repository port for the membership registry.

use crate::project::domain::{Membership, ProjectId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for membership repository operations.
pub type MembershipRepositoryResult<T> = Result<T, MembershipRepositoryError>;

/// Membership registry persistence contract.
///
/// The registry answers "what role does user U hold on project P?" and
/// enforces the one-membership-per-(project, user) invariant on write. Role
/// changes go through [`MembershipRepository::update`], never through a
/// second grant.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Stores a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::DuplicateMembership`] when the
    /// (project, user) pair already holds a membership.
    async fn grant(&self, membership: &Membership) -> MembershipRepositoryResult<()>;

    /// Persists a role change to an existing membership.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipRepositoryError::NotFound`] when no membership
    /// exists for the pair.
    async fn update(&self, membership: &Membership) -> MembershipRepositoryResult<()>;

    /// Finds the membership for a (project, user) pair.
    ///
    /// Returns `None` when the user has no standing on the project.
    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>>;

    /// Returns all memberships on a project.
    async fn members_of(&self, project_id: ProjectId)
    -> MembershipRepositoryResult<Vec<Membership>>;
}

/// Errors returned by membership repository implementations.
#[derive(Debug, Clone, Error)]
pub enum MembershipRepositoryError {
    /// The (project, user) pair already holds a membership.
    #[error("user {user} already holds a membership on project {project}")]
    DuplicateMembership {
        /// Project the membership is scoped to.
        project: ProjectId,
        /// User already registered on the project.
        user: UserId,
    },

    /// No membership exists for the pair.
    #[error("user {user} holds no membership on project {project}")]
    NotFound {
        /// Project the lookup was scoped to.
        project: ProjectId,
        /// User without standing on the project.
        user: UserId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl MembershipRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
