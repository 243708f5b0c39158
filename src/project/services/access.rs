//! Authorization gate evaluated on every protected operation.
//!
//! The full gate runs in a fixed order: (1) the actor token resolves to an
//! identity, (2) the target resource exists, (3) the actor holds a membership
//! on the resource's project, (4) the held role satisfies the action's
//! minimum. Step 2 belongs to the calling service (only it knows which
//! resource is addressed); [`AccessControl::identify`] covers step 1 and
//! [`AccessControl::require`] covers steps 3 and 4. Keeping existence ahead
//! of membership, and membership ahead of role, means error responses leak
//! the least information consistent with correctness.

use crate::error::ErrorKind;
use crate::project::domain::{Action, ProjectId, Role};
use crate::project::ports::{MembershipRepository, MembershipRepositoryError};
use crate::user::domain::{ActorToken, UserId};
use crate::user::ports::{ActorResolver, IdentityError};
use std::sync::Arc;
use thiserror::Error;

/// Result type for authorization checks.
pub type AccessResult<T> = Result<T, AccessError>;

/// Errors raised by the authorization gate.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The actor token does not authenticate anyone.
    #[error("actor is not authenticated")]
    Unauthenticated,

    /// The actor token could not be interpreted at all.
    #[error("malformed actor token '{0}'")]
    MalformedActorToken(String),

    /// The identity provider failed.
    #[error("identity lookup failed: {0}")]
    Identity(String),

    /// The actor holds no membership on the project.
    #[error("user {user} is not a member of project {project}")]
    NotAMember {
        /// Project the action targeted.
        project: ProjectId,
        /// Actor without standing.
        user: UserId,
    },

    /// The actor's role does not satisfy the action's minimum.
    #[error("role {held} does not satisfy minimum {required} for {action}")]
    InsufficientRole {
        /// The attempted action.
        action: Action,
        /// Role the actor holds on the project.
        held: Role,
        /// Minimum role the action demands.
        required: Role,
    },

    /// The membership registry failed.
    #[error(transparent)]
    Membership(#[from] MembershipRepositoryError),
}

impl AccessError {
    /// Classifies the error for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Unauthenticated => ErrorKind::Unauthenticated,
            Self::MalformedActorToken(_) => ErrorKind::BadRequest,
            Self::NotAMember { .. } | Self::InsufficientRole { .. } => ErrorKind::Forbidden,
            Self::Identity(_) | Self::Membership(_) => ErrorKind::Internal,
        }
    }
}

impl From<IdentityError> for AccessError {
    fn from(err: IdentityError) -> Self {
        match err {
            IdentityError::MalformedToken(token) => Self::MalformedActorToken(token),
            IdentityError::UnknownActor => Self::Unauthenticated,
            IdentityError::Lookup(reason) => Self::Identity(reason),
        }
    }
}

/// Authorization policy over the membership registry.
#[derive(Clone)]
pub struct AccessControl<M, R>
where
    M: MembershipRepository,
    R: ActorResolver,
{
    memberships: Arc<M>,
    actors: Arc<R>,
}

impl<M, R> AccessControl<M, R>
where
    M: MembershipRepository,
    R: ActorResolver,
{
    /// Creates an access control over the given registry and resolver.
    #[must_use]
    pub const fn new(memberships: Arc<M>, actors: Arc<R>) -> Self {
        Self { memberships, actors }
    }

    /// Resolves the actor token to an authenticated user id (gate step 1).
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::MalformedActorToken`] or
    /// [`AccessError::Unauthenticated`] when resolution fails.
    pub async fn identify(&self, token: &ActorToken) -> AccessResult<UserId> {
        Ok(self.actors.resolve(token).await?)
    }

    /// Checks membership presence and role sufficiency (gate steps 3 and 4).
    ///
    /// Returns the role the actor holds so callers can log or echo it.
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::NotAMember`] when the actor has no standing on
    /// the project, and [`AccessError::InsufficientRole`] when the held role
    /// is below the action's minimum.
    pub async fn require(
        &self,
        project_id: ProjectId,
        actor: UserId,
        action: Action,
    ) -> AccessResult<Role> {
        let membership = self
            .memberships
            .find(project_id, actor)
            .await?
            .ok_or(AccessError::NotAMember {
                project: project_id,
                user: actor,
            })?;

        let held = membership.role();
        let required = action.minimum_role();
        if held < required {
            return Err(AccessError::InsufficientRole {
                action,
                held,
                required,
            });
        }
        Ok(held)
    }

    /// Looks up the role a user holds on a project, if any.
    ///
    /// This is the raw registry contract: `None` means no standing at all,
    /// which callers must keep distinct from "member with too low a role".
    ///
    /// # Errors
    ///
    /// Returns [`AccessError::Membership`] when the registry lookup fails.
    pub async fn role_of(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> AccessResult<Option<Role>> {
        Ok(self
            .memberships
            .find(project_id, user_id)
            .await?
            .map(|membership| membership.role()))
    }
}
