//! Service layer for the membership registry.

use crate::error::ErrorKind;
use crate::mail::domain::{MailComposer, ProjectInvite};
use crate::mail::ports::MailDispatcher;
use crate::project::{
    domain::{Action, Membership, Project, ProjectId, Role},
    ports::{
        MembershipRepository, MembershipRepositoryError, ProjectRepository,
        ProjectRepositoryError,
    },
};
use crate::user::domain::{ActorToken, User, UserId};
use crate::user::ports::{ActorResolver, UserDirectory, UserDirectoryError};
use std::sync::Arc;
use thiserror::Error;

use super::{AccessControl, AccessError};

/// Service-level errors for membership operations.
#[derive(Debug, Error)]
pub enum MembershipServiceError {
    /// Authorization failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// The addressed project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// The addressed user does not exist.
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    /// No membership exists to change.
    #[error("user {user} holds no membership on project {project}")]
    MembershipNotFound {
        /// Project the change targeted.
        project: ProjectId,
        /// User without a membership.
        user: UserId,
    },
    /// Membership persistence failed.
    #[error(transparent)]
    Repository(#[from] MembershipRepositoryError),
    /// Project persistence failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
    /// User directory lookup failed.
    #[error(transparent)]
    Users(#[from] UserDirectoryError),
}

impl MembershipServiceError {
    /// Classifies the error for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::ProjectNotFound(_) | Self::UserNotFound(_) | Self::MembershipNotFound { .. } => {
                ErrorKind::NotFound
            }
            Self::Repository(_) | Self::Projects(_) | Self::Users(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for membership service operations.
pub type MembershipServiceResult<T> = Result<T, MembershipServiceError>;

/// Membership registry orchestration service.
#[derive(Clone)]
pub struct MembershipService<M, P, U, R, D>
where
    M: MembershipRepository,
    P: ProjectRepository,
    U: UserDirectory,
    R: ActorResolver,
    D: MailDispatcher,
{
    memberships: Arc<M>,
    projects: Arc<P>,
    users: Arc<U>,
    access: Arc<AccessControl<M, R>>,
    dispatcher: Arc<D>,
    composer: Arc<MailComposer>,
}

impl<M, P, U, R, D> MembershipService<M, P, U, R, D>
where
    M: MembershipRepository,
    P: ProjectRepository,
    U: UserDirectory,
    R: ActorResolver,
    D: MailDispatcher,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(
        memberships: Arc<M>,
        projects: Arc<P>,
        users: Arc<U>,
        access: Arc<AccessControl<M, R>>,
        dispatcher: Arc<D>,
        composer: Arc<MailComposer>,
    ) -> Self {
        Self {
            memberships,
            projects,
            users,
            access,
            dispatcher,
            composer,
        }
    }

    /// Looks up the role a user holds on a project, if any.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError::Repository`] when the registry
    /// lookup fails.
    pub async fn role_of(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipServiceResult<Option<Role>> {
        Ok(self
            .memberships
            .find(project_id, user_id)
            .await?
            .map(|membership| membership.role()))
    }

    /// Adds a user to a project with the given role.
    ///
    /// Requires the actor to hold `Admin` on the project; `Member` is not
    /// sufficient. The invited user receives an invitation mail, best-effort.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError`] when the gate fails, the invitee is
    /// unknown, or the pair already holds a membership.
    pub async fn add_member(
        &self,
        project_id: ProjectId,
        invitee_id: UserId,
        role: Role,
        actor_token: &ActorToken,
    ) -> MembershipServiceResult<Membership> {
        let actor = self.access.identify(actor_token).await?;
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(MembershipServiceError::ProjectNotFound(project_id))?;
        self.access
            .require(project_id, actor, Action::AddMember)
            .await?;

        let inviter = self
            .users
            .find_by_id(actor)
            .await?
            .ok_or(MembershipServiceError::UserNotFound(actor))?;
        let invitee = self
            .users
            .find_by_id(invitee_id)
            .await?
            .ok_or(MembershipServiceError::UserNotFound(invitee_id))?;

        let membership = Membership::new(project_id, invitee_id, role);
        self.memberships.grant(&membership).await?;

        self.send_invite(&project, &inviter, &invitee, role).await;
        Ok(membership)
    }

    /// Changes the role of an existing member.
    ///
    /// Requires the actor to hold `Admin` on the project.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError::MembershipNotFound`] when the user
    /// holds no membership to change.
    pub async fn change_role(
        &self,
        project_id: ProjectId,
        user_id: UserId,
        new_role: Role,
        actor_token: &ActorToken,
    ) -> MembershipServiceResult<Membership> {
        let actor = self.access.identify(actor_token).await?;
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(MembershipServiceError::ProjectNotFound(project_id))?;
        self.access
            .require(project_id, actor, Action::ChangeRole)
            .await?;

        let mut membership = self
            .memberships
            .find(project_id, user_id)
            .await?
            .ok_or(MembershipServiceError::MembershipNotFound {
                project: project_id,
                user: user_id,
            })?;

        membership.set_role(new_role);
        self.memberships.update(&membership).await?;
        Ok(membership)
    }

    /// Returns all memberships on a project, gated at membership presence.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipServiceError`] when the project is missing or the
    /// actor holds no membership on it.
    pub async fn members(
        &self,
        project_id: ProjectId,
        actor_token: &ActorToken,
    ) -> MembershipServiceResult<Vec<Membership>> {
        let actor = self.access.identify(actor_token).await?;
        self.projects
            .find_by_id(project_id)
            .await?
            .ok_or(MembershipServiceError::ProjectNotFound(project_id))?;
        self.access
            .require(project_id, actor, Action::ViewProject)
            .await?;

        Ok(self.memberships.members_of(project_id).await?)
    }

    /// Sends the invitation mail; failures are logged, never propagated.
    async fn send_invite(&self, project: &Project, inviter: &User, invitee: &User, role: Role) {
        let invite = ProjectInvite::new(inviter.name(), project.name(), role.as_str());
        let message = match self.composer.project_invite(invitee.email().clone(), &invite) {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(%error, "failed to compose project invitation");
                return;
            }
        };
        if let Err(error) = self.dispatcher.dispatch_bulk(vec![message]).await {
            tracing::warn!(%error, "failed to dispatch project invitation");
        }
    }
}
