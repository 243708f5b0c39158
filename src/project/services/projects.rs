//! Service layer for project creation and maintenance.

use crate::error::ErrorKind;
use crate::project::{
    domain::{Action, Membership, Project, ProjectDomainError, ProjectId, Role},
    ports::{
        MembershipRepository, MembershipRepositoryError, ProjectRepository,
        ProjectRepositoryError,
    },
};
use crate::user::domain::ActorToken;
use crate::user::ports::ActorResolver;
use chrono::NaiveDate;
use std::sync::Arc;
use thiserror::Error;

use super::{AccessControl, AccessError};

/// Request payload for creating or updating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetailsRequest {
    name: String,
    description: String,
    start_date: NaiveDate,
}

impl ProjectDetailsRequest {
    /// Creates a request with the required fields.
    #[must_use]
    pub fn new(name: impl Into<String>, start_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            start_date,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Service-level errors for project operations.
#[derive(Debug, Error)]
pub enum ProjectServiceError {
    /// Authorization failed.
    #[error(transparent)]
    Access(#[from] AccessError),
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),
    /// The addressed project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),
    /// Project persistence failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),
    /// Membership persistence failed.
    #[error(transparent)]
    Membership(#[from] MembershipRepositoryError),
}

impl ProjectServiceError {
    /// Classifies the error for the transport layer.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Access(err) => err.kind(),
            Self::Domain(_) => ErrorKind::BadRequest,
            Self::ProjectNotFound(_) => ErrorKind::NotFound,
            Self::Repository(_) | Self::Membership(_) => ErrorKind::Internal,
        }
    }
}

/// Result type for project service operations.
pub type ProjectServiceResult<T> = Result<T, ProjectServiceError>;

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectService<P, M, R>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: ActorResolver,
{
    projects: Arc<P>,
    memberships: Arc<M>,
    access: Arc<AccessControl<M, R>>,
}

impl<P, M, R> ProjectService<P, M, R>
where
    P: ProjectRepository,
    M: MembershipRepository,
    R: ActorResolver,
{
    /// Creates a new project service.
    #[must_use]
    pub const fn new(
        projects: Arc<P>,
        memberships: Arc<M>,
        access: Arc<AccessControl<M, R>>,
    ) -> Self {
        Self {
            projects,
            memberships,
            access,
        }
    }

    /// Creates a project and grants the creator an Admin membership.
    ///
    /// Any authenticated user may create a project; authority on the new
    /// project flows from the membership granted here, not from any prior
    /// standing.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the actor is unauthenticated,
    /// validation fails, or persistence rejects either write.
    pub async fn create(
        &self,
        request: ProjectDetailsRequest,
        actor_token: &ActorToken,
    ) -> ProjectServiceResult<Project> {
        let actor = self.access.identify(actor_token).await?;

        let project = Project::new(request.name, request.description, request.start_date)?;
        self.projects.store(&project).await?;

        let membership = Membership::new(project.id(), actor, Role::Admin);
        self.memberships.grant(&membership).await?;

        Ok(project)
    }

    /// Updates a project's name, description, and start date.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the project is missing, the
    /// actor fails the gate, or validation fails.
    pub async fn update(
        &self,
        project_id: ProjectId,
        request: ProjectDetailsRequest,
        actor_token: &ActorToken,
    ) -> ProjectServiceResult<Project> {
        let actor = self.access.identify(actor_token).await?;
        let mut project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))?;
        self.access
            .require(project_id, actor, Action::UpdateProject)
            .await?;

        project.update_details(request.name, request.description, request.start_date)?;
        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Retrieves a project for a member.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError`] when the project is missing or the
    /// actor holds no membership on it.
    pub async fn project(
        &self,
        project_id: ProjectId,
        actor_token: &ActorToken,
    ) -> ProjectServiceResult<Project> {
        let actor = self.access.identify(actor_token).await?;
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectServiceError::ProjectNotFound(project_id))?;
        self.access
            .require(project_id, actor, Action::ViewProject)
            .await?;
        Ok(project)
    }

    /// Returns all projects.
    ///
    /// The listing carries no per-project detail beyond the aggregate itself
    /// and is intentionally ungated.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectServiceError::Repository`] when the listing fails.
    pub async fn list(&self) -> ProjectServiceResult<Vec<Project>> {
        Ok(self.projects.list_all().await?)
    }
}
