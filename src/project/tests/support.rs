//! Shared wiring for project service tests.

use std::sync::Arc;

use crate::mail::adapters::RecordingMailDispatcher;
use crate::mail::domain::MailComposer;
use crate::project::adapters::memory::{InMemoryMembershipRepository, InMemoryProjectRepository};
use crate::project::domain::{Membership, Project, ProjectId, Role};
use crate::project::ports::{MembershipRepository, ProjectRepository};
use crate::project::services::{AccessControl, MembershipService, ProjectService};
use crate::user::adapters::{DirectoryActorResolver, memory::InMemoryUserDirectory};
use crate::user::domain::{ActorToken, EmailAddress, User, UserId};
use crate::user::ports::UserDirectory;
use chrono::NaiveDate;

pub(super) type TestResolver = DirectoryActorResolver<InMemoryUserDirectory>;
pub(super) type TestAccess = AccessControl<InMemoryMembershipRepository, TestResolver>;
pub(super) type TestProjectService =
    ProjectService<InMemoryProjectRepository, InMemoryMembershipRepository, TestResolver>;
pub(super) type TestMembershipService = MembershipService<
    InMemoryMembershipRepository,
    InMemoryProjectRepository,
    InMemoryUserDirectory,
    TestResolver,
    RecordingMailDispatcher,
>;

/// Fully wired in-memory service stack for the project module.
pub(super) struct TestEnv {
    pub users: Arc<InMemoryUserDirectory>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub memberships: Arc<InMemoryMembershipRepository>,
    pub dispatcher: Arc<RecordingMailDispatcher>,
    pub access: Arc<TestAccess>,
    pub project_service: TestProjectService,
    pub membership_service: TestMembershipService,
}

impl TestEnv {
    pub(super) fn new() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let dispatcher = Arc::new(RecordingMailDispatcher::new());

        let resolver = Arc::new(TestResolver::new(Arc::clone(&users)));
        let access: Arc<TestAccess> =
            Arc::new(AccessControl::new(Arc::clone(&memberships), resolver));
        let composer = Arc::new(MailComposer::new().expect("templates should parse"));

        let project_service = ProjectService::new(
            Arc::clone(&projects),
            Arc::clone(&memberships),
            Arc::clone(&access),
        );
        let membership_service = MembershipService::new(
            Arc::clone(&memberships),
            Arc::clone(&projects),
            Arc::clone(&users),
            Arc::clone(&access),
            Arc::clone(&dispatcher),
            composer,
        );

        Self {
            users,
            projects,
            memberships,
            dispatcher,
            access,
            project_service,
            membership_service,
        }
    }

    pub(super) async fn seed_user(&self, name: &str, email: &str) -> User {
        let address = EmailAddress::new(email).expect("valid address");
        let user = User::new(name, address).expect("valid user");
        self.users.store(&user).await.expect("store should succeed");
        user
    }

    pub(super) async fn seed_project(&self, name: &str) -> Project {
        let start = NaiveDate::from_ymd_opt(2026, 1, 5).expect("valid date");
        let project = Project::new(name, "seeded", start).expect("valid project");
        self.projects
            .store(&project)
            .await
            .expect("store should succeed");
        project
    }

    pub(super) async fn seed_member(&self, project_id: ProjectId, user_id: UserId, role: Role) {
        let membership = Membership::new(project_id, user_id, role);
        self.memberships
            .grant(&membership)
            .await
            .expect("grant should succeed");
    }
}

pub(super) fn token_for(user: &User) -> ActorToken {
    ActorToken::new(user.id().to_string())
}
