//! Shared wiring for task service tests.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use mockable::DefaultClock;

use crate::mail::adapters::RecordingMailDispatcher;
use crate::mail::domain::MailComposer;
use crate::project::adapters::memory::{InMemoryMembershipRepository, InMemoryProjectRepository};
use crate::project::domain::{Membership, Project, ProjectId, Role};
use crate::project::ports::{MembershipRepository, ProjectRepository};
use crate::project::services::AccessControl;
use crate::task::adapters::memory::InMemoryTaskRepository;
use crate::task::services::{AssignmentService, TaskFieldsRequest, TaskLedgerService};
use crate::user::adapters::{DirectoryActorResolver, memory::InMemoryUserDirectory};
use crate::user::domain::{ActorToken, EmailAddress, User, UserId};
use crate::user::ports::UserDirectory;

pub(super) type TestResolver = DirectoryActorResolver<InMemoryUserDirectory>;
pub(super) type TestAccess = AccessControl<InMemoryMembershipRepository, TestResolver>;
pub(super) type TestLedger = TaskLedgerService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryMembershipRepository,
    TestResolver,
    DefaultClock,
>;
pub(super) type TestAssignment = AssignmentService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryUserDirectory,
    InMemoryMembershipRepository,
    TestResolver,
    RecordingMailDispatcher,
>;

/// Fully wired in-memory service stack.
pub(super) struct TestEnv {
    pub users: Arc<InMemoryUserDirectory>,
    pub projects: Arc<InMemoryProjectRepository>,
    pub memberships: Arc<InMemoryMembershipRepository>,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub dispatcher: Arc<RecordingMailDispatcher>,
    pub ledger: TestLedger,
    pub assignment: TestAssignment,
}

impl TestEnv {
    pub(super) fn new() -> Self {
        let users = Arc::new(InMemoryUserDirectory::new());
        let projects = Arc::new(InMemoryProjectRepository::new());
        let memberships = Arc::new(InMemoryMembershipRepository::new());
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let dispatcher = Arc::new(RecordingMailDispatcher::new());

        let resolver = Arc::new(TestResolver::new(Arc::clone(&users)));
        let access: Arc<TestAccess> =
            Arc::new(AccessControl::new(Arc::clone(&memberships), resolver));
        let composer = Arc::new(MailComposer::new().expect("templates should parse"));

        let ledger = TaskLedgerService::new(
            Arc::clone(&tasks),
            Arc::clone(&projects),
            Arc::clone(&access),
            Arc::new(DefaultClock),
        );
        let assignment = AssignmentService::new(
            Arc::clone(&tasks),
            Arc::clone(&projects),
            Arc::clone(&users),
            access,
            Arc::clone(&dispatcher),
            composer,
        );

        Self {
            users,
            projects,
            memberships,
            tasks,
            dispatcher,
            ledger,
            assignment,
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

pub(super) fn end_of_quarter() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 31, 17, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn fields_request(name: &str) -> TaskFieldsRequest {
    TaskFieldsRequest::new(
        name,
        "do the thing",
        "medium",
        "not_started",
        end_of_quarter(),
    )
}
