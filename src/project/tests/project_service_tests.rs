//! Service orchestration tests for project lifecycle.

use chrono::NaiveDate;
use rstest::{fixture, rstest};

use crate::error::ErrorKind;
use crate::project::domain::{ProjectId, Role};
use crate::project::services::{AccessError, ProjectDetailsRequest, ProjectServiceError};
use crate::user::domain::ActorToken;

use super::support::{TestEnv, token_for};

#[fixture]
fn env() -> TestEnv {
    TestEnv::new()
}

fn details(name: &str) -> ProjectDetailsRequest {
    let start = NaiveDate::from_ymd_opt(2026, 2, 2).expect("valid date");
    ProjectDetailsRequest::new(name, start).with_description("a fresh start")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creator_becomes_admin_of_the_new_project(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;

    let project = env
        .project_service
        .create(details("Apollo"), &token_for(&alice))
        .await
        .expect("creation should succeed");

    assert_eq!(project.name(), "Apollo");
    let role = env
        .membership_service
        .role_of(project.id(), alice.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(role, Some(Role::Admin));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unauthenticated_creation_is_rejected(env: TestEnv) {
    let result = env
        .project_service
        .create(details("Apollo"), &ActorToken::new(uuid::Uuid::new_v4().to_string()))
        .await;

    let error = result.expect_err("creation should fail");
    assert_eq!(error.kind(), ErrorKind::Unauthenticated);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_project_name_is_rejected(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;

    let result = env
        .project_service
        .create(details("   "), &token_for(&alice))
        .await;

    let error = result.expect_err("creation should fail");
    assert!(matches!(error, ProjectServiceError::Domain(_)));
    assert_eq!(error.kind(), ErrorKind::BadRequest);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn member_updates_project_details(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let bob = env.seed_user("bob", "bob@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), bob.id(), Role::Member).await;
    env.seed_member(project.id(), alice.id(), Role::Admin).await;

    let updated = env
        .project_service
        .update(project.id(), details("Apollo v2"), &token_for(&bob))
        .await
        .expect("member update should succeed");

    assert_eq!(updated.name(), "Apollo v2");
    assert_eq!(updated.description(), "a fresh start");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn observer_cannot_update_project(env: TestEnv) {
    let eve = env.seed_user("eve", "eve@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), eve.id(), Role::Observer).await;

    let result = env
        .project_service
        .update(project.id(), details("defaced"), &token_for(&eve))
        .await;

    assert!(matches!(
        result,
        Err(ProjectServiceError::Access(
            AccessError::InsufficientRole { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_project_is_reported_before_membership(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;

    let result = env
        .project_service
        .update(ProjectId::new(), details("ghost"), &token_for(&alice))
        .await;

    let error = result.expect_err("update should fail");
    assert!(matches!(error, ProjectServiceError::ProjectNotFound(_)));
    assert_eq!(error.kind(), ErrorKind::NotFound);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reads_require_membership_presence(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let eve = env.seed_user("eve", "eve@example.com").await;
    let mallory = env.seed_user("mallory", "mallory@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Admin).await;
    env.seed_member(project.id(), eve.id(), Role::Observer).await;

    let as_observer = env
        .project_service
        .project(project.id(), &token_for(&eve))
        .await
        .expect("observer read should succeed");
    assert_eq!(as_observer.id(), project.id());

    let as_stranger = env
        .project_service
        .project(project.id(), &token_for(&mallory))
        .await;
    let error = as_stranger.expect_err("stranger read should fail");
    assert!(matches!(
        error,
        ProjectServiceError::Access(AccessError::NotAMember { .. })
    ));
    assert_eq!(error.kind(), ErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn listing_is_ungated(env: TestEnv) {
    env.seed_project("Apollo").await;
    env.seed_project("Artemis").await;

    let projects = env
        .project_service
        .list()
        .await
        .expect("listing should succeed");
    assert_eq!(projects.len(), 2);
}
