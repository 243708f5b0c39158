//! Service orchestration tests for assignment and subscriptions.

use std::sync::Arc;

use rstest::{fixture, rstest};

use crate::error::ErrorKind;
use crate::mail::domain::MailComposer;
use crate::mail::ports::dispatcher::MockMailDispatcher;
use crate::project::domain::Role;
use crate::project::services::AccessError;
use crate::task::ports::TaskRepository;
use crate::task::services::{AssignmentService, AssignmentServiceError};
use crate::user::domain::UserId;

use super::support::{TestEnv, fields_request, token_for};

#[fixture]
fn env() -> TestEnv {
    TestEnv::new()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_swaps_between_assignees(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let bob = env.seed_user("bob", "bob@example.com").await;
    let carol = env.seed_user("carol", "carol@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Member).await;
    env.seed_member(project.id(), bob.id(), Role::Member).await;
    env.seed_member(project.id(), carol.id(), Role::Member).await;

    let task = env
        .ledger
        .create_task(project.id(), fields_request("shared"), &token_for(&alice))
        .await
        .expect("creation should succeed");

    env.assignment
        .assign_task(task.id(), bob.id(), &token_for(&alice))
        .await
        .expect("first assignment should succeed");
    let reassigned = env
        .assignment
        .assign_task(task.id(), carol.id(), &token_for(&alice))
        .await
        .expect("second assignment should succeed");

    assert_eq!(reassigned.assignee(), Some(carol.id()));
    assert!(
        env.tasks
            .tasks_assigned_to(bob.id())
            .await
            .expect("index should be readable")
            .is_empty()
    );
    assert_eq!(
        env.tasks
            .tasks_assigned_to(carol.id())
            .await
            .expect("index should be readable"),
        vec![task.id()]
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignment_notifies_subscribers_not_the_assignee(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let bob = env.seed_user("bob", "bob@example.com").await;
    let carol = env.seed_user("carol", "carol@example.com").await;
    let dave = env.seed_user("dave", "dave@example.com").await;
    let project = env.seed_project("Apollo").await;
    for member in [&alice, &bob, &carol, &dave] {
        env.seed_member(project.id(), member.id(), Role::Member).await;
    }

    let task = env
        .ledger
        .create_task(project.id(), fields_request("Ignition checklist"), &token_for(&dave))
        .await
        .expect("creation should succeed");
    env.assignment
        .set_notification_subscription(task.id(), &token_for(&alice), true)
        .await
        .expect("subscription should succeed");
    env.assignment
        .set_notification_subscription(task.id(), &token_for(&bob), true)
        .await
        .expect("subscription should succeed");

    let assigned = env
        .assignment
        .assign_task(task.id(), carol.id(), &token_for(&dave))
        .await
        .expect("assignment should succeed");
    assert_eq!(assigned.assignee(), Some(carol.id()));

    let calls = env
        .dispatcher
        .bulk_calls()
        .expect("records should be readable");
    assert_eq!(calls.len(), 1);

    let recipients: Vec<&str> = calls[0]
        .iter()
        .map(|message| message.to().as_str())
        .collect();
    assert_eq!(recipients, vec!["alice@example.com", "bob@example.com"]);
    for message in &calls[0] {
        assert!(message.subject().contains("Ignition checklist"));
        assert!(message.body().contains("Apollo"));
        assert!(message.body().contains("carol"));
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reassigning_the_same_user_is_rejected(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let carol = env.seed_user("carol", "carol@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Member).await;
    env.seed_member(project.id(), carol.id(), Role::Member).await;

    let task = env
        .ledger
        .create_task(project.id(), fields_request("once"), &token_for(&alice))
        .await
        .expect("creation should succeed");
    env.assignment
        .assign_task(task.id(), carol.id(), &token_for(&alice))
        .await
        .expect("assignment should succeed");

    let result = env
        .assignment
        .assign_task(task.id(), carol.id(), &token_for(&alice))
        .await;

    let error = result.expect_err("reassignment should fail");
    assert!(matches!(
        error,
        AssignmentServiceError::AlreadyAssigned { .. }
    ));
    assert_eq!(error.kind(), ErrorKind::Forbidden);

    let unchanged = env
        .ledger
        .task_without_history(task.id(), &token_for(&alice))
        .await
        .expect("read should succeed");
    assert_eq!(unchanged.assignee(), Some(carol.id()));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_must_exist_and_be_a_member(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let outsider = env.seed_user("outsider", "outsider@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Member).await;

    let task = env
        .ledger
        .create_task(project.id(), fields_request("picky"), &token_for(&alice))
        .await
        .expect("creation should succeed");

    let unknown = env
        .assignment
        .assign_task(task.id(), UserId::new(), &token_for(&alice))
        .await;
    let unknown_error = unknown.expect_err("assignment should fail");
    assert!(matches!(
        unknown_error,
        AssignmentServiceError::AssigneeNotFound(_)
    ));
    assert_eq!(unknown_error.kind(), ErrorKind::NotFound);

    let nonmember = env
        .assignment
        .assign_task(task.id(), outsider.id(), &token_for(&alice))
        .await;
    let nonmember_error = nonmember.expect_err("assignment should fail");
    assert!(matches!(
        nonmember_error,
        AssignmentServiceError::AssigneeNotMember { .. }
    ));
    assert_eq!(nonmember_error.kind(), ErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn observer_cannot_assign(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let eve = env.seed_user("eve", "eve@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Member).await;
    env.seed_member(project.id(), eve.id(), Role::Observer).await;

    let task = env
        .ledger
        .create_task(project.id(), fields_request("guarded"), &token_for(&alice))
        .await
        .expect("creation should succeed");

    let result = env
        .assignment
        .assign_task(task.id(), alice.id(), &token_for(&eve))
        .await;

    assert!(matches!(
        result,
        Err(AssignmentServiceError::Access(
            AccessError::InsufficientRole { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassignment_clears_both_sides_and_sends_nothing(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let carol = env.seed_user("carol", "carol@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Member).await;
    env.seed_member(project.id(), carol.id(), Role::Member).await;

    let task = env
        .ledger
        .create_task(project.id(), fields_request("fleeting"), &token_for(&alice))
        .await
        .expect("creation should succeed");
    env.assignment
        .set_notification_subscription(task.id(), &token_for(&alice), true)
        .await
        .expect("subscription should succeed");
    env.assignment
        .assign_task(task.id(), carol.id(), &token_for(&alice))
        .await
        .expect("assignment should succeed");
    let calls_after_assign = env
        .dispatcher
        .bulk_calls()
        .expect("records should be readable")
        .len();

    let cleared = env
        .assignment
        .unassign_task(task.id(), &token_for(&alice))
        .await
        .expect("unassignment should succeed");

    assert_eq!(cleared.assignee(), None);
    assert!(
        env.tasks
            .tasks_assigned_to(carol.id())
            .await
            .expect("index should be readable")
            .is_empty()
    );
    let calls_after_unassign = env
        .dispatcher
        .bulk_calls()
        .expect("records should be readable")
        .len();
    assert_eq!(calls_after_unassign, calls_after_assign);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unassigning_without_assignee_is_rejected(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Member).await;

    let task = env
        .ledger
        .create_task(project.id(), fields_request("unowned"), &token_for(&alice))
        .await
        .expect("creation should succeed");

    let result = env
        .assignment
        .unassign_task(task.id(), &token_for(&alice))
        .await;

    let error = result.expect_err("unassignment should fail");
    assert!(matches!(
        error,
        AssignmentServiceError::NothingToUnassign(_)
    ));
    assert_eq!(error.kind(), ErrorKind::Forbidden);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn observer_manages_their_own_subscription(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let eve = env.seed_user("eve", "eve@example.com").await;
    let project = env.seed_project("Apollo").await;
    env.seed_member(project.id(), alice.id(), Role::Member).await;
    env.seed_member(project.id(), eve.id(), Role::Observer).await;

    let task = env
        .ledger
        .create_task(project.id(), fields_request("watched"), &token_for(&alice))
        .await
        .expect("creation should succeed");

    let subscribed = env
        .assignment
        .set_notification_subscription(task.id(), &token_for(&eve), true)
        .await
        .expect("observer subscription should succeed");
    assert!(subscribed.is_subscriber(eve.id()));
    assert_eq!(
        env.tasks
            .tasks_subscribed_by(eve.id())
            .await
            .expect("index should be readable"),
        vec![task.id()]
    );

    let unsubscribed = env
        .assignment
        .set_notification_subscription(task.id(), &token_for(&eve), false)
        .await
        .expect("observer unsubscription should succeed");
    assert!(!unsubscribed.is_subscriber(eve.id()));
    assert!(
        env.tasks
            .tasks_subscribed_by(eve.id())
            .await
            .expect("index should be readable")
            .is_empty()
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn dispatch_failure_does_not_roll_back_the_assignment(env: TestEnv) {
    let alice = env.seed_user("alice", "alice@example.com").await;
    let bob = env.seed_user("bob", "bob@example.com").await;
    let carol = env.seed_user("carol", "carol@example.com").await;
    let project = env.seed_project("Apollo").await;
    for member in [&alice, &bob, &carol] {
        env.seed_member(project.id(), member.id(), Role::Member).await;
    }

    let task = env
        .ledger
        .create_task(project.id(), fields_request("resilient"), &token_for(&alice))
        .await
        .expect("creation should succeed");
    env.assignment
        .set_notification_subscription(task.id(), &token_for(&bob), true)
        .await
        .expect("subscription should succeed");

    let mut mock = MockMailDispatcher::new();
    mock.expect_dispatch_bulk().times(1).returning(|_| {
        Err(crate::mail::ports::MailDispatchError::transport(
            std::io::Error::other("smtp unreachable"),
        ))
    });
    let failing = AssignmentService::new(
        Arc::clone(&env.tasks),
        Arc::clone(&env.projects),
        Arc::clone(&env.users),
        Arc::new(crate::project::services::AccessControl::new(
            Arc::clone(&env.memberships),
            Arc::new(super::support::TestResolver::new(Arc::clone(&env.users))),
        )),
        Arc::new(mock),
        Arc::new(MailComposer::new().expect("templates should parse")),
    );

    let assigned = failing
        .assign_task(task.id(), carol.id(), &token_for(&alice))
        .await
        .expect("assignment should survive dispatch failure");
    assert_eq!(assigned.assignee(), Some(carol.id()));

    let persisted = env
        .tasks
        .find_by_id(task.id())
        .await
        .expect("lookup should succeed")
        .expect("task should exist");
    assert_eq!(persisted.assignee(), Some(carol.id()));
}
