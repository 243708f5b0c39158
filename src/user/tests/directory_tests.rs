//! Behaviour tests for the in-memory user directory.

use crate::user::{
    adapters::memory::InMemoryUserDirectory,
    domain::{EmailAddress, User, UserId},
    ports::{UserDirectory, UserDirectoryError},
};
use rstest::{fixture, rstest};

#[fixture]
fn directory() -> InMemoryUserDirectory {
    InMemoryUserDirectory::new()
}

fn user(name: &str, email: &str) -> User {
    let address = EmailAddress::new(email).expect("valid address");
    User::new(name, address).expect("valid user")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn stored_user_is_retrievable_by_id_and_email(directory: InMemoryUserDirectory) {
    let alice = user("alice", "alice@example.com");
    directory.store(&alice).await.expect("store should succeed");

    let by_id = directory
        .find_by_id(alice.id())
        .await
        .expect("lookup should succeed");
    assert_eq!(by_id, Some(alice.clone()));

    let by_email = directory
        .find_by_email(alice.email())
        .await
        .expect("lookup should succeed");
    assert_eq!(by_email, Some(alice));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_email_is_rejected(directory: InMemoryUserDirectory) {
    let first = user("alice", "shared@example.com");
    directory.store(&first).await.expect("store should succeed");

    let second = user("impostor", "shared@example.com");
    let result = directory.store(&second).await;

    assert!(matches!(
        result,
        Err(UserDirectoryError::DuplicateEmail(address)) if address.as_str() == "shared@example.com"
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_user_yields_none(directory: InMemoryUserDirectory) {
    let found = directory
        .find_by_id(UserId::new())
        .await
        .expect("lookup should succeed");
    assert!(found.is_none());
}
