//! Domain-focused tests for user identity values.

use crate::user::domain::{EmailAddress, User, UserDomainError};
use rstest::rstest;

#[rstest]
fn email_address_accepts_plain_address() {
    let email = EmailAddress::new("alice@example.com").expect("valid address");
    assert_eq!(email.as_str(), "alice@example.com");
}

#[rstest]
fn email_address_trims_surrounding_whitespace() {
    let email = EmailAddress::new("  bob@example.com  ").expect("valid address");
    assert_eq!(email.as_str(), "bob@example.com");
}

#[rstest]
#[case("no-at-sign")]
#[case("@example.com")]
#[case("alice@")]
#[case("a@b@c")]
#[case("alice smith@example.com")]
fn email_address_rejects_invalid_values(#[case] raw: &str) {
    let result = EmailAddress::new(raw);
    assert_eq!(
        result,
        Err(UserDomainError::InvalidEmailAddress(raw.to_owned()))
    );
}

#[rstest]
fn user_rejects_blank_name() {
    let email = EmailAddress::new("carol@example.com").expect("valid address");
    let result = User::new("   ", email);
    assert_eq!(result, Err(UserDomainError::EmptyUserName));
}

#[rstest]
fn user_trims_display_name() {
    let email = EmailAddress::new("carol@example.com").expect("valid address");
    let user = User::new("  carol  ", email).expect("valid user");
    assert_eq!(user.name(), "carol");
}
