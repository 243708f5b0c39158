//! Behaviour tests for the recording dispatcher.

use crate::mail::{
    adapters::RecordingMailDispatcher,
    domain::MailMessage,
    ports::MailDispatcher,
};
use crate::user::domain::EmailAddress;
use rstest::rstest;

fn message(to: &str, subject: &str) -> MailMessage {
    let address = EmailAddress::new(to).expect("valid address");
    MailMessage::new(address, subject, "body")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn bulk_calls_are_recorded_separately() {
    let dispatcher = RecordingMailDispatcher::new();

    dispatcher
        .dispatch_bulk(vec![
            message("alice@example.com", "first"),
            message("bob@example.com", "first"),
        ])
        .await
        .expect("dispatch should succeed");
    dispatcher
        .dispatch_bulk(vec![message("carol@example.com", "second")])
        .await
        .expect("dispatch should succeed");

    let calls = dispatcher.bulk_calls().expect("records should be readable");
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].len(), 2);
    assert_eq!(calls[1].len(), 1);

    let all = dispatcher
        .sent_messages()
        .expect("records should be readable");
    assert_eq!(all.len(), 3);
}
