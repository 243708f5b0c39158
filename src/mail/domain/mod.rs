//! Domain model for notification mail.

mod composer;
mod error;
mod message;

pub use composer::{AssignmentNotice, MailComposer, ProjectInvite};
pub use error::MailComposeError;
pub use message::MailMessage;
