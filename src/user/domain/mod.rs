//! Domain model for user identity.
//!
//! Users are referenced by id everywhere else in the system; the domain here
//! is limited to the identity record itself and the validated scalars other
//! modules borrow (notably [`EmailAddress`] for notification dispatch).

mod error;
mod ids;
mod user;

pub use error::UserDomainError;
pub use ids::{ActorToken, UserId};
pub use user::{EmailAddress, User};
