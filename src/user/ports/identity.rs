//! Identity port mapping opaque actor tokens to user identifiers.

use crate::user::domain::{ActorToken, UserId};
use async_trait::async_trait;
use thiserror::Error;

/// Result type for actor resolution.
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Session/identity provider contract.
///
/// The surrounding service hands the raw credential from each request to an
/// implementation of this port; the core only ever sees the resolved
/// [`UserId`].
#[async_trait]
pub trait ActorResolver: Send + Sync {
    /// Resolves an actor token to the user it authenticates.
    ///
    /// # Errors
    ///
    /// Returns [`IdentityError::MalformedToken`] when the token cannot be
    /// interpreted at all, and [`IdentityError::UnknownActor`] when it is
    /// well-formed but matches no user.
    async fn resolve(&self, token: &ActorToken) -> IdentityResult<UserId>;
}

/// Errors returned by actor resolution.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentityError {
    /// The token is syntactically invalid.
    #[error("malformed actor token '{0}'")]
    MalformedToken(String),

    /// The token does not authenticate any known user.
    #[error("actor token does not resolve to a known user")]
    UnknownActor,

    /// The backing lookup failed.
    #[error("identity lookup failed: {0}")]
    Lookup(String),
}
