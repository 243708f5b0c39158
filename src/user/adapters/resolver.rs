//! Actor resolver backed by the user directory.
//!
//! Tokens are UUID strings naming the user directly, mirroring the simple
//! header-based scheme of the surrounding service. A production deployment
//! would substitute a session-store adapter behind the same port.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::user::{
    domain::{ActorToken, UserId},
    ports::{ActorResolver, IdentityError, IdentityResult, UserDirectory},
};

/// [`ActorResolver`] that parses the token as a user UUID and confirms the
/// user exists in the directory.
#[derive(Debug, Clone)]
pub struct DirectoryActorResolver<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
}

impl<D> DirectoryActorResolver<D>
where
    D: UserDirectory,
{
    /// Creates a resolver over the given directory.
    #[must_use]
    pub const fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> ActorResolver for DirectoryActorResolver<D>
where
    D: UserDirectory,
{
    async fn resolve(&self, token: &ActorToken) -> IdentityResult<UserId> {
        let uuid = Uuid::parse_str(token.as_str())
            .map_err(|_| IdentityError::MalformedToken(token.as_str().to_owned()))?;
        let id = UserId::from_uuid(uuid);

        let user = self
            .directory
            .find_by_id(id)
            .await
            .map_err(|err| IdentityError::Lookup(err.to_string()))?;

        match user {
            Some(found) => Ok(found.id()),
            None => Err(IdentityError::UnknownActor),
        }
    }
}
