//! Thread-safe in-memory membership registry.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::project::{
    domain::{Membership, MembershipId, ProjectId},
    ports::{MembershipRepository, MembershipRepositoryError, MembershipRepositoryResult},
};
use crate::user::domain::UserId;

/// In-memory [`MembershipRepository`] with a unique (project, user) index.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMembershipRepository {
    state: Arc<RwLock<InMemoryMembershipState>>,
}

#[derive(Debug, Default)]
struct InMemoryMembershipState {
    memberships: HashMap<MembershipId, Membership>,
    pair_index: HashMap<(ProjectId, UserId), MembershipId>,
}

impl InMemoryMembershipRepository {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn grant(&self, membership: &Membership) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let pair = (membership.project_id(), membership.user_id());
        if state.pair_index.contains_key(&pair) {
            return Err(MembershipRepositoryError::DuplicateMembership {
                project: membership.project_id(),
                user: membership.user_id(),
            });
        }

        state.pair_index.insert(pair, membership.id());
        state.memberships.insert(membership.id(), membership.clone());
        Ok(())
    }

    async fn update(&self, membership: &Membership) -> MembershipRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let pair = (membership.project_id(), membership.user_id());
        if !state.pair_index.contains_key(&pair) {
            return Err(MembershipRepositoryError::NotFound {
                project: membership.project_id(),
                user: membership.user_id(),
            });
        }
        state.memberships.insert(membership.id(), membership.clone());
        Ok(())
    }

    async fn find(
        &self,
        project_id: ProjectId,
        user_id: UserId,
    ) -> MembershipRepositoryResult<Option<Membership>> {
        let state = self.state.read().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .pair_index
            .get(&(project_id, user_id))
            .and_then(|id| state.memberships.get(id))
            .cloned())
    }

    async fn members_of(
        &self,
        project_id: ProjectId,
    ) -> MembershipRepositoryResult<Vec<Membership>> {
        let state = self.state.read().map_err(|err| {
            MembershipRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .memberships
            .values()
            .filter(|membership| membership.project_id() == project_id)
            .cloned()
            .collect())
    }
}
