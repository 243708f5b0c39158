//! Port contracts for user identity.
//!
//! Ports define infrastructure-agnostic interfaces used by the rest of the
//! core to look up users and resolve actor credentials.

pub mod directory;
pub mod identity;

pub use directory::{UserDirectory, UserDirectoryError, UserDirectoryResult};
pub use identity::{ActorResolver, IdentityError, IdentityResult};
