//! Application services for projects and project-scoped authority.

mod access;
mod membership;
mod projects;

pub use access::{AccessControl, AccessError, AccessResult};
pub use membership::{MembershipService, MembershipServiceError, MembershipServiceResult};
pub use projects::{
    ProjectDetailsRequest, ProjectService, ProjectServiceError, ProjectServiceResult,
};
