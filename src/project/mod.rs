//! Projects, the membership registry, and the authorization policy.
//!
//! Every permission decision in the system reduces to a (project, user, role)
//! membership record held here: there are no global roles, and each gated
//! operation threads the project id through to the registry. The capability
//! matrix lives in [`domain::Action`]; the gate evaluation order lives in
//! [`services::AccessControl`]. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
