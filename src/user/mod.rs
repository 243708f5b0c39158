//! User directory and actor identity resolution.
//!
//! Account creation and credential handling are outside the core; this module
//! keeps the user records the rest of the system references by id, and
//! resolves opaque actor tokens to those ids. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
