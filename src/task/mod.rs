//! Task mutation ledger, history, assignment, and subscriptions.
//!
//! This module implements the change-detected task update: a proposed field
//! set is compared against stored state and either no-ops or commits a
//! (history-append, task-update) pair as one transaction. It also owns the
//! single-assignee relation and the opt-in notification subscriber set whose
//! members are mailed on reassignment. The module follows hexagonal
//! architecture:
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
