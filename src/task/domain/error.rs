//! Error types for task domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing task domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task name is empty after trimming.
    #[error("task name must not be empty")]
    EmptyTaskName,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyTaskDescription,

    /// The priority value is unsupported.
    #[error("unknown task priority: {0}")]
    UnknownPriority(String),

    /// The status value is unsupported.
    #[error("unknown task status: {0}")]
    UnknownStatus(String),
}
