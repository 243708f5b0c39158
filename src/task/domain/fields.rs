//! The observable field set driving change detection.

use super::{TaskDomainError, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The five mutable fields of a task, treated as one value.
///
/// Change detection for the history ledger runs over exactly this set.
/// Derived equality is strict; [`TaskFields::matches`] is the ledger's
/// comparison and ignores the end date's time of day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFields {
    name: String,
    description: String,
    priority: TaskPriority,
    status: TaskStatus,
    end_date: DateTime<Utc>,
}

impl TaskFields {
    /// Creates a validated field set.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTaskName`] or
    /// [`TaskDomainError::EmptyTaskDescription`] when the respective text is
    /// blank after trimming.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        priority: TaskPriority,
        status: TaskStatus,
        end_date: DateTime<Utc>,
    ) -> Result<Self, TaskDomainError> {
        let raw_name = name.into();
        let trimmed_name = raw_name.trim();
        if trimmed_name.is_empty() {
            return Err(TaskDomainError::EmptyTaskName);
        }
        let raw_description = description.into();
        let trimmed_description = raw_description.trim();
        if trimmed_description.is_empty() {
            return Err(TaskDomainError::EmptyTaskDescription);
        }

        Ok(Self {
            name: trimmed_name.to_owned(),
            description: trimmed_description.to_owned(),
            priority,
            status,
            end_date,
        })
    }

    /// Returns the task name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the task description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the end date.
    #[must_use]
    pub const fn end_date(&self) -> DateTime<Utc> {
        self.end_date
    }

    /// Field-wise equality with date-only end-date comparison.
    ///
    /// An update that only moves the end date's time of day is not an
    /// observable change.
    #[must_use]
    pub fn matches(&self, other: &Self) -> bool {
        self.name == other.name
            && self.description == other.description
            && self.priority == other.priority
            && self.status == other.status
            && self.end_date.date_naive() == other.end_date.date_naive()
    }
}
