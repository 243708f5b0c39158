//! Immutable history entries derived from task mutations.

use super::{HistoryEntryId, Task, TaskFields, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Snapshot of a task's observable fields at the moment before a mutation.
///
/// Entries are created exactly once per accepted mutation and never updated
/// or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    id: HistoryEntryId,
    task_id: TaskId,
    fields: TaskFields,
    edited_at: DateTime<Utc>,
}

impl HistoryEntry {
    /// Snapshots the task's current fields, stamped with the current instant.
    #[must_use]
    pub fn snapshot_of(task: &Task, clock: &impl Clock) -> Self {
        Self {
            id: HistoryEntryId::new(),
            task_id: task.id(),
            fields: task.fields().clone(),
            edited_at: clock.utc(),
        }
    }

    /// Returns the entry identifier.
    #[must_use]
    pub const fn id(&self) -> HistoryEntryId {
        self.id
    }

    /// Returns the task this entry was derived from.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the snapshotted field values.
    #[must_use]
    pub const fn fields(&self) -> &TaskFields {
        &self.fields
    }

    /// Returns the edit timestamp.
    #[must_use]
    pub const fn edited_at(&self) -> DateTime<Utc> {
        self.edited_at
    }
}
