//! Thread-safe in-memory task repository.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{HistoryEntry, Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// In-memory [`TaskRepository`] with assignee and subscriber reverse indexes.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    // Appended in commit order; reads reverse for most-recent-first.
    history: HashMap<TaskId, Vec<HistoryEntry>>,
    assigned_index: HashMap<UserId, HashSet<TaskId>>,
    subscriber_index: HashMap<UserId, HashSet<TaskId>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Re-derives both reverse indexes from a task write.
///
/// This is the single place the user-side views of the assignee and
/// subscriber relations are maintained, so the two sides cannot diverge.
fn sync_relations(state: &mut InMemoryTaskState, old: Option<&Task>, new: &Task) {
    if let Some(previous) = old {
        if let Some(user_id) = previous.assignee() {
            remove_from_index(&mut state.assigned_index, user_id, previous.id());
        }
        for user_id in previous.subscribers() {
            remove_from_index(&mut state.subscriber_index, *user_id, previous.id());
        }
    }

    if let Some(user_id) = new.assignee() {
        state
            .assigned_index
            .entry(user_id)
            .or_default()
            .insert(new.id());
    }
    for user_id in new.subscribers() {
        state
            .subscriber_index
            .entry(*user_id)
            .or_default()
            .insert(new.id());
    }
}

fn remove_from_index(
    index: &mut HashMap<UserId, HashSet<TaskId>>,
    user_id: UserId,
    task_id: TaskId,
) {
    if let Some(ids) = index.get_mut(&user_id) {
        ids.remove(&task_id);
        if ids.is_empty() {
            index.remove(&user_id);
        }
    }
}

fn lock_poisoned(err: impl ToString) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }

        sync_relations(&mut state, None, task);
        state.history.insert(task.id(), Vec::new());
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let old = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .clone();

        sync_relations(&mut state, Some(&old), task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn commit_update(
        &self,
        task: &Task,
        entry: &HistoryEntry,
    ) -> TaskRepositoryResult<()> {
        if entry.task_id() != task.id() {
            return Err(TaskRepositoryError::ForeignHistoryEntry {
                task: task.id(),
                entry: entry.id(),
            });
        }

        // One write lock spans both inserts, so the pair lands atomically.
        let mut state = self.state.write().map_err(lock_poisoned)?;
        let old = state
            .tasks
            .get(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?
            .clone();

        state.history.entry(task.id()).or_default().push(entry.clone());
        sync_relations(&mut state, Some(&old), task);
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn history_for_task(&self, id: TaskId) -> TaskRepositoryResult<Vec<HistoryEntry>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        if !state.tasks.contains_key(&id) {
            return Err(TaskRepositoryError::NotFound(id));
        }
        Ok(state
            .history
            .get(&id)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn tasks_assigned_to(&self, user_id: UserId) -> TaskRepositoryResult<Vec<TaskId>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .assigned_index
            .get(&user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }

    async fn tasks_subscribed_by(&self, user_id: UserId) -> TaskRepositoryResult<Vec<TaskId>> {
        let state = self.state.read().map_err(lock_poisoned)?;
        Ok(state
            .subscriber_index
            .get(&user_id)
            .map(|ids| ids.iter().copied().collect())
            .unwrap_or_default())
    }
}
