//! In-memory repository for task lifecycle tests and embedders.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskPredicate, TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored tasks regardless of status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the state lock is
    /// poisoned.
    pub fn len(&self) -> TaskRepositoryResult<usize> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.len())
    }

    /// Returns whether the repository holds no tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] if the state lock is
    /// poisoned.
    pub fn is_empty(&self) -> TaskRepositoryResult<bool> {
        Ok(self.len()? == 0)
    }
}

fn lock_error<T>(err: PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Applies predicate, ordering, and window to a snapshot of the store.
fn run_query(state: &InMemoryTaskState, query: &TaskQuery) -> Vec<Task> {
    let mut matches: Vec<&Task> = state
        .tasks
        .values()
        .filter(|task| query.predicate.matches(task))
        .collect();
    matches.sort_by(|left, right| query.order.compare(left, right));

    let (skip, limit) = query.window.map_or((0, usize::MAX), |window| {
        (
            usize::try_from(window.skip).unwrap_or(usize::MAX),
            usize::try_from(window.limit).unwrap_or(usize::MAX),
        )
    });
    matches.into_iter().skip(skip).take(limit).cloned().collect()
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let slot = state
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskRepositoryError::NotFound(task.id()))?;
        *slot = task.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn find(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(run_query(&state, query))
    }

    async fn count(&self, predicate: &TaskPredicate) -> TaskRepositoryResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let matched = state
            .tasks
            .values()
            .filter(|task| predicate.matches(task))
            .count();
        u64::try_from(matched).map_err(TaskRepositoryError::persistence)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskRepositoryError::NotFound(id))
    }
}
