//! Task use-case service.
//!
//! # Responsibility
//! - Provide add/update/toggle/delete/list entry points for UI callers.
//! - Normalize user input (trim title and description) before persistence.
//! - Delegate persistence and snapshot publication to the store.
//!
//! # Invariants
//! - Service APIs never bypass repository validation contracts.
//! - Input trimming happens here, once, at the entry boundary; lower
//!   layers validate but never rewrite input.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::store::{SnapshotReceiver, TaskStore};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Completion filter for list queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TaskFilter {
    /// Every stored task.
    #[default]
    All,
    /// Tasks not yet completed.
    Active,
    /// Completed tasks only.
    Completed,
}

impl TaskFilter {
    fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Active => !task.completed,
            Self::Completed => task.completed,
        }
    }
}

/// Service error for task use-cases.
#[derive(Debug)]
pub enum TaskServiceError {
    /// Input rejected by field validation.
    Validation(TaskValidationError),
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl Display for TaskServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TaskServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::TaskNotFound(_) => None,
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<RepoError> for TaskServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            RepoError::Validation(err) => Self::Validation(err),
            other => Self::Repo(other),
        }
    }
}

/// Use-case facade over the observable task store.
pub struct TaskService<R: TaskRepository> {
    store: TaskStore<R>,
}

impl<R: TaskRepository> TaskService<R> {
    /// Creates a service over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            store: TaskStore::new(repo),
        }
    }

    /// Creates a new task from user input.
    ///
    /// # Contract
    /// - Title and description are trimmed before validation.
    /// - Returns the created record including its generated id.
    pub fn add_task(
        &self,
        title: &str,
        description: &str,
    ) -> Result<Task, TaskServiceError> {
        let task = Task::new(title.trim(), description.trim());
        self.store.add_task(&task)?;
        Ok(task)
    }

    /// Replaces title and description of an existing task.
    ///
    /// The completion flag, id and creation timestamp are untouched.
    pub fn update_task(
        &self,
        id: TaskId,
        title: &str,
        description: &str,
    ) -> Result<Task, TaskServiceError> {
        let mut current = self
            .store
            .get_task(id)?
            .ok_or(TaskServiceError::TaskNotFound(id))?;
        current.title = title.trim().to_string();
        current.description = description.trim().to_string();
        Ok(self.store.update_task(&current)?)
    }

    /// Flips the completion flag of an existing task.
    pub fn toggle_task(&self, id: TaskId) -> Result<Task, TaskServiceError> {
        Ok(self.store.toggle_task(id)?)
    }

    /// Removes an existing task.
    pub fn delete_task(&self, id: TaskId) -> Result<(), TaskServiceError> {
        Ok(self.store.delete_task(id)?)
    }

    /// Gets one task by stable ID.
    pub fn get_task(&self, id: TaskId) -> Result<Option<Task>, TaskServiceError> {
        Ok(self.store.get_task(id)?)
    }

    /// Lists tasks in stored order, filtered by completion state.
    pub fn list_tasks(&self, filter: TaskFilter) -> Result<Vec<Task>, TaskServiceError> {
        let snapshot = self.store.snapshot()?;
        Ok(snapshot
            .into_iter()
            .filter(|task| filter.matches(task))
            .collect())
    }

    /// Subscribes to the live snapshot stream.
    pub fn subscribe(&self) -> Result<SnapshotReceiver, TaskServiceError> {
        Ok(self.store.subscribe()?)
    }
}
