//! Core domain logic for Taskbook.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::task::{
    Task, TaskId, TaskValidationError, DESCRIPTION_MAX_CHARS, TITLE_MAX_CHARS,
};
pub use repo::task_repo::{
    RepoError, RepoResult, SqliteTaskRepository, TaskRepository, TASKS_KEY,
};
pub use service::task_service::{TaskFilter, TaskService, TaskServiceError};
pub use store::diff::{diff_snapshots, SnapshotDiff};
pub use store::{SnapshotReceiver, TaskStore};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
