//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the single serialized task collection.
//! - Keep storage details inside the core persistence boundary.
//!
//! # Invariants
//! - The whole collection lives as one JSON array under `TASKS_KEY`;
//!   every mutation is a read-modify-write of that value in one
//!   transaction.
//! - Write paths must call `Task::validate()` before persisting.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Identifiers are unique across the stored collection.

use crate::db::{migrations::latest_version, DbError};
use crate::model::task::{Task, TaskId, TaskValidationError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task collection.
pub const TASKS_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    DuplicateId(TaskId),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::DuplicateId(id) => write!(f, "task id already exists: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}; run db bootstrap first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the stored task collection.
pub trait TaskRepository {
    /// Loads the whole collection snapshot in stored (insertion) order.
    fn load_tasks(&self) -> RepoResult<Vec<Task>>;
    /// Gets one task by stable ID.
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Appends a new task to the collection.
    fn add_task(&self, task: &Task) -> RepoResult<TaskId>;
    /// Replaces the record matching `task.id`.
    ///
    /// The stored `id` and `created_at_ms` are immutable; the stored
    /// values win over whatever the caller passes.
    fn update_task(&self, task: &Task) -> RepoResult<Task>;
    /// Flips the completion flag of the matching record.
    fn toggle_task(&self, id: TaskId) -> RepoResult<Task>;
    /// Removes the matching record from the collection.
    fn delete_task(&self, id: TaskId) -> RepoResult<()>;
}

/// SQLite-backed task repository over the single `store` row.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a bootstrapped connection after verifying its schema.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the version this binary bootstraps.
    /// - `MissingRequiredTable` when the `store` table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = latest_version();
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let has_store_table = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'store';",
                [],
                |_| Ok(()),
            )
            .optional()?
            .is_some();
        if !has_store_table {
            return Err(RepoError::MissingRequiredTable("store"));
        }

        Ok(Self { conn })
    }

    fn read_collection(&self) -> RepoResult<Vec<Task>> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM store WHERE key = ?1;",
                [TASKS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(raw) = raw else {
            return Ok(Vec::new());
        };

        let tasks: Vec<Task> = serde_json::from_str(&raw).map_err(|err| {
            RepoError::InvalidData(format!("cannot parse `{TASKS_KEY}` value: {err}"))
        })?;

        let mut seen = HashSet::with_capacity(tasks.len());
        for task in &tasks {
            task.validate()?;
            if !seen.insert(task.id) {
                return Err(RepoError::InvalidData(format!(
                    "duplicate task id `{}` in `{TASKS_KEY}` value",
                    task.id
                )));
            }
        }

        Ok(tasks)
    }

    fn write_collection(&self, tasks: &[Task]) -> RepoResult<()> {
        let serialized = serde_json::to_string(tasks).map_err(|err| {
            RepoError::InvalidData(format!("cannot serialize `{TASKS_KEY}` value: {err}"))
        })?;

        self.conn.execute(
            "INSERT INTO store (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![TASKS_KEY, serialized],
        )?;

        Ok(())
    }

    /// Runs one read-modify-write cycle over the whole collection.
    fn mutate_collection<T>(
        &self,
        mutate: impl FnOnce(&mut Vec<Task>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let tx = self.conn.unchecked_transaction()?;
        let mut tasks = self.read_collection()?;
        let output = mutate(&mut tasks)?;
        self.write_collection(&tasks)?;
        tx.commit()?;
        Ok(output)
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load_tasks(&self) -> RepoResult<Vec<Task>> {
        self.read_collection()
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let tasks = self.read_collection()?;
        Ok(tasks.into_iter().find(|task| task.id == id))
    }

    fn add_task(&self, task: &Task) -> RepoResult<TaskId> {
        task.validate()?;

        self.mutate_collection(|tasks| {
            if tasks.iter().any(|existing| existing.id == task.id) {
                return Err(RepoError::DuplicateId(task.id));
            }
            tasks.push(task.clone());
            Ok(task.id)
        })
    }

    fn update_task(&self, task: &Task) -> RepoResult<Task> {
        task.validate()?;

        self.mutate_collection(|tasks| {
            let Some(stored) = tasks.iter_mut().find(|stored| stored.id == task.id) else {
                return Err(RepoError::NotFound(task.id));
            };
            stored.title = task.title.clone();
            stored.description = task.description.clone();
            stored.completed = task.completed;
            Ok(stored.clone())
        })
    }

    fn toggle_task(&self, id: TaskId) -> RepoResult<Task> {
        self.mutate_collection(|tasks| {
            let Some(stored) = tasks.iter_mut().find(|stored| stored.id == id) else {
                return Err(RepoError::NotFound(id));
            };
            stored.toggle_completed();
            Ok(stored.clone())
        })
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.mutate_collection(|tasks| {
            let before = tasks.len();
            tasks.retain(|stored| stored.id != id);
            if tasks.len() == before {
                return Err(RepoError::NotFound(id));
            }
            Ok(())
        })
    }
}
