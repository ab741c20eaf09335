//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical task record stored in the serialized collection.
//! - Provide the validation gate shared by every write path.
//!
//! # Invariants
//! - `id` is generated once and never reused for another task.
//! - `title` is non-blank and at most `TITLE_MAX_CHARS` characters.
//! - `description` is at most `DESCRIPTION_MAX_CHARS` characters.
//! - `created_at_ms` is set at creation and never rewritten afterwards.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;
/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

/// Stable identifier for a task record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// Validation failure for task field constraints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    /// Title is empty or whitespace-only.
    EmptyTitle,
    /// Title exceeds `TITLE_MAX_CHARS` characters.
    TitleTooLong { len: usize },
    /// Description exceeds `DESCRIPTION_MAX_CHARS` characters.
    DescriptionTooLong { len: usize },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "task title cannot be empty"),
            Self::TitleTooLong { len } => write!(
                f,
                "task title is {len} characters, maximum is {TITLE_MAX_CHARS}"
            ),
            Self::DescriptionTooLong { len } => write!(
                f,
                "task description is {len} characters, maximum is {DESCRIPTION_MAX_CHARS}"
            ),
        }
    }
}

impl Error for TaskValidationError {}

/// Canonical task record.
///
/// Field names are the stored JSON schema; changing them changes the
/// on-disk format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Stable global ID, unique across the stored collection.
    pub id: TaskId,
    /// Short task summary shown in the list view.
    pub title: String,
    /// Optional longer body text.
    pub description: String,
    /// Completion flag toggled by the user.
    pub completed: bool,
    /// Unix epoch milliseconds at creation. Informative ordering only.
    pub created_at_ms: i64,
}

impl Task {
    /// Creates a new task with a generated stable ID and current timestamp.
    ///
    /// Does not validate; callers persist through a repository which does.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), now_epoch_ms(), title, description)
    }

    /// Creates a task with a caller-provided ID and timestamp.
    ///
    /// Used by tests and import paths where identity already exists.
    pub fn with_id(
        id: TaskId,
        created_at_ms: i64,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            description: description.into(),
            completed: false,
            created_at_ms,
        }
    }

    /// Checks field constraints required for persistence.
    ///
    /// # Errors
    /// Returns the first violated constraint in field order.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::EmptyTitle);
        }
        let title_len = self.title.chars().count();
        if title_len > TITLE_MAX_CHARS {
            return Err(TaskValidationError::TitleTooLong { len: title_len });
        }
        let description_len = self.description.chars().count();
        if description_len > DESCRIPTION_MAX_CHARS {
            return Err(TaskValidationError::DescriptionTooLong {
                len: description_len,
            });
        }
        Ok(())
    }

    /// Returns whether the record satisfies all field constraints.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Flips the completion flag.
    pub fn toggle_completed(&mut self) {
        self.completed = !self.completed;
    }
}

/// Current wall-clock time in unix epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX))
        .unwrap_or(0)
}
