//! Snapshot diff for incremental view refresh.
//!
//! # Responsibility
//! - Classify the delta between two collection snapshots by stable ID.
//!
//! # Invariants
//! - Identity is `id` equality; "changed" means same id with different
//!   record contents.
//! - `added`/`changed` follow new-snapshot order, `removed` follows
//!   old-snapshot order.

use crate::model::task::{Task, TaskId};
use std::collections::{HashMap, HashSet};

/// Delta between two collection snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SnapshotDiff {
    /// Ids present only in the new snapshot.
    pub added: Vec<TaskId>,
    /// Ids present only in the old snapshot.
    pub removed: Vec<TaskId>,
    /// Ids present in both with different record contents.
    pub changed: Vec<TaskId>,
}

impl SnapshotDiff {
    /// Returns whether the two snapshots were identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }
}

/// Computes the delta between `old` and `new` snapshots.
pub fn diff_snapshots(old: &[Task], new: &[Task]) -> SnapshotDiff {
    let old_by_id: HashMap<TaskId, &Task> = old.iter().map(|task| (task.id, task)).collect();
    let new_ids: HashSet<TaskId> = new.iter().map(|task| task.id).collect();

    let mut diff = SnapshotDiff::default();

    for task in new {
        match old_by_id.get(&task.id) {
            None => diff.added.push(task.id),
            Some(previous) if *previous != task => diff.changed.push(task.id),
            Some(_) => {}
        }
    }

    for task in old {
        if !new_ids.contains(&task.id) {
            diff.removed.push(task.id);
        }
    }

    diff
}
