//! Observable task store.
//!
//! # Responsibility
//! - Serve as the single mutation entry point over the repository.
//! - Expose the stored collection to observers as a live sequence of
//!   whole-collection snapshots.
//!
//! # Invariants
//! - Every successful mutation publishes exactly one post-mutation
//!   snapshot to all live subscribers.
//! - Failed mutations publish nothing.
//! - A new subscriber receives the current snapshot immediately.

pub mod diff;

use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use log::debug;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::Mutex;

/// Receiving end of the snapshot stream handed to observers.
///
/// Each received item is a complete collection snapshot in stored order.
pub type SnapshotReceiver = Receiver<Vec<Task>>;

/// Mutation entry point publishing collection snapshots to observers.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    subscribers: Mutex<Vec<Sender<Vec<Task>>>>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Creates a store over the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            subscribers: Mutex::new(Vec::new()),
        }
    }

    /// Subscribes to the snapshot stream.
    ///
    /// The current snapshot is delivered immediately, so observers can
    /// render without waiting for the first mutation.
    pub fn subscribe(&self) -> RepoResult<SnapshotReceiver> {
        let current = self.repo.load_tasks()?;
        let (tx, rx) = channel();
        // The send cannot fail here: rx is still alive in this scope.
        let _ = tx.send(current);
        self.lock_subscribers().push(tx);
        Ok(rx)
    }

    /// Loads the current collection snapshot without subscribing.
    pub fn snapshot(&self) -> RepoResult<Vec<Task>> {
        self.repo.load_tasks()
    }

    /// Gets one task by stable ID from the current snapshot.
    pub fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        self.repo.get_task(id)
    }

    /// Appends a task and publishes the post-mutation snapshot.
    pub fn add_task(&self, task: &Task) -> RepoResult<TaskId> {
        let id = self.repo.add_task(task)?;
        self.publish()?;
        Ok(id)
    }

    /// Replaces the matching record and publishes the post-mutation snapshot.
    pub fn update_task(&self, task: &Task) -> RepoResult<Task> {
        let updated = self.repo.update_task(task)?;
        self.publish()?;
        Ok(updated)
    }

    /// Flips a completion flag and publishes the post-mutation snapshot.
    pub fn toggle_task(&self, id: TaskId) -> RepoResult<Task> {
        let toggled = self.repo.toggle_task(id)?;
        self.publish()?;
        Ok(toggled)
    }

    /// Removes the matching record and publishes the post-mutation snapshot.
    pub fn delete_task(&self, id: TaskId) -> RepoResult<()> {
        self.repo.delete_task(id)?;
        self.publish()?;
        Ok(())
    }

    fn publish(&self) -> RepoResult<()> {
        let snapshot = self.repo.load_tasks()?;
        let mut subscribers = self.lock_subscribers();
        // Dropped receivers fail the send; prune them in the same pass.
        subscribers.retain(|tx| tx.send(snapshot.clone()).is_ok());
        debug!(
            "event=snapshot_publish module=store status=ok tasks={} subscribers={}",
            snapshot.len(),
            subscribers.len()
        );
        Ok(())
    }

    fn lock_subscribers(&self) -> std::sync::MutexGuard<'_, Vec<Sender<Vec<Task>>>> {
        match self.subscribers.lock() {
            Ok(guard) => guard,
            // A panicked subscriber list holds only channel handles; the
            // data cannot be left in a torn state.
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}
