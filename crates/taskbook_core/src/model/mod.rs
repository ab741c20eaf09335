//! Domain model for the stored task collection.
//!
//! # Responsibility
//! - Define the canonical task record persisted by the store.
//! - Own the validation rules every persisted record must satisfy.
//!
//! # Invariants
//! - Every record is identified by a stable `TaskId`.
//! - Write paths never persist a record that fails `Task::validate()`.

pub mod task;
