//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for the stored task collection.
//! - Isolate SQLite and serialization details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Task::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `DuplicateId`)
//!   in addition to DB transport errors.

pub mod task_repo;
