//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data-access contract for the habit store.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Habit::validate()` before persistence.
//! - Name uniqueness conflicts surface as semantic errors (`NameTaken`),
//!   never as raw SQLite failures.

pub mod habit_repo;
