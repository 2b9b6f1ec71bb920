//! Domain model for habit tracking.
//!
//! # Responsibility
//! - Define the canonical habit record and its cadence vocabulary.
//! - Keep validation rules next to the data they protect.
//!
//! # Invariants
//! - A habit name is non-empty after trimming.
//! - Habit identity is the storage-assigned row id.

pub mod habit;
