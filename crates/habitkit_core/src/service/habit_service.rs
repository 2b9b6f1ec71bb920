//! Habit use-case service.
//!
//! # Responsibility
//! - Provide stable store entry points for core callers.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::habit::{Habit, HabitId, Periodicity};
use crate::repo::habit_repo::{HabitRepository, RepoResult};

/// Use-case service wrapper for habit store operations.
pub struct HabitService<R: HabitRepository> {
    repo: R,
}

impl<R: HabitRepository> HabitService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Persists a new habit with default tracking state.
    ///
    /// # Contract
    /// - `ongoing = true`, `streak = 0`.
    /// - Returns the storage-assigned identity.
    pub fn create_habit(
        &self,
        name: impl Into<String>,
        periodicity: Periodicity,
    ) -> RepoResult<HabitId> {
        self.repo.insert(&Habit::new(name, periodicity))
    }

    /// Looks up one habit by exact name.
    pub fn find_by_name(&self, name: &str) -> RepoResult<Option<Habit>> {
        self.repo.find_by_name(name)
    }

    /// Lists every persisted habit in stable identity order.
    pub fn list_habits(&self) -> RepoResult<Vec<Habit>> {
        self.repo.list_all()
    }
}
