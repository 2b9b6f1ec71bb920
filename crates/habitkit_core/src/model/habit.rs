//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record shared by the store and the seed
//!   importer.
//! - Define the periodicity vocabulary and its db/wire spellings.
//!
//! # Invariants
//! - `name` must not be empty after trimming whitespace.
//! - `id` is assigned by storage; `0` marks an unsaved record.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage-assigned identity for a persisted habit.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type HabitId = i64;

/// Cadence at which a habit recurs.
///
/// Serialized to the lowercase strings `daily`/`weekly`/`monthly` in both
/// SQLite and seed documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Periodicity {
    Daily,
    Weekly,
    Monthly,
}

impl Periodicity {
    /// Returns the storage spelling for this cadence.
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    /// Parses the storage spelling back into a cadence.
    ///
    /// Exact match only; callers normalize case before parsing if their
    /// input is user-typed.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "daily" => Some(Self::Daily),
            "weekly" => Some(Self::Weekly),
            "monthly" => Some(Self::Monthly),
            _ => None,
        }
    }
}

impl Display for Periodicity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_db_str())
    }
}

/// Validation failure raised before any habit write reaches storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitValidationError {
    EmptyName,
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "habit name must not be empty after trimming"),
        }
    }
}

impl Error for HabitValidationError {}

/// Canonical habit record.
///
/// Timestamps are Unix epoch milliseconds assigned by storage column
/// defaults at insert time; an unsaved record carries zeros.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Row identity. `0` until the record is persisted.
    pub id: HabitId,
    /// Unique across all habits, case-sensitive exact match.
    pub name: String,
    pub periodicity: Periodicity,
    /// Whether the habit is still being tracked.
    pub ongoing: bool,
    /// Count of consecutive successful periods.
    pub streak: u32,
    /// Unix epoch milliseconds, set by storage at insert.
    pub created_at: i64,
    /// Unix epoch milliseconds, refreshed by storage on modification.
    pub updated_at: i64,
}

impl Habit {
    /// Creates an unsaved habit with default tracking state.
    ///
    /// # Invariants
    /// - `ongoing` starts as `true`, `streak` as `0`.
    /// - Identity and timestamps stay zero until storage assigns them.
    pub fn new(name: impl Into<String>, periodicity: Periodicity) -> Self {
        Self {
            id: 0,
            name: name.into(),
            periodicity,
            ongoing: true,
            streak: 0,
            created_at: 0,
            updated_at: 0,
        }
    }

    /// Checks the record against domain rules.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.name.trim().is_empty() {
            return Err(HabitValidationError::EmptyName);
        }
        Ok(())
    }

    /// Returns whether storage has assigned an identity to this record.
    pub fn is_persisted(&self) -> bool {
        self.id != 0
    }
}
