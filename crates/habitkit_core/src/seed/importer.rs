//! Seed importer over the habit store.
//!
//! # Responsibility
//! - Read a JSON seed document and upsert its entries by unique name.
//! - Report created/skipped counts for the whole batch.
//!
//! # Invariants
//! - All inserts of one run commit together or not at all.
//! - An existing habit is never modified by a seed run.
//! - Entries that fail typed validation are excluded from both counters.

use crate::db::DbError;
use crate::model::habit::{Habit, Periodicity};
use crate::repo::habit_repo::{HabitRepository, RepoError, SqliteHabitRepository};
use log::{error, info};
use rusqlite::Connection;
use serde::Deserialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::Instant;

pub type SeedResult<T> = Result<T, SeedError>;

/// Fatal importer failure surfaced to the caller.
///
/// Per-entry problems never become a `SeedError`; they are skipped while
/// the run continues.
#[derive(Debug)]
pub enum SeedError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Store(RepoError),
}

impl Display for SeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "failed to read seed file: {err}"),
            Self::Parse(err) => write!(f, "malformed seed document: {err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SeedError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for SeedError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for SeedError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl From<RepoError> for SeedError {
    fn from(value: RepoError) -> Self {
        Self::Store(value)
    }
}

impl From<rusqlite::Error> for SeedError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Store(RepoError::Db(DbError::Sqlite(value)))
    }
}

/// Result of one seed run.
///
/// `Display` renders the exact user-facing status line for each case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The seed file path does not exist. Not an error.
    FileNotFound,
    /// The document parsed, but `habits` is absent, not a list, or empty.
    Empty,
    /// The batch committed.
    Completed { created: u32, skipped: u32 },
}

impl Display for SeedOutcome {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FileNotFound => write!(f, "Seed file not found."),
            Self::Empty => write!(f, "Empty habits to seed."),
            Self::Completed { created, skipped } => {
                write!(f, "Seeding completed. Created: {created}, Skipped: {skipped}")
            }
        }
    }
}

/// One habit definition as it appears in the seed document.
///
/// Typed deserialization is the validation step: entries that are not
/// objects, lack `habit_name`, or carry out-of-vocabulary field values
/// fail here and are skipped by the run loop.
#[derive(Debug, Deserialize)]
struct SeedEntry {
    habit_name: String,
    #[serde(default = "default_periodicity")]
    periodicity: Periodicity,
    #[serde(default = "default_ongoing")]
    ongoing: bool,
    #[serde(default)]
    streak: u32,
}

fn default_periodicity() -> Periodicity {
    Periodicity::Daily
}

fn default_ongoing() -> bool {
    true
}

/// Imports habit definitions from `path` into the store.
///
/// # Contract
/// - A missing file or an empty/absent habit list is a reported outcome,
///   not an error; the store is untouched in both cases.
/// - Existing names count as skipped and keep their stored state.
/// - The whole batch commits in a single transaction at the end.
///
/// # Errors
/// - `SeedError::Io` when the file exists but cannot be read.
/// - `SeedError::Parse` when the document is not valid JSON.
/// - `SeedError::Store` when the store rejects the batch; nothing is
///   committed in that case.
pub fn seed_from_file(conn: &mut Connection, path: &Path) -> SeedResult<SeedOutcome> {
    let started_at = Instant::now();
    info!(
        "event=seed_run module=seed status=start path={}",
        path.display()
    );

    match run_seed(conn, path) {
        Ok(outcome) => {
            match outcome {
                SeedOutcome::FileNotFound => info!(
                    "event=seed_run module=seed status=ok outcome=file_not_found duration_ms={}",
                    started_at.elapsed().as_millis()
                ),
                SeedOutcome::Empty => info!(
                    "event=seed_run module=seed status=ok outcome=empty duration_ms={}",
                    started_at.elapsed().as_millis()
                ),
                SeedOutcome::Completed { created, skipped } => info!(
                    "event=seed_run module=seed status=ok outcome=completed created={created} skipped={skipped} duration_ms={}",
                    started_at.elapsed().as_millis()
                ),
            }
            Ok(outcome)
        }
        Err(err) => {
            error!(
                "event=seed_run module=seed status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            );
            Err(err)
        }
    }
}

fn run_seed(conn: &mut Connection, path: &Path) -> SeedResult<SeedOutcome> {
    if !path.exists() {
        return Ok(SeedOutcome::FileNotFound);
    }

    let raw = std::fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&raw)?;

    let entries = match document.get("habits").and_then(Value::as_array) {
        Some(list) if !list.is_empty() => list,
        _ => return Ok(SeedOutcome::Empty),
    };

    let mut created = 0u32;
    let mut skipped = 0u32;

    let tx = conn.transaction()?;
    {
        let repo = SqliteHabitRepository::try_new(&tx)?;

        for entry in entries {
            let Ok(parsed) = serde_json::from_value::<SeedEntry>(entry.clone()) else {
                continue;
            };

            let name = parsed.habit_name.trim();
            if name.is_empty() {
                continue;
            }

            // Staged inserts are visible here, so a duplicate later in the
            // same batch resolves as skipped.
            if repo.find_by_name(name)?.is_some() {
                skipped += 1;
                continue;
            }

            let mut habit = Habit::new(name, parsed.periodicity);
            habit.ongoing = parsed.ongoing;
            habit.streak = parsed.streak;
            repo.insert(&habit)?;
            created += 1;
        }
    }
    tx.commit()?;

    Ok(SeedOutcome::Completed { created, skipped })
}
