//! Habit repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable store APIs over the canonical `habits` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `Habit::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - `find_by_name` matches exactly; no trimming or case folding happens
//!   inside the store.

use crate::db::DbError;
use crate::db::migrations::latest_version;
use crate::model::habit::{Habit, HabitId, HabitValidationError, Periodicity};
use rusqlite::{Connection, Row, params};
use std::error::Error;
use std::fmt::{Display, Formatter};

const HABIT_SELECT_SQL: &str = "SELECT
    id,
    name,
    periodicity,
    ongoing,
    streak,
    created_at,
    updated_at
FROM habits";

const REQUIRED_COLUMNS: &[&str] = &[
    "id",
    "name",
    "periodicity",
    "ongoing",
    "streak",
    "created_at",
    "updated_at",
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for habit persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(HabitValidationError),
    Db(DbError),
    /// The unique `name` constraint rejected an insert.
    NameTaken(String),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NameTaken(name) => write!(f, "a habit named `{name}` already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted habit data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HabitValidationError> for RepoError {
    fn from(value: HabitValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for the habit store.
pub trait HabitRepository {
    /// Inserts a new habit and returns its storage-assigned identity.
    fn insert(&self, habit: &Habit) -> RepoResult<HabitId>;
    /// Looks up one habit by exact name.
    fn find_by_name(&self, name: &str) -> RepoResult<Option<Habit>>;
    /// Lists every persisted habit in stable identity order.
    fn list_all(&self) -> RepoResult<Vec<Habit>>;
}

/// SQLite-backed habit repository.
pub struct SqliteHabitRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteHabitRepository<'conn> {
    /// Wraps a connection after verifying its schema is usable.
    ///
    /// # Errors
    /// - `UninitializedConnection` when `PRAGMA user_version` does not
    ///   match the latest migration.
    /// - `MissingRequiredTable` / `MissingRequiredColumn` when the habits
    ///   table shape is not the one this binary expects.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        verify_schema(conn)?;
        Ok(Self { conn })
    }
}

impl HabitRepository for SqliteHabitRepository<'_> {
    fn insert(&self, habit: &Habit) -> RepoResult<HabitId> {
        habit.validate()?;

        let inserted = self.conn.execute(
            "INSERT INTO habits (name, periodicity, ongoing, streak)
             VALUES (?1, ?2, ?3, ?4);",
            params![
                habit.name.as_str(),
                habit.periodicity.as_db_str(),
                bool_to_int(habit.ongoing),
                habit.streak,
            ],
        );

        match inserted {
            Ok(_) => Ok(self.conn.last_insert_rowid()),
            Err(err) if is_unique_violation(&err) => Err(RepoError::NameTaken(habit.name.clone())),
            Err(err) => Err(err.into()),
        }
    }

    fn find_by_name(&self, name: &str) -> RepoResult<Option<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} WHERE name = ?1;"))?;

        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_habit_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<Habit>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{HABIT_SELECT_SQL} ORDER BY id ASC;"))?;

        let mut rows = stmt.query([])?;
        let mut habits = Vec::new();

        while let Some(row) = rows.next()? {
            habits.push(parse_habit_row(row)?);
        }

        Ok(habits)
    }
}

fn verify_schema(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = 'habits'
        );",
        [],
        |row| row.get(0),
    )?;
    if table_exists == 0 {
        return Err(RepoError::MissingRequiredTable("habits"));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info('habits');")?;
    let mut rows = stmt.query([])?;
    let mut present = Vec::new();
    while let Some(row) = rows.next()? {
        present.push(row.get::<_, String>(0)?);
    }

    for column in REQUIRED_COLUMNS {
        if !present.iter().any(|name| name == column) {
            return Err(RepoError::MissingRequiredColumn {
                table: "habits",
                column,
            });
        }
    }

    Ok(())
}

fn parse_habit_row(row: &Row<'_>) -> RepoResult<Habit> {
    let periodicity_text: String = row.get("periodicity")?;
    let periodicity = Periodicity::parse(&periodicity_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid periodicity `{periodicity_text}` in habits.periodicity"
        ))
    })?;

    let ongoing = match row.get::<_, i64>("ongoing")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid ongoing value `{other}` in habits.ongoing"
            )));
        }
    };

    let streak_raw: i64 = row.get("streak")?;
    let streak = u32::try_from(streak_raw).map_err(|_| {
        RepoError::InvalidData(format!("invalid streak value `{streak_raw}` in habits.streak"))
    })?;

    let habit = Habit {
        id: row.get("id")?,
        name: row.get("name")?,
        periodicity,
        ongoing,
        streak,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    habit.validate()?;
    Ok(habit)
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(error, _)
            if error.code == rusqlite::ErrorCode::ConstraintViolation
    )
}

fn bool_to_int(value: bool) -> i64 {
    if value { 1 } else { 0 }
}
