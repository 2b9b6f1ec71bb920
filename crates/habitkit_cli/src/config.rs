//! Startup configuration for the CLI.
//!
//! # Responsibility
//! - Resolve storage, seed, and logging locations from the environment
//!   once, into an explicit handle passed to whoever needs it.
//!
//! # Invariants
//! - The log directory is always absolute, as the logging bootstrap
//!   requires.

use habitkit_core::default_log_level;
use std::env;
use std::path::{Path, PathBuf};

const DB_PATH_VAR: &str = "HABITKIT_DB";
const SEED_PATH_VAR: &str = "HABITKIT_SEED";
const LOG_DIR_VAR: &str = "HABITKIT_LOG_DIR";
const LOG_LEVEL_VAR: &str = "HABITKIT_LOG_LEVEL";

/// Resolved startup settings.
#[derive(Debug, Clone)]
pub struct Config {
    pub db_path: PathBuf,
    pub seed_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Reads settings from the environment, falling back to defaults
    /// rooted in the working directory.
    pub fn from_env() -> Self {
        let db_path = env::var(DB_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("habitkit.db"));
        let seed_path = env::var(SEED_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("seed.json"));
        let log_dir = env::var(LOG_DIR_VAR)
            .map(PathBuf::from)
            .map(absolutize)
            .unwrap_or_else(|_| default_log_dir(&db_path));
        let log_level = env::var(LOG_LEVEL_VAR).unwrap_or_else(|_| default_log_level().to_string());

        Self {
            db_path,
            seed_path,
            log_dir,
            log_level,
        }
    }
}

/// Logs live next to the database unless overridden.
fn default_log_dir(db_path: &Path) -> PathBuf {
    let parent = match db_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    absolutize(parent.join("logs"))
}

fn absolutize(path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        return path;
    }
    std::path::absolute(&path).unwrap_or(path)
}
