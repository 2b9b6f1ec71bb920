//! HabitKit command-line entry point.
//!
//! # Responsibility
//! - Parse the command line and dispatch menu/seed/list actions.
//! - Resolve configuration and bootstrap logging before any store access.

mod config;
mod session;

use clap::{Parser, Subcommand};
use config::Config;
use habitkit_core::db::open_db;
use habitkit_core::{init_logging, seed_from_file};
use std::error::Error;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "habitkit",
    version,
    about = "Personal habit tracker over a seedable SQLite store"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Import habits from the configured seed file into the store.
    Seed,
    /// Print every persisted habit without entering the menu.
    List,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = Config::from_env();

    // File logging is best-effort for a terminal app; a read-only log
    // location must not block the session.
    if let Err(message) = init_logging(&config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("warning: file logging disabled: {message}");
    }

    let result = match cli.command {
        Some(Command::Seed) => run_seed(&config),
        Some(Command::List) => run_list(&config),
        None => session::run_session(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_seed(config: &Config) -> Result<(), Box<dyn Error>> {
    let mut conn = open_db(&config.db_path)?;
    let outcome = seed_from_file(&mut conn, &config.seed_path)?;
    println!("{outcome}");
    Ok(())
}

fn run_list(config: &Config) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    session::print_persisted_habits(&conn)?;
    Ok(())
}
