//! Interactive menu session.
//!
//! # Responsibility
//! - Drive the numbered text menu over stdin/stdout.
//! - Keep menu-created habits in a transient in-session list.
//!
//! # Invariants
//! - Habit Management mutates only the in-session draft list; the store
//!   is reached solely by the diagnostic listing.
//! - End of input anywhere in the session prints the farewell and exits
//!   cleanly.

use habitkit_core::db::open_db;
use habitkit_core::{Habit, HabitService, Periodicity, RepoError, SqliteHabitRepository};
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Interrupted,
}

/// Opens the store and runs the menu loop until exit or end of input.
pub fn run_session(config: &Config) -> Result<(), Box<dyn Error>> {
    let conn = open_db(&config.db_path)?;
    info!("event=session_start module=cli status=ok");

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let result = run_menu_loop(&conn, &mut input);

    info!("event=session_end module=cli status=ok");
    result
}

fn run_menu_loop(conn: &Connection, input: &mut impl BufRead) -> Result<(), Box<dyn Error>> {
    let mut drafts: Vec<Habit> = Vec::new();

    println!("Welcome from Habit Manager APP\n");

    loop {
        println!("\nMenu:");
        println!("  1) Habit Management");
        println!("  2) Habit Analytics");
        println!("  3) Exit");
        println!("  4) Test DB connection");

        let Some(choice) = prompt(input, "\nSelect (1-4): ")? else {
            return farewell();
        };

        match choice.as_str() {
            "1" => {
                if habit_management(input, &mut drafts)? == Flow::Interrupted {
                    return farewell();
                }
            }
            "2" => {
                if analytics_menu(input)? == Flow::Interrupted {
                    return farewell();
                }
            }
            "3" => {
                println!("Exiting...");
                return Ok(());
            }
            "4" => print_persisted_habits(conn)?,
            _ => println!("Invalid choice. Please select a valid option."),
        }
    }
}

fn habit_management(input: &mut impl BufRead, drafts: &mut Vec<Habit>) -> io::Result<Flow> {
    println!("Choose one of the following options below: ");
    println!("  1) Create Habit");
    println!("  2) Update Habit Name");
    println!("  3) Delete Existing Habit");
    println!("  4) Show Existing Habits");

    let Some(choice) = prompt(input, "\nSelect (1-4): ")? else {
        return Ok(Flow::Interrupted);
    };

    match choice.as_str() {
        "1" => create_draft(input, drafts),
        "2" => rename_draft(input, drafts),
        "3" => delete_draft(input, drafts),
        "4" => {
            show_drafts(drafts);
            Ok(Flow::Continue)
        }
        _ => {
            println!("Invalid choice. Please select a valid option.");
            Ok(Flow::Continue)
        }
    }
}

fn create_draft(input: &mut impl BufRead, drafts: &mut Vec<Habit>) -> io::Result<Flow> {
    let Some(name) = prompt(input, "Enter Habit Name: ")? else {
        return Ok(Flow::Interrupted);
    };

    let periodicity = loop {
        let Some(raw) = prompt(input, "Enter Periodicity (daily/weekly/monthly): ")? else {
            return Ok(Flow::Interrupted);
        };
        match Periodicity::parse(&raw.to_ascii_lowercase()) {
            Some(parsed) => break parsed,
            None => println!("Invalid periodicity. Please enter daily, weekly, or monthly."),
        }
    };

    let now = now_epoch_ms();
    let mut draft = Habit::new(name.clone(), periodicity);
    draft.created_at = now;
    draft.updated_at = now;
    drafts.push(draft);

    println!("Habit '{name}' created successfully.");
    Ok(Flow::Continue)
}

fn rename_draft(input: &mut impl BufRead, drafts: &mut [Habit]) -> io::Result<Flow> {
    let Some(name) = prompt(input, "Enter the name of the habit to update: ")? else {
        return Ok(Flow::Interrupted);
    };

    if !draft_exists(drafts, &name) {
        println!("Habit '{name}' does not exist.");
        return Ok(Flow::Continue);
    }

    let Some(new_name) = prompt(input, "Enter the new name for the habit: ")? else {
        return Ok(Flow::Interrupted);
    };

    for draft in drafts.iter_mut() {
        if draft.name == name {
            draft.name = new_name.clone();
            draft.updated_at = now_epoch_ms();
            println!("Habit name updated to '{new_name}'.");
            break;
        }
    }

    Ok(Flow::Continue)
}

fn delete_draft(input: &mut impl BufRead, drafts: &mut Vec<Habit>) -> io::Result<Flow> {
    let Some(name) = prompt(input, "Enter the name of the habit to delete: ")? else {
        return Ok(Flow::Interrupted);
    };

    if draft_exists(drafts, &name) {
        drafts.retain(|draft| draft.name != name);
        println!("Habit '{name}' deleted successfully.");
    } else {
        println!("Habit '{name}' does not exist.");
    }

    Ok(Flow::Continue)
}

fn show_drafts(drafts: &[Habit]) {
    if drafts.is_empty() {
        println!("No existing habits.");
        return;
    }

    println!("Existing Habits:");
    for (index, draft) in drafts.iter().enumerate() {
        println!(
            "  {}. {} (Periodicity: {}, Streak: {})",
            index + 1,
            draft.name,
            draft.periodicity,
            draft.streak
        );
    }
}

fn analytics_menu(input: &mut impl BufRead) -> io::Result<Flow> {
    println!("  1) Longest Streak Overall");
    println!("  2) Longest Streak by Habit");
    println!("  3) List By Period");
    println!("  4) Broken Habits");
    println!("  5) Back to Main Menu");

    // TODO: implement streak analytics over the persisted store.
    let Some(_choice) = prompt(input, "\nSelect (1-5): ")? else {
        return Ok(Flow::Interrupted);
    };

    Ok(Flow::Continue)
}

/// Diagnostic listing of every persisted habit.
///
/// Uses one short-lived repository per call; the connection stays owned
/// by the caller.
pub fn print_persisted_habits(conn: &Connection) -> Result<(), RepoError> {
    let repo = SqliteHabitRepository::try_new(conn)?;
    let service = HabitService::new(repo);

    for habit in service.list_habits()? {
        println!(
            "Habit: {},\nPeriodicity: {},\nOngoing: {}\nStreak: {}",
            habit.name, habit.periodicity, habit.ongoing, habit.streak
        );
    }

    Ok(())
}

/// Prints the label and reads one trimmed line.
///
/// Returns `Ok(None)` when input is exhausted or unreadable; callers
/// treat that as the interrupt path.
fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;

    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => Ok(None),
        Ok(_) => Ok(Some(line.trim().to_string())),
    }
}

fn draft_exists(drafts: &[Habit], name: &str) -> bool {
    drafts.iter().any(|draft| draft.name == name)
}

fn farewell() -> Result<(), Box<dyn Error>> {
    println!("\nBye 👋");
    Ok(())
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::draft_exists;
    use habitkit_core::{Habit, Periodicity};

    #[test]
    fn draft_exists_matches_exact_name_only() {
        let drafts = vec![Habit::new("Read", Periodicity::Daily)];

        assert!(draft_exists(&drafts, "Read"));
        assert!(!draft_exists(&drafts, "read"));
        assert!(!draft_exists(&drafts, "Write"));
    }
}
