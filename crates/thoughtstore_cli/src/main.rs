//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `thoughtstore_core` linkage without a UI host.
//! - Optionally open a journal database and print a per-day summary.
//!
//! Usage: `thoughtstore_cli [DB_PATH]`

use chrono::Local;
use std::process::ExitCode;
use thoughtstore_core::db::open_db;
use thoughtstore_core::{SqliteKeyValueStore, StoreConfig, ThoughtGroup, ThoughtStore};

fn main() -> ExitCode {
    println!("thoughtstore_core ping={}", thoughtstore_core::ping());
    println!(
        "thoughtstore_core version={}",
        thoughtstore_core::core_version()
    );

    let Some(db_path) = std::env::args().nth(1) else {
        return ExitCode::SUCCESS;
    };

    match summarize(&db_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn summarize(db_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db(db_path)?;
    let kv = SqliteKeyValueStore::try_new(&conn)?;
    let store = ThoughtStore::try_new(kv, StoreConfig::default())?;
    let grouped = store.load_all();

    let today = Local::now().date_naive();
    print_groups("active", &grouped.active, today);
    print_groups("archived", &grouped.archived, today);
    Ok(())
}

fn print_groups(label: &str, groups: &[ThoughtGroup], today: chrono::NaiveDate) {
    let total: usize = groups.iter().map(ThoughtGroup::len).sum();
    println!("{label}: {total} thoughts in {} days", groups.len());
    for group in groups {
        let day = if group.is_on(today) {
            "Today".to_string()
        } else {
            group.date.to_string()
        };
        println!("  {day}: {}", group.len());
    }
}
