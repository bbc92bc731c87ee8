use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;

use winmix::config::{self, Config};
use winmix::store;

const DEFAULT_IMPORT_FILE: &str = "combined_matches.json";

fn main() -> ExitCode {
    config::init_logging();
    let cfg = Config::load();

    println!("WinMix Database Migration Tool");
    println!("==============================");
    println!();

    let code = match run(&cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            println!("Migration failed: {err:#}");
            ExitCode::from(1)
        }
    };
    print_usage();
    code
}

fn run(cfg: &Config) -> Result<()> {
    let db_path =
        store::resolve_db_path(config::arg_value("db").map(PathBuf::from), cfg.db_path.clone())?;

    println!("Creating database tables...");
    let mut conn = store::open_db(&db_path)?;
    println!("Database tables created at {}.", db_path.display());
    println!();

    if let Some(path) = import_path() {
        if path.exists() {
            println!("Importing data from {}...", path.display());
            let file = store::read_import_file(&path)?;
            let summary = store::import(&mut conn, &file)?;
            println!(
                "Imported {} teams and {} matches ({} skipped).",
                summary.teams_upserted, summary.matches_upserted, summary.matches_skipped
            );
        } else {
            println!("JSON file not found: {}", path.display());
            println!("Skipping data import.");
        }
        println!();
    }

    let status = store::status(&conn)?;
    println!("Database Status:");
    println!("- Matches: {}", status.matches);
    println!("- Teams: {}", status.teams);
    println!();
    println!("Migration completed successfully!");
    Ok(())
}

/// `--import-json` alone uses the default file; `--import-json <path>` names one.
fn import_path() -> Option<PathBuf> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    let idx = args
        .iter()
        .position(|a| a == "--import-json" || a.starts_with("--import-json="))?;
    if let Some(raw) = args[idx].strip_prefix("--import-json=") {
        if !raw.trim().is_empty() {
            return Some(PathBuf::from(raw.trim()));
        }
    }
    match args.get(idx + 1) {
        Some(next) if !next.starts_with("--") && !next.trim().is_empty() => Some(PathBuf::from(next)),
        _ => Some(PathBuf::from(DEFAULT_IMPORT_FILE)),
    }
}

fn print_usage() {
    println!();
    println!("Usage:");
    println!("  migrate                              # Create tables only");
    println!("  migrate --import-json                # Create tables and import {DEFAULT_IMPORT_FILE}");
    println!("  migrate --import-json /path/to.json  # Import from a specific file");
    println!("  migrate --db /path/to.sqlite         # Use a specific database file");
}
