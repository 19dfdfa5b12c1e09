//! # Seed Data Dump
//!
//! Prints the demo data set as JSON, for loading into a dashboard mock or
//! eyeballing what the server starts with.
//!
//! ## Usage
//! ```bash
//! # Seed generated for today
//! cargo run -p workshop-store --bin seed
//!
//! # Seed generated for a fixed day
//! cargo run -p workshop-store --bin seed -- --today 2024-08-08
//! ```

use chrono::{Local, NaiveDate};
use std::env;
use std::process::ExitCode;
use workshop_store::seed::service_catalog;
use workshop_store::SeedData;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    let mut today = Local::now().date_naive();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--today" => {
                let Some(raw) = args.get(i + 1) else {
                    eprintln!("--today needs a date (YYYY-MM-DD)");
                    return ExitCode::FAILURE;
                };
                today = match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
                    Ok(date) => date,
                    Err(e) => {
                        eprintln!("Invalid --today '{}': {}", raw, e);
                        return ExitCode::FAILURE;
                    }
                };
                i += 2;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                return ExitCode::FAILURE;
            }
        }
    }

    let seed = SeedData::generate(today);
    let dump = serde_json::json!({
        "generatedFor": today,
        "seed": seed,
        "services": service_catalog(),
    });

    match serde_json::to_string_pretty(&dump) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize seed data: {}", e);
            ExitCode::FAILURE
        }
    }
}
