//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `agenda_core` linkage and
//!   schema bootstrap.
//! - Keep output deterministic for quick local sanity checks.

use agenda_core::db::{migrations::latest_version, open_db_in_memory};

fn main() {
    println!("agenda_core version={}", agenda_core::core_version());

    match open_db_in_memory() {
        Ok(_conn) => {
            println!("agenda_core schema=ready migration_version={}", latest_version());
        }
        Err(err) => {
            eprintln!("agenda_core schema=failed error={err}");
            std::process::exit(1);
        }
    }
}
