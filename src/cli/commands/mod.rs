//! CLI command handlers for `NuRecords`.
//!
//! Each command is implemented in its own submodule. Mutating commands load
//! the full record set, apply one operation and write the full set back.

pub mod config;
pub mod dashboard;
pub mod export;
pub mod grade;
pub mod report;
pub mod student;
pub mod subject;

use nu_records::config::Config;
use nu_records::core::models::RecordSet;
use nu_records::core::store::{RecordStore, TomlStore};
use nu_records::{error, verbose};
use std::fmt::Display;
use std::io::{self, Write};

/// Print an error and exit with status 1
pub fn fail(err: impl Display) -> ! {
    error!("{err}");
    eprintln!("✗ {err}");
    std::process::exit(1);
}

/// Store backed by the configured data directory
pub fn open_store(config: &Config) -> TomlStore {
    TomlStore::new(&config.paths.data_dir)
}

/// Load every record or exit
pub fn load_records(store: &TomlStore) -> RecordSet {
    verbose!("Loading records from {}", store.dir().display());
    let records = store.load_all().unwrap_or_else(|e| fail(e));
    if let Err(problems) = records.validate_references() {
        for problem in problems {
            nu_records::warn!("{problem}");
        }
    }
    records
}

/// Write every record back or exit
pub fn save_records(store: &mut TomlStore, records: &RecordSet) {
    if let Err(e) = store.save_all(records) {
        fail(e);
    }
    verbose!("Saved records to {}", store.dir().display());
}

/// Ask a yes/no question on stdin
pub fn confirm(prompt: &str) -> bool {
    print!("{prompt} (y/n): ");
    io::stdout().flush().ok();

    let mut response = String::new();
    io::stdin().read_line(&mut response).ok();
    let response = response.trim();
    response.eq_ignore_ascii_case("y") || response.eq_ignore_ascii_case("yes")
}
