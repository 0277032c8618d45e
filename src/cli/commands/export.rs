//! Export command handler

use super::{fail, load_records, open_store};
use nu_records::config::Config;
use nu_records::core::export::to_ntriples;
use std::fs;
use std::path::Path;

/// Write the N-Triples rendering to `output`, or stdout when omitted
pub fn run(output: Option<&Path>, config: &Config) {
    let store = open_store(config);
    let records = load_records(&store);
    let triples = to_ntriples(&records);
    let count = triples.len();
    let document = triples.finish();

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                if let Err(e) = fs::create_dir_all(parent) {
                    fail(format!("Failed to create {}: {e}", parent.display()));
                }
            }
            if let Err(e) = fs::write(path, document) {
                fail(format!("Failed to write {}: {e}", path.display()));
            }
            println!("✓ Exported {count} triples to {}", path.display());
        }
        None => print!("{document}"),
    }
}
