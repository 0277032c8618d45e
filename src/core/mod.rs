//! Core module: the academic record consistency engine

pub mod cgpa;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod export;
pub mod grading;
pub mod models;
pub mod query;
pub mod registry;
pub mod report;
pub mod store;

pub use error::{RecordError, Result};

/// Returns the current version of the `NuRecords` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
