//! Shared library for `NuRecords`
//! Contains the academic record engine and the logger used by the CLI

pub mod core;
pub mod logger;

pub use crate::core::{config, get_version};
