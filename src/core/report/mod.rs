//! Report generation module
//!
//! Reports are downstream views of the records: result slips, listings and
//! the dashboard, rendered to Markdown through `askama` templates.

pub mod markdown;

use crate::core::error::{RecordError, Result};
use crate::core::models::RecordSet;
use crate::core::query::{QueryProjection, DEFAULT_TOP_N};
use crate::info;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use markdown::{DashboardReporter, SlipReporter, StudentListReporter, SubjectListReporter};

/// Report kinds the CLI can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// One student's grades and aggregates
    Slip,
    /// All students
    Students,
    /// The subject catalog
    Subjects,
    /// Ranking, summary and failure insight
    Dashboard,
}

impl ReportKind {
    /// Default output file stem
    #[must_use]
    pub const fn file_stem(&self) -> &'static str {
        match self {
            Self::Slip => "result_slip",
            Self::Students => "students",
            Self::Subjects => "subjects",
            Self::Dashboard => "dashboard",
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "slip" | "result-slip" => Ok(Self::Slip),
            "students" => Ok(Self::Students),
            "subjects" => Ok(Self::Subjects),
            "dashboard" => Ok(Self::Dashboard),
            _ => Err(format!("Unknown report kind: {s}")),
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_stem())
    }
}

/// Data context for report generation
#[derive(Debug)]
pub struct ReportContext<'a> {
    /// Records being reported
    pub records: &'a RecordSet,
    /// Read-only index over `records`
    pub projection: QueryProjection<'a>,
    /// Size of the dashboard ranking
    pub top_n: usize,
}

impl<'a> ReportContext<'a> {
    /// Create a context with the default ranking size
    #[must_use]
    pub fn new(records: &'a RecordSet) -> Self {
        Self {
            records,
            projection: QueryProjection::build(records),
            top_n: DEFAULT_TOP_N,
        }
    }

    /// Override the ranking size (values below 1 become 1)
    #[must_use]
    pub fn with_top_n(mut self, top_n: usize) -> Self {
        self.top_n = top_n.max(1);
        self
    }
}

/// Trait for report generators
pub trait ReportGenerator {
    /// Generate report content as a string
    ///
    /// # Errors
    /// Returns an error if a referenced record is missing or rendering fails
    fn render(&self, ctx: &ReportContext<'_>) -> Result<String>;

    /// Generate a report to a file, creating parent directories
    ///
    /// # Errors
    /// Returns an error if rendering or file writing fails
    fn generate(&self, ctx: &ReportContext<'_>, output_path: &Path) -> Result<()> {
        let content = self.render(ctx)?;
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|source| RecordError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(output_path, content).map_err(|source| RecordError::Io {
            path: output_path.to_path_buf(),
            source,
        })?;
        info!("Report written to {}", output_path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_parse() {
        assert_eq!("slip".parse::<ReportKind>(), Ok(ReportKind::Slip));
        assert_eq!("Dashboard".parse::<ReportKind>(), Ok(ReportKind::Dashboard));
        assert!("pdf".parse::<ReportKind>().is_err());
        assert_eq!(ReportKind::Students.to_string(), "students");
    }

    #[test]
    fn test_context_top_n_floor() {
        let records = RecordSet::default();
        let ctx = ReportContext::new(&records).with_top_n(0);
        assert_eq!(ctx.top_n, 1);
    }
}
