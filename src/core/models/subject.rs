//! Subject model

use super::ProgrammeScope;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How marks in a subject are turned into grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GradingScheme {
    /// Letter grade and grade point on the fixed scale; counts towards CGPA
    #[serde(rename = "graded", alias = "G")]
    Graded,
    /// PASS/FAIL only; counts towards taken credit hours but not CGPA
    #[serde(rename = "pass_fail", alias = "P")]
    PassFail,
}

impl GradingScheme {
    /// Human-readable description used in listings
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::Graded => "With Grade",
            Self::PassFail => "Pass/Fail Only",
        }
    }
}

impl FromStr for GradingScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "g" | "graded" | "grade" => Ok(Self::Graded),
            "p" | "pass-fail" | "pass_fail" | "passfail" | "pass/fail" => Ok(Self::PassFail),
            _ => Err(format!("Unknown grading scheme: '{s}' (expected graded or pass-fail)")),
        }
    }
}

impl fmt::Display for GradingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Graded => write!(f, "graded"),
            Self::PassFail => write!(f, "pass-fail"),
        }
    }
}

/// A subject in the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique, immutable subject code (e.g., "TSW6223")
    pub code: String,

    /// Subject name
    pub name: String,

    /// Credit hours (positive)
    pub credit_hours: u32,

    /// Programme the subject is offered to
    pub programme: ProgrammeScope,

    /// Code of the subject that must be passed first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prerequisite: Option<String>,

    /// Grading scheme
    pub grading: GradingScheme,
}

impl Subject {
    /// Create a subject open to all programmes with no prerequisite
    ///
    /// # Arguments
    /// * `code` - Subject code
    /// * `name` - Subject name
    /// * `credit_hours` - Credit hours
    /// * `grading` - Grading scheme
    #[must_use]
    pub const fn new(code: String, name: String, credit_hours: u32, grading: GradingScheme) -> Self {
        Self {
            code,
            name,
            credit_hours,
            programme: ProgrammeScope::All,
            prerequisite: None,
            grading,
        }
    }

    /// Restrict the subject to one programme
    #[must_use]
    pub fn for_programme(mut self, programme: &str) -> Self {
        self.programme = ProgrammeScope::parse(programme);
        self
    }

    /// Declare a prerequisite subject code
    #[must_use]
    pub fn with_prerequisite(mut self, code: &str) -> Self {
        self.set_prerequisite(Some(code));
        self
    }

    /// Set or clear the prerequisite; blank codes clear it
    pub fn set_prerequisite(&mut self, code: Option<&str>) {
        self.prerequisite = code
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(ToString::to_string);
    }

    /// Whether the subject counts towards CGPA
    #[must_use]
    pub fn counts_towards_cgpa(&self) -> bool {
        self.grading == GradingScheme::Graded
    }
}
