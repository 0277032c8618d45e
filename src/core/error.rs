//! Error types for the record engine

use std::path::PathBuf;
use thiserror::Error;

/// Why a subject cannot be taken by a student
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IneligibleReason {
    /// Subject targets a different programme
    ProgrammeMismatch {
        /// Programme the subject is offered to
        programme: String,
    },
    /// Declared prerequisite has no non-failing grade
    UnmetPrerequisite {
        /// Code of the prerequisite subject
        prerequisite: String,
    },
}

impl std::fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ProgrammeMismatch { programme } => {
                write!(f, "offered to {programme} only")
            }
            Self::UnmetPrerequisite { prerequisite } => write!(f, "requires {prerequisite}"),
        }
    }
}

/// Main error type for record operations
#[derive(Debug, Error)]
pub enum RecordError {
    /// Referenced student id is absent
    #[error("Student '{0}' not found")]
    StudentNotFound(String),

    /// Referenced subject code is absent
    #[error("Subject '{0}' not found")]
    SubjectNotFound(String),

    /// A grade already exists for the pair; use the edit path
    #[error("Grade for {subject_code} already exists for {student_id}; edit it instead")]
    DuplicateGrade {
        /// Student id
        student_id: String,
        /// Subject code
        subject_code: String,
    },

    /// No grade exists for the pair
    #[error("Grade not found for student {student_id} and subject {subject_code}")]
    GradeNotFound {
        /// Student id
        student_id: String,
        /// Subject code
        subject_code: String,
    },

    /// Mark outside [0, 100] or not an integer
    #[error("Invalid mark '{0}': enter a whole number between 0 and 100")]
    InvalidMark(String),

    /// Credit hours must be a positive integer
    #[error("Invalid credit hours '{0}': must be a positive integer")]
    InvalidCreditHours(String),

    /// Subject metadata needed to classify a grade is missing
    #[error("Grading scheme not found for subject '{0}'")]
    MissingGradingScheme(String),

    /// A subject with that code already exists
    #[error("Subject code '{0}' already exists")]
    DuplicateSubject(String),

    /// Subject is not open to the student
    #[error("Subject {subject_code} is not available to {student_id}: {reason}")]
    NotEligible {
        /// Student id
        student_id: String,
        /// Subject code
        subject_code: String,
        /// Reason the subject is closed
        reason: IneligibleReason,
    },

    /// Prerequisite refers to itself, to an unknown subject, or closes a cycle
    #[error("Invalid prerequisite for {subject_code}: {message}")]
    InvalidPrerequisite {
        /// Subject being configured
        subject_code: String,
        /// What is wrong with the prerequisite
        message: String,
    },

    /// A required text field was blank or malformed
    #[error("Invalid {field}: {message}")]
    InvalidField {
        /// Field name
        field: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// Reading or writing a record file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File involved
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// A record file could not be parsed
    #[error("Failed to parse {}: {message}", path.display())]
    Parse {
        /// File involved
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Records could not be serialized
    #[error("Failed to serialize records: {0}")]
    Serialize(String),

    /// A report template failed to render
    #[error("Failed to render report: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for record operations
pub type Result<T> = std::result::Result<T, RecordError>;
