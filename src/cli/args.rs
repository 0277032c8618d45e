//! CLI argument definitions for `NuRecords`

use clap::{builder::BoolishValueParser, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use nu_records::config::ConfigOverrides;
use nu_records::logger::Level;

/// CLI log level argument
///
/// Converts to lowercase strings for config storage and to `logger::Level`
/// for runtime use.
#[derive(Copy, Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum LogLevelArg {
    /// Error-level logging
    Error,
    /// Warning-level logging
    Warn,
    /// Info-level logging
    Info,
    /// Debug-level logging
    Debug,
}

impl From<LogLevelArg> for Level {
    fn from(arg: LogLevelArg) -> Self {
        match arg {
            LogLevelArg::Error => Self::Error,
            LogLevelArg::Warn => Self::Warn,
            LogLevelArg::Info => Self::Info,
            LogLevelArg::Debug => Self::Debug,
        }
    }
}

impl std::fmt::Display for LogLevelArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let as_str = match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        };
        write!(f, "{as_str}")
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigSubcommand {
    /// Display configuration values.
    ///
    /// If a KEY is provided, displays only that configuration value.
    /// If no KEY is provided, displays all configuration values.
    Get {
        /// Optional configuration key to display (e.g., `level`, `data_dir`, `top_n`)
        #[arg(value_name = "KEY")]
        key: Option<String>,
    },
    /// Set a configuration value.
    Set {
        /// Configuration key to set
        #[arg(value_name = "KEY")]
        key: String,
        /// Value to set
        #[arg(value_name = "VALUE")]
        value: String,
    },
    /// Unset a configuration value.
    Unset {
        /// Configuration key to unset
        #[arg(value_name = "KEY")]
        key: String,
    },
    /// Reset configuration to defaults (requires confirmation).
    Reset,
}

#[derive(Debug, Subcommand)]
pub enum StudentCommand {
    /// Enroll a new student; the id is assigned automatically.
    Add {
        /// Full name
        #[arg(long)]
        name: String,
        /// Programme name or short form (e.g. `BCS(AI)`)
        #[arg(long)]
        programme: String,
        /// Contact email
        #[arg(long)]
        email: String,
    },
    /// Edit a student's name, programme or email.
    Edit {
        /// Student id (e.g. S001)
        #[arg(value_name = "ID")]
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New programme
        #[arg(long)]
        programme: Option<String>,
        /// New email
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a student and all of their grades.
    Delete {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List every student.
    List,
    /// Search students by id, name, programme or email.
    Search {
        /// Case-insensitive keyword
        #[arg(value_name = "KEYWORD")]
        keyword: String,
    },
    /// Recommend subjects the student can take next.
    Recommend {
        /// Student id
        #[arg(value_name = "ID")]
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum SubjectCommand {
    /// Add a subject to the catalog.
    Add {
        /// Unique subject code
        #[arg(value_name = "CODE")]
        code: String,
        /// Subject name
        #[arg(long)]
        name: String,
        /// Credit hours (positive)
        #[arg(long)]
        credits: u32,
        /// Programme the subject is offered to (`all` for every programme)
        #[arg(long, default_value = "all")]
        programme: String,
        /// Code of the prerequisite subject
        #[arg(long)]
        prerequisite: Option<String>,
        /// Grading scheme: graded or pass-fail
        #[arg(long, default_value = "graded")]
        grading: String,
    },
    /// Edit a subject; the code cannot change.
    Edit {
        /// Subject code
        #[arg(value_name = "CODE")]
        code: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New credit hours
        #[arg(long)]
        credits: Option<u32>,
        /// New programme
        #[arg(long)]
        programme: Option<String>,
        /// New prerequisite code
        #[arg(long, conflicts_with = "clear_prerequisite")]
        prerequisite: Option<String>,
        /// Remove the prerequisite
        #[arg(long)]
        clear_prerequisite: bool,
        /// New grading scheme
        #[arg(long)]
        grading: Option<String>,
    },
    /// Delete a subject and every grade recorded for it.
    Delete {
        /// Subject code
        #[arg(value_name = "CODE")]
        code: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// List the subject catalog.
    List,
    /// Search subjects by code or name.
    Search {
        /// Case-insensitive keyword
        #[arg(value_name = "KEYWORD")]
        keyword: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum GradeCommand {
    /// Record a mark for a subject the student is eligible for.
    Add {
        /// Student id
        #[arg(value_name = "STUDENT")]
        student_id: String,
        /// Subject code
        #[arg(value_name = "SUBJECT")]
        subject_code: String,
        /// Whole-number mark between 0 and 100
        #[arg(value_name = "MARK")]
        mark: String,
    },
    /// Replace the mark of an existing grade.
    Edit {
        /// Student id
        #[arg(value_name = "STUDENT")]
        student_id: String,
        /// Subject code
        #[arg(value_name = "SUBJECT")]
        subject_code: String,
        /// Whole-number mark between 0 and 100
        #[arg(value_name = "MARK")]
        mark: String,
    },
    /// List graded subjects, for one student or everyone.
    List {
        /// Student id
        #[arg(value_name = "STUDENT")]
        student_id: Option<String>,
    },
    /// Search grades by student id or subject code.
    Search {
        /// Case-insensitive keyword
        #[arg(value_name = "KEYWORD")]
        keyword: String,
    },
    /// Show which subjects a student may be graded in now.
    Eligible {
        /// Student id
        #[arg(value_name = "STUDENT")]
        student_id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ReportCommand {
    /// Result slip for one student.
    Slip {
        /// Student id
        #[arg(value_name = "STUDENT")]
        student_id: String,
        /// Output file (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Listing of every student.
    Students {
        /// Output file (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Listing of the subject catalog.
    Subjects {
        /// Output file (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// Ranking, summary and failure insight.
    Dashboard {
        /// Output file (defaults to the configured reports directory)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    ///
    /// If no subcommand is provided, displays all configuration values.
    Config {
        #[command(subcommand)]
        subcommand: Option<ConfigSubcommand>,
    },
    /// Manage students.
    Student {
        #[command(subcommand)]
        action: StudentCommand,
    },
    /// Manage the subject catalog.
    Subject {
        #[command(subcommand)]
        action: SubjectCommand,
    },
    /// Record, edit and inspect grades.
    Grade {
        #[command(subcommand)]
        action: GradeCommand,
    },
    /// Print top students, the student summary and the most failed subject.
    Dashboard,
    /// Write a Markdown report.
    Report {
        #[command(subcommand)]
        kind: ReportCommand,
    },
    /// Export the records and derived pass facts as N-Triples.
    Export {
        /// Output file (prints to stdout when omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Parser, Debug)]
#[command(
    name = "nurecords",
    about = "Student, subject and grade records with CGPA tracking",
    version = env!("CARGO_PKG_VERSION")
)]
pub struct Cli {
    /// Set the runtime log level (error|warn|info|debug). Falls back to config if omitted.
    #[arg(long, value_enum)]
    pub log_level: Option<LogLevelArg>,

    /// Enable verbose output (runtime only)
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Enable debug-level logging and runtime debug flag (shorthand)
    #[arg(long = "debug")]
    pub debug_flag: bool,

    /// Write runtime logs to a file
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    // --- Config overrides ---
    /// Override config logging level
    #[arg(long = "config-level", value_enum)]
    pub config_level: Option<LogLevelArg>,

    /// Override config log file path
    #[arg(long = "config-log-file", value_name = "PATH")]
    pub config_log_file: Option<PathBuf>,

    /// Override config verbose flag (true/false)
    #[arg(long = "config-verbose", value_parser = BoolishValueParser::new())]
    pub config_verbose: Option<bool>,

    /// Override config record data directory
    #[arg(long = "config-data-dir", value_name = "DIR")]
    pub config_data_dir: Option<PathBuf>,

    /// Override config record data directory (short form)
    #[arg(long = "data-dir", value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Override config reports directory
    #[arg(long = "config-reports-dir", value_name = "DIR")]
    pub config_reports_dir: Option<PathBuf>,

    /// Override config reports directory (short form)
    #[arg(long = "reports-dir", value_name = "DIR")]
    pub reports_dir: Option<PathBuf>,

    /// Override the dashboard ranking size
    #[arg(long = "top-n", value_name = "N")]
    pub top_n: Option<usize>,

    /// Subcommand to execute.
    /// A subcommand is required to run the CLI.
    #[command(subcommand)]
    pub command: Command,
}

fn path_string(path: Option<&PathBuf>) -> Option<String> {
    path.map(|p| p.to_string_lossy().to_string())
}

impl Cli {
    /// Convert CLI flags into config overrides
    ///
    /// Short-form flags (e.g., `--data-dir`) take precedence over long-form
    /// flags (e.g., `--config-data-dir`) when both are provided.
    pub fn to_config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            level: self.config_level.map(|lvl| lvl.to_string().to_lowercase()),
            file: path_string(self.config_log_file.as_ref()),
            verbose: self.config_verbose,
            data_dir: path_string(self.data_dir.as_ref())
                .or_else(|| path_string(self.config_data_dir.as_ref())),
            reports_dir: path_string(self.reports_dir.as_ref())
                .or_else(|| path_string(self.config_reports_dir.as_ref())),
            top_n: self.top_n,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_cli() -> Cli {
        Cli {
            log_level: None,
            verbose: false,
            debug_flag: false,
            log_file: None,
            config_level: None,
            config_log_file: None,
            config_verbose: None,
            config_data_dir: None,
            data_dir: None,
            config_reports_dir: None,
            reports_dir: None,
            top_n: None,
            command: Command::Config { subcommand: None },
        }
    }

    #[test]
    fn test_log_level_display() {
        assert_eq!(LogLevelArg::Error.to_string(), "error");
        assert_eq!(LogLevelArg::Warn.to_string(), "warn");
        assert_eq!(LogLevelArg::Info.to_string(), "info");
        assert_eq!(LogLevelArg::Debug.to_string(), "debug");
    }

    #[test]
    fn test_log_level_to_logger_level() {
        assert_eq!(Level::from(LogLevelArg::Error), Level::Error);
        assert_eq!(Level::from(LogLevelArg::Debug), Level::Debug);
    }

    #[test]
    fn test_to_config_overrides_empty() {
        let overrides = base_cli().to_config_overrides();
        assert!(overrides.level.is_none());
        assert!(overrides.file.is_none());
        assert!(overrides.verbose.is_none());
        assert!(overrides.data_dir.is_none());
        assert!(overrides.reports_dir.is_none());
        assert!(overrides.top_n.is_none());
    }

    #[test]
    fn test_short_form_precedence_over_long_form() {
        let cli = Cli {
            config_level: Some(LogLevelArg::Debug),
            config_data_dir: Some(PathBuf::from("/long/data")),
            data_dir: Some(PathBuf::from("/short/data")),
            config_reports_dir: Some(PathBuf::from("/long/reports")),
            top_n: Some(5),
            ..base_cli()
        };

        let overrides = cli.to_config_overrides();
        assert_eq!(overrides.level, Some("debug".to_string()));
        assert_eq!(overrides.data_dir, Some("/short/data".to_string()));
        assert_eq!(overrides.reports_dir, Some("/long/reports".to_string()));
        assert_eq!(overrides.top_n, Some(5));
    }

    #[test]
    fn test_parse_grade_add() {
        let cli = Cli::try_parse_from(["nurecords", "grade", "add", "S001", "TSW6223", "85"])
            .expect("grade add should parse");
        match cli.command {
            Command::Grade {
                action:
                    GradeCommand::Add {
                        student_id,
                        subject_code,
                        mark,
                    },
            } => {
                assert_eq!(student_id, "S001");
                assert_eq!(subject_code, "TSW6223");
                assert_eq!(mark, "85");
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_prerequisite_flags_conflict() {
        let result = Cli::try_parse_from([
            "nurecords",
            "subject",
            "edit",
            "B",
            "--prerequisite",
            "A",
            "--clear-prerequisite",
        ]);
        assert!(result.is_err());
    }
}
