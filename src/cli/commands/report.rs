//! Report command handler

use super::{fail, load_records, open_store};
use crate::args::ReportCommand;
use nu_records::config::Config;
use nu_records::core::report::{
    DashboardReporter, ReportContext, ReportGenerator, ReportKind, SlipReporter,
    StudentListReporter, SubjectListReporter,
};
use std::path::PathBuf;

/// Render the requested Markdown report to a file
pub fn run(command: ReportCommand, config: &Config) {
    let store = open_store(config);
    let records = load_records(&store);
    let ctx = ReportContext::new(&records).with_top_n(config.top_n());

    let (generator, path): (Box<dyn ReportGenerator>, PathBuf) = match command {
        ReportCommand::Slip { student_id, output } => {
            let path = output.unwrap_or_else(|| {
                default_path(config, &format!("{}_{student_id}", ReportKind::Slip))
            });
            (Box::new(SlipReporter::new(&student_id)), path)
        }
        ReportCommand::Students { output } => (
            Box::new(StudentListReporter),
            output.unwrap_or_else(|| default_path(config, ReportKind::Students.file_stem())),
        ),
        ReportCommand::Subjects { output } => (
            Box::new(SubjectListReporter),
            output.unwrap_or_else(|| default_path(config, ReportKind::Subjects.file_stem())),
        ),
        ReportCommand::Dashboard { output } => (
            Box::new(DashboardReporter),
            output.unwrap_or_else(|| default_path(config, ReportKind::Dashboard.file_stem())),
        ),
    };

    if let Err(e) = generator.generate(&ctx, &path) {
        fail(e);
    }
    println!("✓ Report generated: {}", path.display());
}

fn default_path(config: &Config, stem: &str) -> PathBuf {
    PathBuf::from(&config.paths.reports_dir).join(format!("{stem}.md"))
}
