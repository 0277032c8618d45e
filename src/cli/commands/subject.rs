//! Subject command handlers

use super::{confirm, fail, load_records, open_store, save_records};
use crate::args::SubjectCommand;
use nu_records::config::Config;
use nu_records::core::models::programme::abbreviate;
use nu_records::core::models::{GradingScheme, ProgrammeScope, Subject};
use nu_records::core::query::QueryProjection;
use nu_records::core::registry::SubjectPatch;

fn parse_grading(value: &str) -> GradingScheme {
    value.parse().unwrap_or_else(|e: String| fail(e))
}

/// Dispatch subject subcommands
pub fn run(action: SubjectCommand, config: &Config) {
    let mut store = open_store(config);
    let mut records = load_records(&store);

    match action {
        SubjectCommand::Add {
            code,
            name,
            credits,
            programme,
            prerequisite,
            grading,
        } => {
            let mut subject = Subject::new(code, name, credits, parse_grading(&grading))
                .for_programme(&programme);
            subject.set_prerequisite(prerequisite.as_deref());
            let code = subject.code.trim().to_string();

            records.add_subject(subject).unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Added subject {code}");
        }
        SubjectCommand::Edit {
            code,
            name,
            credits,
            programme,
            prerequisite,
            clear_prerequisite,
            grading,
        } => {
            let patch = SubjectPatch {
                name,
                credit_hours: credits,
                programme: programme.as_deref().map(ProgrammeScope::parse),
                prerequisite: if clear_prerequisite {
                    Some(None)
                } else {
                    prerequisite.map(Some)
                },
                grading: grading.as_deref().map(parse_grading),
            };
            records
                .update_subject(&code, &patch)
                .unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Updated subject {code}");
        }
        SubjectCommand::Delete { code, yes } => {
            let graded = records.grades.iter().filter(|g| g.subject_code == code).count();
            let prompt = format!("Delete subject {code} and {graded} grade(s)?");
            if !yes && !confirm(&prompt) {
                println!("✗ Delete cancelled");
                return;
            }
            let removed = records.delete_subject(&code).unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Deleted subject {} ({})", removed.code, removed.name);
        }
        SubjectCommand::List => print_subjects(&records.subjects.iter().collect::<Vec<_>>()),
        SubjectCommand::Search { keyword } => {
            let projection = QueryProjection::build(&records);
            let found = projection.search_subjects(&keyword);
            if found.is_empty() {
                println!("No subjects match '{keyword}'");
            } else {
                print_subjects(&found);
            }
        }
    }
}

fn print_subjects(subjects: &[&Subject]) {
    if subjects.is_empty() {
        println!("No subjects in the catalog");
        return;
    }

    println!(
        "{:<10} {:<40} {:>3} {:<10} {:<12} {}",
        "Code", "Name", "CH", "Programme", "Prerequisite", "Grading"
    );
    for s in subjects {
        println!(
            "{:<10} {:<40} {:>3} {:<10} {:<12} {}",
            s.code,
            s.name,
            s.credit_hours,
            abbreviate(s.programme.as_str()),
            s.prerequisite.as_deref().unwrap_or("-"),
            s.grading.describe()
        );
    }
}
