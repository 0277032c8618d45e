//! Student command handlers

use super::{confirm, fail, load_records, open_store, save_records};
use crate::args::StudentCommand;
use nu_records::config::Config;
use nu_records::core::models::programme::abbreviate;
use nu_records::core::models::Student;
use nu_records::core::query::QueryProjection;
use nu_records::core::registry::{NewStudent, StudentPatch};

/// Dispatch student subcommands
pub fn run(action: StudentCommand, config: &Config) {
    let mut store = open_store(config);
    let mut records = load_records(&store);

    match action {
        StudentCommand::Add {
            name,
            programme,
            email,
        } => {
            let input = NewStudent {
                name,
                programme,
                email,
            };
            let id = records.enroll_student(&input).unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Enrolled student {id}");
        }
        StudentCommand::Edit {
            id,
            name,
            programme,
            email,
        } => {
            let patch = StudentPatch {
                name,
                programme,
                email,
            };
            records
                .update_student(&id, &patch)
                .unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Updated student {id}");
        }
        StudentCommand::Delete { id, yes } => {
            let graded = records.grades_for(&id).count();
            let prompt = format!("Delete student {id} and {graded} grade(s)?");
            if !yes && !confirm(&prompt) {
                println!("✗ Delete cancelled");
                return;
            }
            let removed = records.delete_student(&id).unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Deleted student {} ({})", removed.id, removed.name);
        }
        StudentCommand::List => print_students(&records.students.iter().collect::<Vec<_>>()),
        StudentCommand::Search { keyword } => {
            let projection = QueryProjection::build(&records);
            let found = projection.search_students(&keyword);
            if found.is_empty() {
                println!("No students match '{keyword}'");
            } else {
                print_students(&found);
            }
        }
        StudentCommand::Recommend { id } => {
            let projection = QueryProjection::build(&records);
            let subjects = projection
                .recommend_subjects(&id)
                .unwrap_or_else(|e| fail(e));
            if subjects.is_empty() {
                println!("No subjects to recommend for {id}");
                return;
            }
            println!("Recommended subjects for {id}:");
            for subject in subjects {
                println!(
                    "  {:<10} {:<40} {} CH  {}",
                    subject.code,
                    subject.name,
                    subject.credit_hours,
                    subject.grading.describe()
                );
            }
        }
    }
}

/// Print students as an aligned table
pub fn print_students(students: &[&Student]) {
    if students.is_empty() {
        println!("No students enrolled");
        return;
    }

    println!(
        "{:<6} {:<28} {:<10} {:<32} {:>4} {:>6}",
        "ID", "Name", "Programme", "Email", "CH", "CGPA"
    );
    for s in students {
        println!(
            "{:<6} {:<28} {:<10} {:<32} {:>4} {:>6.2}",
            s.id,
            s.name,
            abbreviate(&s.programme),
            s.email,
            s.taken_credit_hours,
            s.cgpa
        );
    }
}
