//! Grade command handlers

use super::{fail, load_records, open_store, save_records};
use crate::args::GradeCommand;
use nu_records::config::Config;
use nu_records::core::eligibility::resolve_eligibility;
use nu_records::core::error::RecordError;
use nu_records::core::models::{Mark, Student};
use nu_records::core::query::QueryProjection;
use nu_records::core::registry::GradeOutcome;

/// Dispatch grade subcommands
pub fn run(action: GradeCommand, config: &Config) {
    let mut store = open_store(config);
    let mut records = load_records(&store);

    match action {
        GradeCommand::Add {
            student_id,
            subject_code,
            mark,
        } => {
            let mark: Mark = mark.parse().unwrap_or_else(|e| fail(e));
            let outcome = records
                .record_grade(&student_id, &subject_code, mark)
                .unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Recorded {subject_code} for {student_id}");
            print_outcome(&outcome);
        }
        GradeCommand::Edit {
            student_id,
            subject_code,
            mark,
        } => {
            let mark: Mark = mark.parse().unwrap_or_else(|e| fail(e));
            let outcome = records
                .edit_grade(&student_id, &subject_code, mark)
                .unwrap_or_else(|e| fail(e));
            save_records(&mut store, &records);
            println!("✓ Updated {subject_code} for {student_id}");
            print_outcome(&outcome);
        }
        GradeCommand::List { student_id } => {
            let projection = QueryProjection::build(&records);
            match student_id {
                Some(id) => {
                    let student = records
                        .student(&id)
                        .unwrap_or_else(|| fail(RecordError::StudentNotFound(id.clone())));
                    print_graded(&projection, student);
                }
                None => {
                    for student in &records.students {
                        print_graded(&projection, student);
                    }
                }
            }
        }
        GradeCommand::Search { keyword } => {
            let projection = QueryProjection::build(&records);
            let found = projection.search_grades(&keyword);
            if found.is_empty() {
                println!("No grades match '{keyword}'");
                return;
            }
            println!("{:<6} {:<10} {:>4} {:<8} {:>5}", "ID", "Subject", "Mark", "Grade", "Point");
            for g in found {
                println!(
                    "{:<6} {:<10} {:>4} {:<8} {:>5.2}",
                    g.student_id, g.subject_code, g.mark, g.letter, g.grade_point
                );
            }
        }
        GradeCommand::Eligible { student_id } => {
            let student = records
                .student(&student_id)
                .unwrap_or_else(|| fail(RecordError::StudentNotFound(student_id.clone())));
            let eligibility = resolve_eligibility(student, &records.subjects, &records.grades);

            println!("Eligible subjects for {student_id}:");
            if eligibility.eligible.is_empty() {
                println!("  (none)");
            }
            for subject in &eligibility.eligible {
                println!("  {:<10} {}", subject.code, subject.name);
            }

            if !eligibility.ineligible.is_empty() {
                println!("\nNot yet eligible:");
                for (subject, reason) in &eligibility.ineligible {
                    println!("  {:<10} {} ({reason})", subject.code, subject.name);
                }
            }
        }
    }
}

fn print_outcome(outcome: &GradeOutcome) {
    println!(
        "  Mark {} → {} ({:.2} points, {} CH)",
        outcome.grade.mark, outcome.grade.letter, outcome.grade.grade_point, outcome.credit_hours
    );
    println!(
        "  CGPA {:.2} over {} CH; {} CH taken",
        outcome.aggregate.rounded_cgpa(),
        outcome.aggregate.cgpa_credit_hours,
        outcome.aggregate.taken_credit_hours
    );
}

fn print_graded(projection: &QueryProjection<'_>, student: &Student) {
    let rows = projection.student_grades(&student.id);
    println!("\n{} {} (CGPA {:.2})", student.id, student.name, student.cgpa);
    if rows.is_empty() {
        println!("  (no grades)");
        return;
    }
    for row in rows {
        let (name, credits, grading) = row.subject.map_or(("(removed)", 0, "-"), |s| {
            (s.name.as_str(), s.credit_hours, s.grading.describe())
        });
        println!(
            "  {:<10} {:<40} {:>2} CH {:<15} {:>3} {:<6} {:.2}",
            row.grade.subject_code,
            name,
            credits,
            grading,
            row.grade.mark,
            row.grade.letter,
            row.grade.grade_point
        );
    }
}
