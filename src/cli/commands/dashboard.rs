//! Dashboard command handler

use super::{load_records, open_store};
use nu_records::config::Config;
use nu_records::core::models::programme::abbreviate;
use nu_records::core::query::QueryProjection;

/// Print the top students, the student summary and the failure insight
pub fn run(config: &Config) {
    let store = open_store(config);
    let records = load_records(&store);
    let projection = QueryProjection::build(&records);

    let top_n = config.top_n();

    println!("\n=== Top {top_n} Students ===\n");
    let top = projection.top_students(top_n);
    if top.is_empty() {
        println!("No students enrolled");
    }
    for (rank, s) in top.iter().enumerate() {
        println!(
            "{:>2}. {:<6} {:<28} {:<10} {:.2}",
            rank + 1,
            s.id,
            s.name,
            abbreviate(&s.programme),
            s.cgpa
        );
    }

    let summary = projection.student_summary();
    println!("\n=== Students ===\n");
    println!("Total students: {}", summary.total);
    println!("Average CGPA:   {:.2}", summary.average_cgpa);

    println!("\n=== Failure Insight ===\n");
    match projection.failure_insight() {
        Some(insight) => {
            let name = projection
                .subject(&insight.subject_code)
                .map_or("", |s| s.name.as_str());
            println!(
                "Most failed subject: {} {name} ({} failing grade(s))",
                insight.subject_code, insight.failures
            );
        }
        None => println!("No failing grades recorded"),
    }
}
