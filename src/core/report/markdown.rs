//! Markdown report generators
//!
//! Numbers are formatted here so the templates stay free of logic.

use crate::core::error::{RecordError, Result};
use crate::core::get_version;
use crate::core::models::programme::abbreviate;
use crate::core::models::Student;
use crate::core::report::{ReportContext, ReportGenerator};
use askama::Template;

struct SlipRow {
    code: String,
    name: String,
    credit_hours: String,
    grading: &'static str,
    mark: u8,
    letter: String,
    point: String,
}

#[derive(Template)]
#[template(path = "result_slip.md", escape = "none")]
struct SlipTemplate<'a> {
    student: &'a Student,
    rows: Vec<SlipRow>,
    cgpa: String,
    version: &'static str,
}

struct StudentRow<'a> {
    id: &'a str,
    name: &'a str,
    programme: &'a str,
    email: &'a str,
    credit_hours: u32,
    cgpa: String,
}

#[derive(Template)]
#[template(path = "student_list.md", escape = "none")]
struct StudentListTemplate<'a> {
    rows: Vec<StudentRow<'a>>,
    version: &'static str,
}

struct SubjectRow<'a> {
    code: &'a str,
    name: &'a str,
    credit_hours: u32,
    programme: &'a str,
    prerequisite: &'a str,
    grading: &'static str,
}

#[derive(Template)]
#[template(path = "subject_list.md", escape = "none")]
struct SubjectListTemplate<'a> {
    rows: Vec<SubjectRow<'a>>,
    version: &'static str,
}

struct RankRow<'a> {
    rank: usize,
    id: &'a str,
    name: &'a str,
    programme: &'a str,
    cgpa: String,
}

#[derive(Template)]
#[template(path = "dashboard.md", escape = "none")]
struct DashboardTemplate<'a> {
    total: usize,
    average_cgpa: String,
    top_n: usize,
    top: Vec<RankRow<'a>>,
    failure: String,
    version: &'static str,
}

/// Result slip for a single student
#[derive(Debug, Clone)]
pub struct SlipReporter {
    student_id: String,
}

impl SlipReporter {
    /// Create a slip reporter for `student_id`
    #[must_use]
    pub fn new(student_id: &str) -> Self {
        Self {
            student_id: student_id.to_string(),
        }
    }
}

impl ReportGenerator for SlipReporter {
    fn render(&self, ctx: &ReportContext<'_>) -> Result<String> {
        let student = ctx
            .records
            .student(&self.student_id)
            .ok_or_else(|| RecordError::StudentNotFound(self.student_id.clone()))?;

        let rows = ctx
            .projection
            .student_grades(&student.id)
            .into_iter()
            .map(|row| SlipRow {
                code: row.grade.subject_code.clone(),
                name: row
                    .subject
                    .map_or_else(|| "(removed)".to_string(), |s| s.name.clone()),
                credit_hours: row
                    .subject
                    .map_or_else(|| "-".to_string(), |s| s.credit_hours.to_string()),
                grading: row.subject.map_or("-", |s| s.grading.describe()),
                mark: row.grade.mark.value(),
                letter: row.grade.letter.clone(),
                point: format!("{:.2}", row.grade.grade_point),
            })
            .collect();

        let template = SlipTemplate {
            student,
            rows,
            cgpa: format!("{:.2}", student.cgpa),
            version: get_version(),
        };
        Ok(template.render()?)
    }
}

/// Listing of every student
#[derive(Debug, Clone, Copy, Default)]
pub struct StudentListReporter;

impl ReportGenerator for StudentListReporter {
    fn render(&self, ctx: &ReportContext<'_>) -> Result<String> {
        let rows = ctx
            .records
            .students
            .iter()
            .map(|s| StudentRow {
                id: &s.id,
                name: &s.name,
                programme: abbreviate(&s.programme),
                email: &s.email,
                credit_hours: s.taken_credit_hours,
                cgpa: format!("{:.2}", s.cgpa),
            })
            .collect();

        let template = StudentListTemplate {
            rows,
            version: get_version(),
        };
        Ok(template.render()?)
    }
}

/// Listing of the subject catalog
#[derive(Debug, Clone, Copy, Default)]
pub struct SubjectListReporter;

impl ReportGenerator for SubjectListReporter {
    fn render(&self, ctx: &ReportContext<'_>) -> Result<String> {
        let rows = ctx
            .records
            .subjects
            .iter()
            .map(|s| SubjectRow {
                code: &s.code,
                name: &s.name,
                credit_hours: s.credit_hours,
                programme: abbreviate(s.programme.as_str()),
                prerequisite: s.prerequisite.as_deref().unwrap_or("-"),
                grading: s.grading.describe(),
            })
            .collect();

        let template = SubjectListTemplate {
            rows,
            version: get_version(),
        };
        Ok(template.render()?)
    }
}

/// Top-N ranking, student summary and failure insight
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardReporter;

impl ReportGenerator for DashboardReporter {
    fn render(&self, ctx: &ReportContext<'_>) -> Result<String> {
        let summary = ctx.projection.student_summary();

        let top = ctx
            .projection
            .top_students(ctx.top_n)
            .into_iter()
            .enumerate()
            .map(|(i, s)| RankRow {
                rank: i + 1,
                id: &s.id,
                name: &s.name,
                programme: abbreviate(&s.programme),
                cgpa: format!("{:.2}", s.cgpa),
            })
            .collect();

        let failure = ctx.projection.failure_insight().map_or_else(
            || "No failing grades recorded.".to_string(),
            |insight| {
                let name = ctx
                    .projection
                    .subject(&insight.subject_code)
                    .map_or("", |s| s.name.as_str());
                format!(
                    "Most failed subject: {} {} ({} failing grade{})",
                    insight.subject_code,
                    name,
                    insight.failures,
                    if insight.failures == 1 { "" } else { "s" }
                )
            },
        );

        let template = DashboardTemplate {
            total: summary.total,
            average_cgpa: format!("{:.2}", summary.average_cgpa),
            top_n: ctx.top_n,
            top,
            failure,
            version: get_version(),
        };
        Ok(template.render()?)
    }
}
