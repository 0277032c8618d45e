//! Read-only projection over a record set for search, ranking and statistics
//!
//! The projection is a transient index built on demand from the current
//! records; it is never persisted or kept in sync with later mutations.

use crate::core::eligibility::{subject_status, SubjectStatus};
use crate::core::error::{RecordError, Result};
use crate::core::models::{Grade, RecordSet, Student, Subject};
use std::collections::HashMap;

/// Default number of students in the top-N ranking
pub const DEFAULT_TOP_N: usize = 3;

/// Student count and mean CGPA
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StudentSummary {
    /// Number of students
    pub total: usize,
    /// Unweighted mean of stored CGPAs (`0.0` with no students)
    pub average_cgpa: f64,
}

/// Subject with the most zero-point grades
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureInsight {
    /// Subject code
    pub subject_code: String,
    /// Number of grades with a grade point of zero or less
    pub failures: usize,
}

/// One student's grade joined with its subject, for listings
#[derive(Debug, Clone, PartialEq)]
pub struct GradeRow<'a> {
    /// The grade record
    pub grade: &'a Grade,
    /// Its subject, if it still exists
    pub subject: Option<&'a Subject>,
}

/// Transient read-only index over students, subjects and grades
#[derive(Debug)]
pub struct QueryProjection<'a> {
    records: &'a RecordSet,
    subjects_by_code: HashMap<&'a str, &'a Subject>,
    grades_by_student: HashMap<&'a str, Vec<&'a Grade>>,
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

impl<'a> QueryProjection<'a> {
    /// Build the projection from the current records
    #[must_use]
    pub fn build(records: &'a RecordSet) -> Self {
        let subjects_by_code = records
            .subjects
            .iter()
            .map(|s| (s.code.as_str(), s))
            .collect();

        let mut grades_by_student: HashMap<&str, Vec<&Grade>> = HashMap::new();
        for grade in &records.grades {
            grades_by_student
                .entry(grade.student_id.as_str())
                .or_default()
                .push(grade);
        }

        Self {
            records,
            subjects_by_code,
            grades_by_student,
        }
    }

    /// Students whose id, name, programme or email contains `keyword` (case-insensitive)
    #[must_use]
    pub fn search_students(&self, keyword: &str) -> Vec<&'a Student> {
        let needle = keyword.to_lowercase();
        self.records
            .students
            .iter()
            .filter(|s| {
                contains_ci(&s.id, &needle)
                    || contains_ci(&s.name, &needle)
                    || contains_ci(&s.programme, &needle)
                    || contains_ci(&s.email, &needle)
            })
            .collect()
    }

    /// Subjects whose code or name contains `keyword` (case-insensitive)
    #[must_use]
    pub fn search_subjects(&self, keyword: &str) -> Vec<&'a Subject> {
        let needle = keyword.to_lowercase();
        self.records
            .subjects
            .iter()
            .filter(|s| contains_ci(&s.code, &needle) || contains_ci(&s.name, &needle))
            .collect()
    }

    /// Grades whose student id or subject code contains `keyword` (case-insensitive)
    #[must_use]
    pub fn search_grades(&self, keyword: &str) -> Vec<&'a Grade> {
        let needle = keyword.to_lowercase();
        self.records
            .grades
            .iter()
            .filter(|g| {
                contains_ci(&g.student_id, &needle) || contains_ci(&g.subject_code, &needle)
            })
            .collect()
    }

    /// Top `n` students by stored CGPA, descending; ties keep record order
    #[must_use]
    pub fn top_students(&self, n: usize) -> Vec<&'a Student> {
        let mut ranked: Vec<&Student> = self.records.students.iter().collect();
        ranked.sort_by(|a, b| b.cgpa.total_cmp(&a.cgpa));
        ranked.truncate(n);
        ranked
    }

    /// Student count and unweighted mean CGPA
    #[must_use]
    pub fn student_summary(&self) -> StudentSummary {
        let total = self.records.students.len();
        let sum: f64 = self.records.students.iter().map(|s| s.cgpa).sum();

        #[allow(clippy::cast_precision_loss)]
        let average_cgpa = if total == 0 { 0.0 } else { sum / total as f64 };

        StudentSummary {
            total,
            average_cgpa,
        }
    }

    /// Subject with the highest count of zero-point grades.
    ///
    /// Ties go to the subject whose first failing grade appears earliest in
    /// record order. `None` when no grade has failed.
    #[must_use]
    pub fn failure_insight(&self) -> Option<FailureInsight> {
        let mut counts: Vec<(&str, usize)> = Vec::new();

        for grade in self.records.grades.iter().filter(|g| g.is_zero_point()) {
            match counts.iter_mut().find(|(code, _)| *code == grade.subject_code) {
                Some((_, count)) => *count += 1,
                None => counts.push((grade.subject_code.as_str(), 1)),
            }
        }

        let mut best: Option<(&str, usize)> = None;
        for (code, count) in counts {
            if best.map_or(true, |(_, top)| count > top) {
                best = Some((code, count));
            }
        }

        best.map(|(code, failures)| FailureInsight {
            subject_code: code.to_string(),
            failures,
        })
    }

    /// Subjects the student can take next, sorted by code.
    ///
    /// Same filter as eligibility resolution: programme match, prerequisite
    /// passed, not yet graded.
    ///
    /// # Errors
    /// Returns `StudentNotFound` if the id is unknown
    pub fn recommend_subjects(&self, student_id: &str) -> Result<Vec<&'a Subject>> {
        let student = self
            .records
            .student(student_id)
            .ok_or_else(|| RecordError::StudentNotFound(student_id.to_string()))?;

        let mut recommended: Vec<&Subject> = self
            .records
            .subjects
            .iter()
            .filter(|subject| {
                subject_status(student, subject, &self.records.grades) == SubjectStatus::Eligible
            })
            .collect();
        recommended.sort_by(|a, b| a.code.cmp(&b.code));

        Ok(recommended)
    }

    /// A student's grades joined with subject metadata, in record order
    #[must_use]
    pub fn student_grades(&self, student_id: &str) -> Vec<GradeRow<'a>> {
        self.grades_by_student
            .get(student_id)
            .map(|grades| {
                grades
                    .iter()
                    .map(|&grade| GradeRow {
                        grade,
                        subject: self.subjects_by_code.get(grade.subject_code.as_str()).copied(),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Subject lookup through the index
    #[must_use]
    pub fn subject(&self, code: &str) -> Option<&'a Subject> {
        self.subjects_by_code.get(code).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{GradingScheme, Mark};

    fn student(id: &str, name: &str, cgpa: f64) -> Student {
        let mut s = Student::new(
            id.to_string(),
            name.to_string(),
            "Degree in Computer Science (AI)".to_string(),
            format!("{}@example.edu", name.to_lowercase()),
        );
        s.cgpa = cgpa;
        s
    }

    fn grade(student: &str, code: &str, point: f64) -> Grade {
        Grade {
            student_id: student.to_string(),
            subject_code: code.to_string(),
            mark: Mark::new(30).unwrap(),
            letter: if point > 0.0 { "C" } else { "F" }.to_string(),
            grade_point: point,
        }
    }

    #[test]
    fn test_top_students_stable_on_ties() {
        let records = RecordSet::new(
            vec![
                student("S001", "Ann", 3.0),
                student("S002", "Ben", 3.5),
                student("S003", "Cid", 3.0),
                student("S004", "Dee", 2.0),
            ],
            Vec::new(),
            Vec::new(),
        );
        let projection = QueryProjection::build(&records);
        let top: Vec<&str> = projection
            .top_students(DEFAULT_TOP_N)
            .iter()
            .map(|s| s.id.as_str())
            .collect();

        assert_eq!(top, vec!["S002", "S001", "S003"]);
    }

    #[test]
    fn test_summary_empty() {
        let records = RecordSet::default();
        let summary = QueryProjection::build(&records).student_summary();
        assert_eq!(summary.total, 0);
        assert!(summary.average_cgpa.abs() < f64::EPSILON);
    }

    #[test]
    fn test_failure_insight_strict_max() {
        let records = RecordSet::new(
            Vec::new(),
            Vec::new(),
            vec![
                grade("S001", "A", 0.0),
                grade("S002", "B", 0.0),
                grade("S003", "B", 0.0),
                grade("S004", "A", 2.0),
            ],
        );
        let insight = QueryProjection::build(&records).failure_insight().unwrap();
        assert_eq!(insight.subject_code, "B");
        assert_eq!(insight.failures, 2);
    }

    #[test]
    fn test_failure_insight_none_without_failures() {
        let records = RecordSet::new(Vec::new(), Vec::new(), vec![grade("S001", "A", 2.0)]);
        assert!(QueryProjection::build(&records).failure_insight().is_none());
    }

    #[test]
    fn test_student_grades_joins_subjects() {
        let records = RecordSet::new(
            Vec::new(),
            vec![Subject::new(
                "A".to_string(),
                "Alpha".to_string(),
                3,
                GradingScheme::Graded,
            )],
            vec![grade("S001", "A", 2.0), grade("S001", "GONE", 1.0)],
        );
        let projection = QueryProjection::build(&records);
        let rows = projection.student_grades("S001");

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].subject.map(|s| s.name.as_str()), Some("Alpha"));
        assert!(rows[1].subject.is_none());
        assert!(projection.student_grades("S999").is_empty());
    }
}
