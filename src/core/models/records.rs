//! In-memory record set: the full current collections of students, subjects and grades

use super::{Grade, Student, Subject};
use serde::{Deserialize, Serialize};

/// Caller-owned snapshot of every record
///
/// Collections keep their record order; lookups are linear scans, which is
/// what every query over a fully materialized set needs anyway.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordSet {
    /// Students in enrollment order
    #[serde(default)]
    pub students: Vec<Student>,

    /// Subject catalog
    #[serde(default)]
    pub subjects: Vec<Subject>,

    /// Recorded grades
    #[serde(default)]
    pub grades: Vec<Grade>,
}

impl RecordSet {
    /// Create a record set from its three collections
    #[must_use]
    pub const fn new(students: Vec<Student>, subjects: Vec<Subject>, grades: Vec<Grade>) -> Self {
        Self {
            students,
            subjects,
            grades,
        }
    }

    /// Get a student by id
    #[must_use]
    pub fn student(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// Get a mutable student by id
    pub fn student_mut(&mut self, id: &str) -> Option<&mut Student> {
        self.students.iter_mut().find(|s| s.id == id)
    }

    /// Get a subject by code
    #[must_use]
    pub fn subject(&self, code: &str) -> Option<&Subject> {
        self.subjects.iter().find(|s| s.code == code)
    }

    /// Get a mutable subject by code
    pub fn subject_mut(&mut self, code: &str) -> Option<&mut Subject> {
        self.subjects.iter_mut().find(|s| s.code == code)
    }

    /// Get the grade for a (student, subject) pair
    #[must_use]
    pub fn grade(&self, student_id: &str, subject_code: &str) -> Option<&Grade> {
        self.grades.iter().find(|g| g.is_for(student_id, subject_code))
    }

    /// All grades of one student, in record order
    pub fn grades_for<'a>(&'a self, student_id: &'a str) -> impl Iterator<Item = &'a Grade> + 'a {
        self.grades.iter().filter(move |g| g.student_id == student_id)
    }

    /// Validate that every grade references an existing student and subject
    ///
    /// # Errors
    /// Returns `Err` with one message per dangling reference
    pub fn validate_references(&self) -> Result<(), Vec<String>> {
        let mut problems = Vec::new();

        for grade in &self.grades {
            if self.student(&grade.student_id).is_none() {
                problems.push(format!(
                    "Grade {}/{}: missing student '{}'",
                    grade.student_id, grade.subject_code, grade.student_id
                ));
            }
            if self.subject(&grade.subject_code).is_none() {
                problems.push(format!(
                    "Grade {}/{}: missing subject '{}'",
                    grade.student_id, grade.subject_code, grade.subject_code
                ));
            }
        }

        for subject in &self.subjects {
            if let Some(prereq) = &subject.prerequisite {
                if self.subject(prereq).is_none() {
                    problems.push(format!(
                        "Subject '{}': missing prerequisite '{prereq}'",
                        subject.code
                    ));
                }
            }
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(problems)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{GradingScheme, Mark};

    fn sample() -> RecordSet {
        RecordSet::new(
            vec![Student::new(
                "S001".to_string(),
                "Kho Wei Cong".to_string(),
                "Degree in Computer Science (ST)".to_string(),
                "kho@example.edu".to_string(),
            )],
            vec![Subject::new(
                "CS101".to_string(),
                "Programming".to_string(),
                3,
                GradingScheme::Graded,
            )],
            vec![Grade {
                student_id: "S001".to_string(),
                subject_code: "CS101".to_string(),
                mark: Mark::new(88).unwrap(),
                letter: "A".to_string(),
                grade_point: 4.0,
            }],
        )
    }

    #[test]
    fn test_lookups() {
        let records = sample();
        assert!(records.student("S001").is_some());
        assert!(records.student("S002").is_none());
        assert!(records.subject("CS101").is_some());
        assert!(records.grade("S001", "CS101").is_some());
        assert_eq!(records.grades_for("S001").count(), 1);
    }

    #[test]
    fn test_validate_references_ok() {
        assert!(sample().validate_references().is_ok());
    }

    #[test]
    fn test_validate_references_reports_orphans() {
        let mut records = sample();
        records.students.clear();
        records.subjects[0].prerequisite = Some("CS000".to_string());

        let problems = records.validate_references().unwrap_err();
        assert_eq!(problems.len(), 2);
        assert!(problems.iter().any(|p| p.contains("missing student")));
        assert!(problems.iter().any(|p| p.contains("CS000")));
    }
}
