//! Mutation paths over a record set
//!
//! Every operation validates all of its preconditions before touching the
//! records, so a failing call leaves the set exactly as it was. Operations
//! that change a student's grades, or the subject metadata those grades join
//! with, finish by recomputing the affected aggregates in full.

use crate::core::cgpa::{recompute_aggregate, Aggregate};
use crate::core::eligibility::{subject_status, SubjectStatus};
use crate::core::error::{RecordError, Result};
use crate::core::grading::classify;
use crate::core::models::programme::canonical_programme;
use crate::core::models::{
    Grade, GradingScheme, Mark, ProgrammeScope, RecordSet, Student, Subject,
};
use crate::{debug, info};
use std::collections::HashSet;

/// Input for enrolling a student
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    /// Full name
    pub name: String,
    /// Programme name or short form
    pub programme: String,
    /// Contact email
    pub email: String,
}

/// Optional student edits; `None` or blank keeps the current value
#[derive(Debug, Clone, Default)]
pub struct StudentPatch {
    /// New name
    pub name: Option<String>,
    /// New programme
    pub programme: Option<String>,
    /// New email
    pub email: Option<String>,
}

/// Optional subject edits; the code itself is immutable
#[derive(Debug, Clone, Default)]
pub struct SubjectPatch {
    /// New name
    pub name: Option<String>,
    /// New credit hours
    pub credit_hours: Option<u32>,
    /// New programme scope
    pub programme: Option<ProgrammeScope>,
    /// `Some(None)` clears the prerequisite, `Some(Some(code))` sets it
    pub prerequisite: Option<Option<String>>,
    /// New grading scheme
    pub grading: Option<GradingScheme>,
}

/// What a grade insert or edit produced
#[derive(Debug, Clone, PartialEq)]
pub struct GradeOutcome {
    /// The stored grade
    pub grade: Grade,
    /// Credit hours of the subject
    pub credit_hours: u32,
    /// The student's recomputed aggregate
    pub aggregate: Aggregate,
}

fn non_blank(value: Option<&String>) -> Option<&str> {
    value.map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn require(field: &'static str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(RecordError::InvalidField {
            field,
            message: "must not be blank".to_string(),
        });
    }
    Ok(trimmed.to_string())
}

impl RecordSet {
    /// Next free `S###` id: one past the highest existing sequence number
    #[must_use]
    pub fn next_student_id(&self) -> String {
        let next = self
            .students
            .iter()
            .filter_map(Student::sequence_number)
            .max()
            .unwrap_or(0)
            + 1;
        format!("S{next:03}")
    }

    /// Enroll a new student with empty aggregates, returning the assigned id
    ///
    /// # Errors
    /// Returns `InvalidField` if the name, programme or email is blank
    pub fn enroll_student(&mut self, input: &NewStudent) -> Result<String> {
        let name = require("name", &input.name)?;
        let programme = canonical_programme(&require("programme", &input.programme)?);
        let email = require("email", &input.email)?;

        let id = self.next_student_id();
        self.students
            .push(Student::new(id.clone(), name, programme, email));
        info!("Enrolled student {id}");
        Ok(id)
    }

    /// Edit a student's name, programme or email
    ///
    /// # Errors
    /// Returns `StudentNotFound` if the id is unknown
    pub fn update_student(&mut self, id: &str, patch: &StudentPatch) -> Result<&Student> {
        let student = self
            .student_mut(id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_string()))?;

        if let Some(name) = non_blank(patch.name.as_ref()) {
            student.name = name.to_string();
        }
        if let Some(programme) = non_blank(patch.programme.as_ref()) {
            student.programme = canonical_programme(programme);
        }
        if let Some(email) = non_blank(patch.email.as_ref()) {
            student.email = email.to_string();
        }

        info!("Updated student {id}");
        Ok(student)
    }

    /// Remove a student together with their grades, returning the removed record
    ///
    /// # Errors
    /// Returns `StudentNotFound` if the id is unknown
    pub fn delete_student(&mut self, id: &str) -> Result<Student> {
        let index = self
            .students
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| RecordError::StudentNotFound(id.to_string()))?;

        let removed = self.students.remove(index);
        let before = self.grades.len();
        self.grades.retain(|g| g.student_id != id);
        info!(
            "Deleted student {id} and {} grade(s)",
            before - self.grades.len()
        );
        Ok(removed)
    }

    /// Check a prerequisite for `code`: must exist, differ from `code`, and not close a cycle
    fn check_prerequisite(&self, code: &str, prerequisite: &str) -> Result<()> {
        let invalid = |message: String| RecordError::InvalidPrerequisite {
            subject_code: code.to_string(),
            message,
        };

        if prerequisite == code {
            return Err(invalid("a subject cannot require itself".to_string()));
        }
        if self.subject(prerequisite).is_none() {
            return Err(invalid(format!("subject '{prerequisite}' does not exist")));
        }

        let mut seen = HashSet::new();
        let mut cursor = Some(prerequisite);
        while let Some(current) = cursor {
            if current == code {
                return Err(invalid(format!("'{prerequisite}' already depends on {code}")));
            }
            if !seen.insert(current) {
                break;
            }
            cursor = self
                .subject(current)
                .and_then(|s| s.prerequisite.as_deref());
        }

        Ok(())
    }

    /// Add a subject to the catalog
    ///
    /// # Errors
    /// Returns `DuplicateSubject`, `InvalidCreditHours`, `InvalidField` or
    /// `InvalidPrerequisite` when the subject cannot be added
    pub fn add_subject(&mut self, subject: Subject) -> Result<()> {
        let code = require("subject code", &subject.code)?;
        let name = require("subject name", &subject.name)?;

        if self.subject(&code).is_some() {
            return Err(RecordError::DuplicateSubject(code));
        }
        if subject.credit_hours == 0 {
            return Err(RecordError::InvalidCreditHours(
                subject.credit_hours.to_string(),
            ));
        }
        if let Some(prereq) = &subject.prerequisite {
            self.check_prerequisite(&code, prereq)?;
        }

        info!("Added subject {code}");
        self.subjects.push(Subject {
            code,
            name,
            ..subject
        });
        Ok(())
    }

    /// Edit a subject's metadata
    ///
    /// Changing credit hours or grading scheme recomputes the aggregate of
    /// every student graded in the subject. Existing grades keep their letter
    /// and point; they only change through [`RecordSet::edit_grade`].
    ///
    /// # Errors
    /// Returns `SubjectNotFound`, `InvalidCreditHours` or `InvalidPrerequisite`
    pub fn update_subject(&mut self, code: &str, patch: &SubjectPatch) -> Result<&Subject> {
        if self.subject(code).is_none() {
            return Err(RecordError::SubjectNotFound(code.to_string()));
        }
        if patch.credit_hours == Some(0) {
            return Err(RecordError::InvalidCreditHours("0".to_string()));
        }
        if let Some(Some(prereq)) = &patch.prerequisite {
            let prereq = prereq.trim();
            if !prereq.is_empty() {
                self.check_prerequisite(code, prereq)?;
            }
        }

        let Some(subject) = self.subject_mut(code) else {
            return Err(RecordError::SubjectNotFound(code.to_string()));
        };
        let mut aggregates_stale = false;

        if let Some(name) = non_blank(patch.name.as_ref()) {
            subject.name = name.to_string();
        }
        if let Some(credit_hours) = patch.credit_hours {
            aggregates_stale |= subject.credit_hours != credit_hours;
            subject.credit_hours = credit_hours;
        }
        if let Some(programme) = &patch.programme {
            subject.programme = programme.clone();
        }
        if let Some(prereq) = &patch.prerequisite {
            subject.set_prerequisite(prereq.as_deref());
        }
        if let Some(grading) = patch.grading {
            aggregates_stale |= subject.grading != grading;
            subject.grading = grading;
        }

        if aggregates_stale {
            self.recompute_students_graded_in(code);
        }

        info!("Updated subject {code}");
        self.subject(code)
            .ok_or_else(|| RecordError::SubjectNotFound(code.to_string()))
    }

    /// Remove a subject and its grades, recomputing every affected student
    ///
    /// Subjects that named it as prerequisite keep the reference; it reads as
    /// never passed until the prerequisite is edited.
    ///
    /// # Errors
    /// Returns `SubjectNotFound` if the code is unknown
    pub fn delete_subject(&mut self, code: &str) -> Result<Subject> {
        let index = self
            .subjects
            .iter()
            .position(|s| s.code == code)
            .ok_or_else(|| RecordError::SubjectNotFound(code.to_string()))?;

        let affected = self.students_graded_in(code);
        let removed = self.subjects.remove(index);
        self.grades.retain(|g| g.subject_code != code);

        for student_id in &affected {
            self.refresh_aggregate(student_id);
        }

        info!(
            "Deleted subject {code}; recomputed {} student(s)",
            affected.len()
        );
        Ok(removed)
    }

    /// Record a new grade and recompute the student's aggregate.
    ///
    /// # Errors
    /// Returns `StudentNotFound`, `SubjectNotFound`, `DuplicateGrade` or
    /// `NotEligible`; on error nothing is changed
    pub fn record_grade(
        &mut self,
        student_id: &str,
        subject_code: &str,
        mark: Mark,
    ) -> Result<GradeOutcome> {
        let student = self
            .student(student_id)
            .ok_or_else(|| RecordError::StudentNotFound(student_id.to_string()))?;
        let subject = self
            .subject(subject_code)
            .ok_or_else(|| RecordError::SubjectNotFound(subject_code.to_string()))?;

        match subject_status(student, subject, &self.grades) {
            SubjectStatus::Eligible => {}
            SubjectStatus::AlreadyGraded => {
                return Err(RecordError::DuplicateGrade {
                    student_id: student_id.to_string(),
                    subject_code: subject_code.to_string(),
                })
            }
            SubjectStatus::Ineligible(reason) => {
                return Err(RecordError::NotEligible {
                    student_id: student_id.to_string(),
                    subject_code: subject_code.to_string(),
                    reason,
                })
            }
        }

        let classification = classify(mark, subject.grading);
        let credit_hours = subject.credit_hours;
        let grade = Grade {
            student_id: student_id.to_string(),
            subject_code: subject_code.to_string(),
            mark,
            letter: classification.letter.to_string(),
            grade_point: classification.grade_point,
        };

        self.grades.push(grade.clone());
        let aggregate = self.refresh_aggregate(student_id);

        info!(
            "Recorded {subject_code} for {student_id}: {mark} → {}",
            grade.letter
        );
        Ok(GradeOutcome {
            grade,
            credit_hours,
            aggregate,
        })
    }

    /// Replace the mark of an existing grade, reclassifying it, and recompute the aggregate.
    ///
    /// Mark, letter and grade point are replaced together.
    ///
    /// # Errors
    /// Returns `GradeNotFound`, `StudentNotFound` or `MissingGradingScheme`;
    /// on error nothing is changed
    pub fn edit_grade(
        &mut self,
        student_id: &str,
        subject_code: &str,
        mark: Mark,
    ) -> Result<GradeOutcome> {
        let index = self
            .grades
            .iter()
            .position(|g| g.is_for(student_id, subject_code))
            .ok_or_else(|| RecordError::GradeNotFound {
                student_id: student_id.to_string(),
                subject_code: subject_code.to_string(),
            })?;
        if self.student(student_id).is_none() {
            return Err(RecordError::StudentNotFound(student_id.to_string()));
        }
        let subject = self
            .subject(subject_code)
            .ok_or_else(|| RecordError::MissingGradingScheme(subject_code.to_string()))?;

        let classification = classify(mark, subject.grading);
        let credit_hours = subject.credit_hours;

        let grade = &mut self.grades[index];
        grade.mark = mark;
        grade.letter = classification.letter.to_string();
        grade.grade_point = classification.grade_point;
        let grade = grade.clone();

        let aggregate = self.refresh_aggregate(student_id);

        info!(
            "Edited {subject_code} for {student_id}: {mark} → {}",
            grade.letter
        );
        Ok(GradeOutcome {
            grade,
            credit_hours,
            aggregate,
        })
    }

    /// Recompute one student's aggregate from scratch and store it on the record
    pub fn refresh_aggregate(&mut self, student_id: &str) -> Aggregate {
        let aggregate = recompute_aggregate(student_id, &self.grades, &self.subjects);
        if let Some(student) = self.student_mut(student_id) {
            aggregate.apply_to(student);
        } else {
            debug!("No student record for {student_id}; aggregate not stored");
        }
        aggregate
    }

    /// Recompute every student's aggregate (e.g. after loading records)
    pub fn refresh_all_aggregates(&mut self) {
        let ids: Vec<String> = self.students.iter().map(|s| s.id.clone()).collect();
        for id in &ids {
            self.refresh_aggregate(id);
        }
    }

    fn students_graded_in(&self, code: &str) -> Vec<String> {
        let mut ids: Vec<String> = Vec::new();
        for grade in self.grades.iter().filter(|g| g.subject_code == code) {
            if !ids.contains(&grade.student_id) {
                ids.push(grade.student_id.clone());
            }
        }
        ids
    }

    fn recompute_students_graded_in(&mut self, code: &str) {
        for student_id in &self.students_graded_in(code) {
            self.refresh_aggregate(student_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AI: &str = "Degree in Computer Science (AI)";

    fn enroll(records: &mut RecordSet, name: &str) -> String {
        records
            .enroll_student(&NewStudent {
                name: name.to_string(),
                programme: AI.to_string(),
                email: format!("{name}@example.edu"),
            })
            .unwrap()
    }

    #[test]
    fn test_next_student_id_skips_past_gaps() {
        let mut records = RecordSet::default();
        assert_eq!(records.next_student_id(), "S001");

        let first = enroll(&mut records, "a");
        let second = enroll(&mut records, "b");
        assert_eq!((first.as_str(), second.as_str()), ("S001", "S002"));

        records.delete_student("S001").unwrap();
        assert_eq!(records.next_student_id(), "S003");
    }

    #[test]
    fn test_enroll_rejects_blank_name() {
        let mut records = RecordSet::default();
        let err = records
            .enroll_student(&NewStudent {
                name: "  ".to_string(),
                programme: AI.to_string(),
                email: "x@example.edu".to_string(),
            })
            .unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "name", .. }));
        assert!(records.students.is_empty());
    }

    #[test]
    fn test_update_student_keeps_blank_fields() {
        let mut records = RecordSet::default();
        let id = enroll(&mut records, "ann");
        let patch = StudentPatch {
            name: Some(String::new()),
            programme: Some("bcs(st)".to_string()),
            email: None,
        };
        let student = records.update_student(&id, &patch).unwrap();

        assert_eq!(student.name, "ann");
        assert_eq!(student.programme, "Degree in Computer Science (ST)");
        assert_eq!(student.email, "ann@example.edu");
    }

    #[test]
    fn test_prerequisite_cycle_rejected() {
        let mut records = RecordSet::default();
        records
            .add_subject(Subject::new("A".into(), "A".into(), 3, GradingScheme::Graded))
            .unwrap();
        records
            .add_subject(
                Subject::new("B".into(), "B".into(), 3, GradingScheme::Graded).with_prerequisite("A"),
            )
            .unwrap();

        let patch = SubjectPatch {
            prerequisite: Some(Some("B".to_string())),
            ..SubjectPatch::default()
        };
        let err = records.update_subject("A", &patch).unwrap_err();
        assert!(matches!(err, RecordError::InvalidPrerequisite { .. }));
        assert!(records.subject("A").unwrap().prerequisite.is_none());
    }

    #[test]
    fn test_self_prerequisite_rejected() {
        let mut records = RecordSet::default();
        let subject =
            Subject::new("A".into(), "A".into(), 3, GradingScheme::Graded).with_prerequisite("A");
        assert!(matches!(
            records.add_subject(subject),
            Err(RecordError::InvalidPrerequisite { .. })
        ));
    }
}
