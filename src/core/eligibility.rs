//! Subject eligibility for a single student
//!
//! Resolution is stateless: callers re-run it after every recorded grade so
//! newly graded subjects drop out and newly passed prerequisites unlock their
//! dependents.

use crate::core::error::IneligibleReason;
use crate::core::models::{Grade, Student, Subject};
use crate::debug;

/// Partition of the catalog for one student
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Eligibility<'a> {
    /// Subjects the student may be graded in now
    pub eligible: Vec<&'a Subject>,
    /// Subjects in the student's programme that are blocked by a prerequisite
    pub ineligible: Vec<(&'a Subject, IneligibleReason)>,
}

/// Per-subject status for one student
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectStatus {
    /// Open for grading
    Eligible,
    /// Already has a grade; not offered again
    AlreadyGraded,
    /// Closed for the given reason
    Ineligible(IneligibleReason),
}

/// Whether the student holds a non-`F` grade for `subject_code`.
///
/// The first grade recorded for the pair decides; no grade means not passed.
#[must_use]
pub fn has_passed(student_id: &str, subject_code: &str, grades: &[Grade]) -> bool {
    grades
        .iter()
        .find(|g| g.is_for(student_id, subject_code))
        .is_some_and(Grade::is_pass)
}

/// Status of a single subject for a student
#[must_use]
pub fn subject_status(student: &Student, subject: &Subject, grades: &[Grade]) -> SubjectStatus {
    if !subject.programme.admits(&student.programme) {
        return SubjectStatus::Ineligible(IneligibleReason::ProgrammeMismatch {
            programme: subject.programme.to_string(),
        });
    }

    if grades.iter().any(|g| g.is_for(&student.id, &subject.code)) {
        return SubjectStatus::AlreadyGraded;
    }

    if let Some(prereq) = &subject.prerequisite {
        if !has_passed(&student.id, prereq, grades) {
            return SubjectStatus::Ineligible(IneligibleReason::UnmetPrerequisite {
                prerequisite: prereq.clone(),
            });
        }
    }

    SubjectStatus::Eligible
}

/// Partition the catalog into eligible and prerequisite-blocked subjects.
///
/// Subjects for other programmes and subjects the student already has a grade
/// in appear in neither list. Catalog order is preserved.
#[must_use]
pub fn resolve_eligibility<'a>(
    student: &Student,
    catalog: &'a [Subject],
    grades: &[Grade],
) -> Eligibility<'a> {
    let mut result = Eligibility::default();

    for subject in catalog {
        match subject_status(student, subject, grades) {
            SubjectStatus::Eligible => result.eligible.push(subject),
            SubjectStatus::Ineligible(reason @ IneligibleReason::UnmetPrerequisite { .. }) => {
                result.ineligible.push((subject, reason));
            }
            SubjectStatus::Ineligible(IneligibleReason::ProgrammeMismatch { .. })
            | SubjectStatus::AlreadyGraded => {}
        }
    }

    debug!(
        "Eligibility for {}: {} eligible, {} blocked",
        student.id,
        result.eligible.len(),
        result.ineligible.len()
    );

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{GradingScheme, Mark};

    const AI: &str = "Degree in Computer Science (AI)";
    const ST: &str = "Degree in Computer Science (ST)";

    fn student() -> Student {
        Student::new(
            "S001".to_string(),
            "See Chwan Kai".to_string(),
            AI.to_string(),
            "see@example.edu".to_string(),
        )
    }

    fn subject(code: &str) -> Subject {
        Subject::new(code.to_string(), code.to_string(), 3, GradingScheme::Graded)
    }

    fn grade(code: &str, letter: &str) -> Grade {
        Grade {
            student_id: "S001".to_string(),
            subject_code: code.to_string(),
            mark: Mark::new(50).unwrap(),
            letter: letter.to_string(),
            grade_point: 1.0,
        }
    }

    #[test]
    fn test_programme_mismatch_is_filtered_out() {
        let catalog = vec![subject("A").for_programme(ST), subject("B").for_programme(AI)];
        let result = resolve_eligibility(&student(), &catalog, &[]);

        assert_eq!(result.eligible.len(), 1);
        assert_eq!(result.eligible[0].code, "B");
        assert!(result.ineligible.is_empty());
    }

    #[test]
    fn test_unmet_prerequisite() {
        let catalog = vec![subject("S1"), subject("S2").with_prerequisite("S1")];
        let result = resolve_eligibility(&student(), &catalog, &[]);

        assert_eq!(result.eligible.len(), 1);
        assert_eq!(result.ineligible.len(), 1);
        assert_eq!(result.ineligible[0].0.code, "S2");
        assert_eq!(
            result.ineligible[0].1,
            IneligibleReason::UnmetPrerequisite {
                prerequisite: "S1".to_string()
            }
        );
    }

    #[test]
    fn test_failed_prerequisite_keeps_subject_blocked() {
        let catalog = vec![subject("S1"), subject("S2").with_prerequisite("S1")];
        let grades = vec![grade("S1", "f")];
        let result = resolve_eligibility(&student(), &catalog, &grades);

        assert!(result.eligible.is_empty());
        assert_eq!(result.ineligible.len(), 1);
    }

    #[test]
    fn test_passed_prerequisite_unlocks() {
        let catalog = vec![subject("S1"), subject("S2").with_prerequisite("S1")];
        let grades = vec![grade("S1", "D")];
        let result = resolve_eligibility(&student(), &catalog, &grades);

        assert_eq!(result.eligible.len(), 1);
        assert_eq!(result.eligible[0].code, "S2");
        assert!(result.ineligible.is_empty());
    }

    #[test]
    fn test_graded_subject_never_listed() {
        let catalog = vec![subject("S1"), subject("S2").with_prerequisite("S1")];
        // S2 graded while its prerequisite later turned into an F
        let grades = vec![grade("S1", "F"), grade("S2", "C")];
        let result = resolve_eligibility(&student(), &catalog, &grades);

        assert!(result.eligible.is_empty());
        assert!(result.ineligible.is_empty());
    }

    #[test]
    fn test_has_passed_ignores_other_students() {
        let mut other = grade("S1", "A");
        other.student_id = "S002".to_string();
        assert!(!has_passed("S001", "S1", &[other]));
    }
}
