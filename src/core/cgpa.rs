//! CGPA and credit-hour aggregation
//!
//! Aggregates are always recomputed from the student's full grade set joined
//! with the current subject catalog, never patched incrementally.

use crate::core::models::{Grade, Student, Subject};
use crate::{debug, warn};
use std::collections::HashMap;

/// Aggregate fields derived from a student's grades
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aggregate {
    /// Unrounded credit-weighted grade point average over Graded subjects
    pub cgpa: f64,
    /// Credit hours of every joined grade
    pub taken_credit_hours: u32,
    /// Credit hours of joined Graded-scheme grades
    pub cgpa_credit_hours: u32,
}

impl Aggregate {
    /// Aggregate of a student with no grades
    pub const EMPTY: Self = Self {
        cgpa: 0.0,
        taken_credit_hours: 0,
        cgpa_credit_hours: 0,
    };

    /// CGPA rounded to two decimal places, as stored on the student
    #[must_use]
    pub fn rounded_cgpa(&self) -> f64 {
        round2(self.cgpa)
    }

    /// Overwrite the student's aggregate fields
    pub fn apply_to(&self, student: &mut Student) {
        student.cgpa = self.rounded_cgpa();
        student.taken_credit_hours = self.taken_credit_hours;
        student.cgpa_credit_hours = self.cgpa_credit_hours;
    }
}

/// Round to two decimal places
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Grade point in hundredths; points on the scale have at most two decimals
#[allow(clippy::cast_possible_truncation)]
fn point_hundredths(grade_point: f64) -> i64 {
    (grade_point * 100.0).round() as i64
}

/// Recompute a student's CGPA and credit-hour totals.
///
/// Grades of other students are ignored and grades whose subject no longer
/// exists are skipped. Points are summed in integer hundredths so the result
/// does not depend on the order grades are enumerated in. With no Graded
/// credit hours the CGPA is `0.0`.
#[must_use]
pub fn recompute_aggregate(student_id: &str, grades: &[Grade], subjects: &[Subject]) -> Aggregate {
    let catalog: HashMap<&str, &Subject> =
        subjects.iter().map(|s| (s.code.as_str(), s)).collect();

    let mut point_total: i64 = 0;
    let mut taken_credit_hours = 0;
    let mut cgpa_credit_hours = 0;

    for grade in grades.iter().filter(|g| g.student_id == student_id) {
        let Some(subject) = catalog.get(grade.subject_code.as_str()) else {
            warn!(
                "Skipping grade {}/{}: subject no longer exists",
                grade.student_id, grade.subject_code
            );
            continue;
        };

        taken_credit_hours += subject.credit_hours;

        if subject.counts_towards_cgpa() {
            cgpa_credit_hours += subject.credit_hours;
            point_total += point_hundredths(grade.grade_point) * i64::from(subject.credit_hours);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    let cgpa = if cgpa_credit_hours > 0 {
        point_total as f64 / 100.0 / f64::from(cgpa_credit_hours)
    } else {
        0.0
    };

    debug!(
        "Recomputed {student_id}: cgpa={cgpa:.4} taken={taken_credit_hours} cgpa_ch={cgpa_credit_hours}"
    );

    Aggregate {
        cgpa,
        taken_credit_hours,
        cgpa_credit_hours,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{GradingScheme, Mark};

    fn subject(code: &str, credits: u32, grading: GradingScheme) -> Subject {
        Subject::new(code.to_string(), code.to_string(), credits, grading)
    }

    fn grade(student: &str, code: &str, point: f64) -> Grade {
        Grade {
            student_id: student.to_string(),
            subject_code: code.to_string(),
            mark: Mark::new(70).unwrap(),
            letter: "X".to_string(),
            grade_point: point,
        }
    }

    #[test]
    fn test_empty_grade_set() {
        let agg = recompute_aggregate("S001", &[], &[]);
        assert_eq!(agg, Aggregate::EMPTY);
    }

    #[test]
    fn test_only_pass_fail_has_zero_cgpa() {
        let subjects = vec![subject("P1", 2, GradingScheme::PassFail)];
        let grades = vec![grade("S001", "P1", 4.0)];
        let agg = recompute_aggregate("S001", &grades, &subjects);

        assert!(agg.cgpa.abs() < f64::EPSILON);
        assert_eq!(agg.taken_credit_hours, 2);
        assert_eq!(agg.cgpa_credit_hours, 0);
    }

    #[test]
    fn test_missing_subject_is_skipped() {
        let subjects = vec![subject("A", 3, GradingScheme::Graded)];
        let grades = vec![grade("S001", "A", 3.0), grade("S001", "GONE", 4.0)];
        let agg = recompute_aggregate("S001", &grades, &subjects);

        assert!((agg.cgpa - 3.0).abs() < f64::EPSILON);
        assert_eq!(agg.taken_credit_hours, 3);
    }

    #[test]
    fn test_rounding_for_storage() {
        let subjects = vec![
            subject("A", 3, GradingScheme::Graded),
            subject("B", 4, GradingScheme::Graded),
        ];
        let grades = vec![grade("S001", "A", 3.93), grade("S001", "B", 2.46)];
        let agg = recompute_aggregate("S001", &grades, &subjects);

        // (3.93*3 + 2.46*4) / 7 = 21.63 / 7 = 3.09
        assert!((agg.cgpa - 21.63 / 7.0).abs() < 1e-9);
        assert!((agg.rounded_cgpa() - 3.09).abs() < f64::EPSILON);
    }

    #[test]
    fn test_apply_to_student() {
        let mut student = Student::new(
            "S001".to_string(),
            String::new(),
            String::new(),
            String::new(),
        );
        let agg = Aggregate {
            cgpa: 3.456,
            taken_credit_hours: 8,
            cgpa_credit_hours: 6,
        };
        agg.apply_to(&mut student);

        assert!((student.cgpa - 3.46).abs() < f64::EPSILON);
        assert_eq!(student.taken_credit_hours, 8);
        assert_eq!(student.cgpa_credit_hours, 6);
    }
}
