//! Integration tests for mark classification

use nu_records::core::grading::{classify, PASS_MARK};
use nu_records::core::models::{GradingScheme, Mark};
use nu_records::core::RecordError;

fn graded(mark: i64) -> (&'static str, f64) {
    let c = classify(Mark::new(mark).unwrap(), GradingScheme::Graded);
    (c.letter, c.grade_point)
}

fn assert_graded(mark: i64, letter: &str, point: f64) {
    let (got_letter, got_point) = graded(mark);
    assert_eq!(got_letter, letter, "letter for mark {mark}");
    assert!(
        (got_point - point).abs() < f64::EPSILON,
        "point for mark {mark}: {got_point} != {point}"
    );
}

#[test]
fn documented_graded_examples() {
    assert_graded(95, "A+", 4.00);
    assert_graded(79, "A-", 3.93);
    assert_graded(80, "A", 4.00);
    assert_graded(47, "C-", 1.67);
    assert_graded(39, "F", 0.00);
}

#[test]
fn graded_band_edges() {
    assert_graded(100, "A+", 4.00);
    assert_graded(90, "A+", 4.00);
    assert_graded(89, "A", 4.00);
    assert_graded(75, "A-", 3.67);
    assert_graded(74, "B+", 3.60);
    assert_graded(65, "B", 3.00);
    assert_graded(60, "B-", 2.67);
    assert_graded(59, "C+", 2.59);
    assert_graded(50, "C", 2.00);
    assert_graded(49, "C-", 1.67);
    assert_graded(46, "D+", 1.33);
    assert_graded(44, "D+", 1.33);
    assert_graded(43, "D", 1.00);
    assert_graded(40, "D", 1.00);
    assert_graded(0, "F", 0.00);
}

#[test]
fn every_valid_mark_has_a_band() {
    for m in 0..=100 {
        let (letter, _) = graded(m);
        assert_ne!(letter, "Invalid", "mark {m} fell through the scale");
    }
}

#[test]
fn graded_points_never_increase_as_marks_fall() {
    let mut previous = f64::INFINITY;
    for m in (0..=100).rev() {
        let (_, point) = graded(m);
        assert!(point <= previous, "point rose at mark {m}");
        previous = point;
    }
}

#[test]
fn pass_fail_passes_iff_at_least_pass_mark() {
    for m in 0..=100_i64 {
        let c = classify(Mark::new(m).unwrap(), GradingScheme::PassFail);
        if m >= i64::from(PASS_MARK) {
            assert_eq!(c.letter, "PASS", "mark {m}");
            assert!((c.grade_point - 4.0).abs() < f64::EPSILON);
        } else {
            assert_eq!(c.letter, "FAIL", "mark {m}");
            assert!(c.grade_point.abs() < f64::EPSILON);
        }
    }
}

#[test]
fn out_of_range_marks_are_rejected_before_classification() {
    assert!(matches!(Mark::new(101), Err(RecordError::InvalidMark(_))));
    assert!(matches!(Mark::new(-1), Err(RecordError::InvalidMark(_))));
    assert!(matches!("85.5".parse::<Mark>(), Err(RecordError::InvalidMark(_))));
    assert!(matches!("".parse::<Mark>(), Err(RecordError::InvalidMark(_))));
    assert_eq!("85".parse::<Mark>().unwrap().value(), 85);
}
