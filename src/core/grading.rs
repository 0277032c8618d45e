//! Grade classification: mark + grading scheme → letter grade and grade point

use crate::core::models::{GradingScheme, Mark};

/// Lowest mark that passes a `PassFail` subject
pub const PASS_MARK: u8 = 40;

/// Letter returned when no band matches
pub const INVALID_LETTER: &str = "Invalid";

/// Result of classifying a mark
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    /// Letter grade (e.g., "A-", "PASS")
    pub letter: &'static str,
    /// Grade point for the letter
    pub grade_point: f64,
}

/// One row of the graded scale: `lower <= mark < upper`, or `<= upper` when `upper_inclusive`
#[derive(Debug, Clone, Copy)]
struct Band {
    lower: u8,
    upper: u8,
    upper_inclusive: bool,
    letter: &'static str,
    grade_point: f64,
}

impl Band {
    const fn half_open(lower: u8, upper: u8, letter: &'static str, grade_point: f64) -> Self {
        Self {
            lower,
            upper,
            upper_inclusive: false,
            letter,
            grade_point,
        }
    }

    const fn contains(&self, mark: u8) -> bool {
        mark >= self.lower
            && (mark < self.upper || (self.upper_inclusive && mark == self.upper))
    }
}

/// Graded scale, tested top to bottom; the first matching band wins.
///
/// The order is part of the contract: `[79, 80)` sits below `[80, 90)`, and the
/// wide `C-`/`D+`/`D` bands only line up because earlier rows are tried first.
const GRADED_BANDS: [Band; 36] = [
    Band {
        lower: 90,
        upper: 100,
        upper_inclusive: true,
        letter: "A+",
        grade_point: 4.00,
    },
    Band::half_open(80, 90, "A", 4.00),
    Band::half_open(79, 80, "A-", 3.93),
    Band::half_open(78, 79, "A-", 3.87),
    Band::half_open(77, 78, "A-", 3.80),
    Band::half_open(76, 77, "A-", 3.73),
    Band::half_open(75, 76, "A-", 3.67),
    Band::half_open(74, 75, "B+", 3.60),
    Band::half_open(73, 74, "B+", 3.53),
    Band::half_open(72, 73, "B+", 3.47),
    Band::half_open(71, 72, "B+", 3.40),
    Band::half_open(70, 71, "B+", 3.33),
    Band::half_open(69, 70, "B", 3.27),
    Band::half_open(68, 69, "B", 3.20),
    Band::half_open(67, 68, "B", 3.13),
    Band::half_open(66, 67, "B", 3.07),
    Band::half_open(65, 66, "B", 3.00),
    Band::half_open(64, 65, "B-", 2.93),
    Band::half_open(63, 64, "B-", 2.87),
    Band::half_open(62, 63, "B-", 2.80),
    Band::half_open(61, 62, "B-", 2.73),
    Band::half_open(60, 61, "B-", 2.67),
    Band::half_open(59, 60, "C+", 2.59),
    Band::half_open(58, 59, "C+", 2.53),
    Band::half_open(57, 58, "C+", 2.46),
    Band::half_open(56, 57, "C+", 2.40),
    Band::half_open(55, 56, "C+", 2.33),
    Band::half_open(54, 55, "C", 2.26),
    Band::half_open(53, 54, "C", 2.20),
    Band::half_open(52, 53, "C", 2.13),
    Band::half_open(51, 52, "C", 2.07),
    Band::half_open(50, 51, "C", 2.00),
    Band::half_open(47, 50, "C-", 1.67),
    Band::half_open(44, 47, "D+", 1.33),
    Band::half_open(40, 44, "D", 1.00),
    Band::half_open(0, 40, "F", 0.00),
];

/// Classify a mark under a grading scheme.
///
/// Pure and total over valid marks; range checking happens when the [`Mark`]
/// is built.
#[must_use]
pub fn classify(mark: Mark, scheme: GradingScheme) -> Classification {
    let value = mark.value();
    match scheme {
        GradingScheme::PassFail => {
            if value >= PASS_MARK {
                Classification {
                    letter: "PASS",
                    grade_point: 4.00,
                }
            } else {
                Classification {
                    letter: "FAIL",
                    grade_point: 0.00,
                }
            }
        }
        GradingScheme::Graded => GRADED_BANDS
            .iter()
            .find(|band| band.contains(value))
            .map_or(
                Classification {
                    letter: INVALID_LETTER,
                    grade_point: 0.00,
                },
                |band| Classification {
                    letter: band.letter,
                    grade_point: band.grade_point,
                },
            ),
    }
}
