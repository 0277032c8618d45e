//! Grade model

use crate::core::error::RecordError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A whole-number mark in `[0, 100]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Mark(u8);

impl Mark {
    /// Highest attainable mark
    pub const MAX: u8 = 100;

    /// Validate a mark
    ///
    /// # Errors
    /// Returns `InvalidMark` when `value` is outside `[0, 100]`
    pub fn new(value: i64) -> Result<Self, RecordError> {
        u8::try_from(value)
            .ok()
            .filter(|v| *v <= Self::MAX)
            .map(Self)
            .ok_or_else(|| RecordError::InvalidMark(value.to_string()))
    }

    /// The mark as an integer
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Mark {
    type Error = RecordError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Mark> for u8 {
    fn from(mark: Mark) -> Self {
        mark.0
    }
}

impl FromStr for Mark {
    type Err = RecordError;

    /// Only plain digits are accepted; signs, decimals and blanks are rejected
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RecordError::InvalidMark(s.to_string()));
        }
        trimmed
            .parse::<i64>()
            .map_err(|_| RecordError::InvalidMark(s.to_string()))
            .and_then(Self::new)
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A recorded result for one (student, subject) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    /// Student the grade belongs to
    pub student_id: String,

    /// Subject the grade was earned in
    pub subject_code: String,

    /// Raw mark
    pub mark: Mark,

    /// Letter grade (e.g., "A-", "PASS")
    pub letter: String,

    /// Grade point for the letter
    pub grade_point: f64,
}

impl Grade {
    /// Whether this grade belongs to the (student, subject) pair
    #[must_use]
    pub fn is_for(&self, student_id: &str, subject_code: &str) -> bool {
        self.student_id == student_id && self.subject_code == subject_code
    }

    /// A recorded grade passes unless its letter is `F` (case-insensitive)
    #[must_use]
    pub fn is_pass(&self) -> bool {
        !self.letter.trim().eq_ignore_ascii_case("F")
    }

    /// A grade fails for statistics when its point is zero or less
    #[must_use]
    pub fn is_zero_point(&self) -> bool {
        self.grade_point <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(letter: &str, point: f64) -> Grade {
        Grade {
            student_id: "S001".to_string(),
            subject_code: "A".to_string(),
            mark: Mark::new(50).unwrap(),
            letter: letter.to_string(),
            grade_point: point,
        }
    }

    #[test]
    fn test_mark_bounds() {
        assert!(Mark::new(0).is_ok());
        assert!(Mark::new(100).is_ok());
        assert!(matches!(Mark::new(101), Err(RecordError::InvalidMark(_))));
        assert!(matches!(Mark::new(-1), Err(RecordError::InvalidMark(_))));
    }

    #[test]
    fn test_mark_parse_rejects_non_integers() {
        assert_eq!("75".parse::<Mark>().unwrap().value(), 75);
        assert_eq!(" 7 ".parse::<Mark>().unwrap().value(), 7);
        assert!("75.5".parse::<Mark>().is_err());
        assert!("-3".parse::<Mark>().is_err());
        assert!("".parse::<Mark>().is_err());
        assert!("abc".parse::<Mark>().is_err());
        assert!("1000".parse::<Mark>().is_err());
    }

    #[test]
    fn test_is_pass_only_rejects_f() {
        assert!(!grade("F", 0.0).is_pass());
        assert!(!grade("f", 0.0).is_pass());
        assert!(grade("D", 1.0).is_pass());
        // PassFail failures carry "FAIL", not "F"
        assert!(grade("FAIL", 0.0).is_pass());
    }

    #[test]
    fn test_zero_point() {
        assert!(grade("FAIL", 0.0).is_zero_point());
        assert!(!grade("D", 1.0).is_zero_point());
    }
}
