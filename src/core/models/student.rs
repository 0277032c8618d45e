//! Student model

use serde::{Deserialize, Serialize};

/// An enrolled student and their derived aggregate fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Unique id (e.g., "S001")
    pub id: String,

    /// Full name
    pub name: String,

    /// Programme name (e.g., "Degree in Computer Science (AI)")
    pub programme: String,

    /// Contact email
    pub email: String,

    /// Credit hours of every graded subject, Graded and `PassFail` alike
    #[serde(default)]
    pub taken_credit_hours: u32,

    /// Cumulative GPA rounded to two places
    #[serde(default)]
    pub cgpa: f64,

    /// Credit hours that count towards the CGPA (Graded scheme only)
    #[serde(default)]
    pub cgpa_credit_hours: u32,
}

impl Student {
    /// Create a newly enrolled student with empty aggregates
    ///
    /// # Arguments
    /// * `id` - Unique student id
    /// * `name` - Full name
    /// * `programme` - Programme name
    /// * `email` - Contact email
    #[must_use]
    pub const fn new(id: String, name: String, programme: String, email: String) -> Self {
        Self {
            id,
            name,
            programme,
            email,
            taken_credit_hours: 0,
            cgpa: 0.0,
            cgpa_credit_hours: 0,
        }
    }

    /// Numeric part of an `S###` id, if it has one
    #[must_use]
    pub fn sequence_number(&self) -> Option<u32> {
        self.id.strip_prefix('S').and_then(|n| n.parse().ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_creation() {
        let student = Student::new(
            "S001".to_string(),
            "Tee Kian Hao".to_string(),
            "Degree in Computer Science (AI)".to_string(),
            "tee@example.edu".to_string(),
        );

        assert_eq!(student.taken_credit_hours, 0);
        assert_eq!(student.cgpa_credit_hours, 0);
        assert!(student.cgpa.abs() < f64::EPSILON);
    }

    #[test]
    fn test_sequence_number() {
        let mut student = Student::new(
            "S042".to_string(),
            String::new(),
            String::new(),
            String::new(),
        );
        assert_eq!(student.sequence_number(), Some(42));

        student.id = "X1".to_string();
        assert_eq!(student.sequence_number(), None);
    }
}
