//! Data models for `NuRecords`

pub mod grade;
pub mod programme;
pub mod records;
pub mod student;
pub mod subject;

pub use grade::{Grade, Mark};
pub use programme::{ProgrammeScope, ALL_PROGRAMMES, PROGRAMMES};
pub use records::RecordSet;
pub use student::Student;
pub use subject::{GradingScheme, Subject};
