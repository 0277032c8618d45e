//! Record store boundary
//!
//! The engine never reaches for storage on its own: callers load the full
//! collections, run pure operations on a [`RecordSet`], and write the full
//! collections back. Two stores are provided: an in-memory one and a
//! directory of TOML files.

use crate::core::error::{RecordError, Result};
use crate::core::models::{Grade, RecordSet, Student, Subject};
use crate::debug;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Full-read / full-write access to the three record collections
pub trait RecordStore {
    /// Read every student
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn load_students(&self) -> Result<Vec<Student>>;

    /// Replace every student
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn save_students(&mut self, students: &[Student]) -> Result<()>;

    /// Read every subject
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn load_subjects(&self) -> Result<Vec<Subject>>;

    /// Replace every subject
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn save_subjects(&mut self, subjects: &[Subject]) -> Result<()>;

    /// Read every grade
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be read
    fn load_grades(&self) -> Result<Vec<Grade>>;

    /// Replace every grade
    ///
    /// # Errors
    /// Returns an error if the backing storage cannot be written
    fn save_grades(&mut self, grades: &[Grade]) -> Result<()>;

    /// Read all three collections
    ///
    /// # Errors
    /// Returns the first load error
    fn load_all(&self) -> Result<RecordSet> {
        Ok(RecordSet::new(
            self.load_students()?,
            self.load_subjects()?,
            self.load_grades()?,
        ))
    }

    /// Write all three collections
    ///
    /// # Errors
    /// Returns the first save error
    fn save_all(&mut self, records: &RecordSet) -> Result<()> {
        self.save_subjects(&records.subjects)?;
        self.save_grades(&records.grades)?;
        self.save_students(&records.students)
    }
}

/// Store holding records in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: RecordSet,
}

impl MemoryStore {
    /// Create a store seeded with records
    #[must_use]
    pub const fn new(records: RecordSet) -> Self {
        Self { records }
    }

    /// Current contents
    #[must_use]
    pub const fn records(&self) -> &RecordSet {
        &self.records
    }
}

impl RecordStore for MemoryStore {
    fn load_students(&self) -> Result<Vec<Student>> {
        Ok(self.records.students.clone())
    }

    fn save_students(&mut self, students: &[Student]) -> Result<()> {
        self.records.students = students.to_vec();
        Ok(())
    }

    fn load_subjects(&self) -> Result<Vec<Subject>> {
        Ok(self.records.subjects.clone())
    }

    fn save_subjects(&mut self, subjects: &[Subject]) -> Result<()> {
        self.records.subjects = subjects.to_vec();
        Ok(())
    }

    fn load_grades(&self) -> Result<Vec<Grade>> {
        Ok(self.records.grades.clone())
    }

    fn save_grades(&mut self, grades: &[Grade]) -> Result<()> {
        self.records.grades = grades.to_vec();
        Ok(())
    }
}

/// File names inside a [`TomlStore`] directory
pub const STUDENTS_FILE: &str = "students.toml";
/// Subject catalog file name
pub const SUBJECTS_FILE: &str = "subjects.toml";
/// Grade file name
pub const GRADES_FILE: &str = "grades.toml";

#[derive(Serialize, Deserialize)]
struct StudentsDoc {
    #[serde(default, rename = "student")]
    items: Vec<Student>,
}

#[derive(Serialize, Deserialize)]
struct SubjectsDoc {
    #[serde(default, rename = "subject")]
    items: Vec<Subject>,
}

#[derive(Serialize, Deserialize)]
struct GradesDoc {
    #[serde(default, rename = "grade")]
    items: Vec<Grade>,
}

/// Store keeping each collection in its own TOML file under a directory
///
/// Missing files read as empty collections, so a fresh directory is a valid
/// empty store. Writes go to a temporary file that is then renamed over the
/// target; `save_all` writes all three temporary files before renaming any.
#[derive(Debug, Clone)]
pub struct TomlStore {
    dir: PathBuf,
}

impl TomlStore {
    /// Create a store rooted at `dir` (created on first write)
    #[must_use]
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    /// Directory holding the record files
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_doc<T: DeserializeOwned>(&self, file_name: &str) -> Result<Option<T>> {
        let path = self.dir.join(file_name);
        if !path.exists() {
            debug!("{} not found; treating as empty", path.display());
            return Ok(None);
        }

        let content = fs::read_to_string(&path).map_err(|source| RecordError::Io {
            path: path.clone(),
            source,
        })?;
        toml::from_str(&content)
            .map(Some)
            .map_err(|e| RecordError::Parse {
                path,
                message: e.to_string(),
            })
    }

    /// Serialize `doc` next to its target as `<file>.tmp`
    fn stage_doc<T: Serialize>(&self, file_name: &str, doc: &T) -> Result<Staged> {
        fs::create_dir_all(&self.dir).map_err(|source| RecordError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let target = self.dir.join(file_name);
        let tmp = self.dir.join(format!("{file_name}.tmp"));
        let body = toml::to_string_pretty(doc).map_err(|e| RecordError::Serialize(e.to_string()))?;

        fs::write(&tmp, body).map_err(|source| RecordError::Io {
            path: tmp.clone(),
            source,
        })?;
        Ok(Staged { tmp, target })
    }

    fn stage_all(&self, records: &RecordSet, staged: &mut Vec<Staged>) -> Result<()> {
        staged.push(self.stage_doc(
            SUBJECTS_FILE,
            &SubjectsDoc {
                items: records.subjects.clone(),
            },
        )?);
        staged.push(self.stage_doc(
            GRADES_FILE,
            &GradesDoc {
                items: records.grades.clone(),
            },
        )?);
        staged.push(self.stage_doc(
            STUDENTS_FILE,
            &StudentsDoc {
                items: records.students.clone(),
            },
        )?);
        Ok(())
    }

    fn write_doc<T: Serialize>(&self, file_name: &str, doc: &T) -> Result<()> {
        self.stage_doc(file_name, doc)?.commit()
    }
}

/// A fully written temporary file waiting to replace its target
struct Staged {
    tmp: PathBuf,
    target: PathBuf,
}

impl Staged {
    fn commit(self) -> Result<()> {
        fs::rename(&self.tmp, &self.target).map_err(|source| RecordError::Io {
            path: self.target,
            source,
        })
    }

    fn discard(&self) {
        if fs::remove_file(&self.tmp).is_err() {
            debug!("Could not remove {}", self.tmp.display());
        }
    }
}

impl RecordStore for TomlStore {
    /// Read all three collections and recompute every student's aggregate
    ///
    /// CGPA and credit hours are derived from grades, so values on disk are
    /// never trusted over the grades themselves.
    fn load_all(&self) -> Result<RecordSet> {
        let mut records = RecordSet::new(
            self.load_students()?,
            self.load_subjects()?,
            self.load_grades()?,
        );
        records.refresh_all_aggregates();
        Ok(records)
    }

    /// Write all three collections, replacing the files only once every
    /// temporary file has been written
    fn save_all(&mut self, records: &RecordSet) -> Result<()> {
        let mut staged = Vec::with_capacity(3);
        if let Err(e) = self.stage_all(records, &mut staged) {
            for file in &staged {
                file.discard();
            }
            return Err(e);
        }

        for file in staged {
            file.commit()?;
        }
        Ok(())
    }

    fn load_students(&self) -> Result<Vec<Student>> {
        Ok(self
            .read_doc::<StudentsDoc>(STUDENTS_FILE)?
            .map(|d| d.items)
            .unwrap_or_default())
    }

    fn save_students(&mut self, students: &[Student]) -> Result<()> {
        self.write_doc(
            STUDENTS_FILE,
            &StudentsDoc {
                items: students.to_vec(),
            },
        )
    }

    fn load_subjects(&self) -> Result<Vec<Subject>> {
        Ok(self
            .read_doc::<SubjectsDoc>(SUBJECTS_FILE)?
            .map(|d| d.items)
            .unwrap_or_default())
    }

    fn save_subjects(&mut self, subjects: &[Subject]) -> Result<()> {
        self.write_doc(
            SUBJECTS_FILE,
            &SubjectsDoc {
                items: subjects.to_vec(),
            },
        )
    }

    fn load_grades(&self) -> Result<Vec<Grade>> {
        Ok(self
            .read_doc::<GradesDoc>(GRADES_FILE)?
            .map(|d| d.items)
            .unwrap_or_default())
    }

    fn save_grades(&mut self, grades: &[Grade]) -> Result<()> {
        self.write_doc(
            GRADES_FILE,
            &GradesDoc {
                items: grades.to_vec(),
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::{GradingScheme, Mark};

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::default();
        let records = RecordSet::new(
            vec![Student::new(
                "S001".into(),
                "Teo Jing An".into(),
                "Degree in Computer Science (BIA)".into(),
                "teo@example.edu".into(),
            )],
            vec![Subject::new("A".into(), "A".into(), 3, GradingScheme::PassFail)],
            vec![Grade {
                student_id: "S001".into(),
                subject_code: "A".into(),
                mark: Mark::new(41).unwrap(),
                letter: "PASS".into(),
                grade_point: 4.0,
            }],
        );

        store.save_all(&records).unwrap();
        assert_eq!(store.load_all().unwrap(), records);
    }
}
