//! Integration tests for the TOML record store

use nu_records::core::models::{GradingScheme, Mark, RecordSet, Subject};
use nu_records::core::registry::NewStudent;
use nu_records::core::store::{RecordStore, TomlStore, GRADES_FILE, STUDENTS_FILE, SUBJECTS_FILE};
use nu_records::core::RecordError;
use std::fs;
use tempfile::TempDir;

fn sample() -> RecordSet {
    let mut records = RecordSet::default();
    records
        .add_subject(Subject::new(
            "TSW6223".into(),
            "Semantic Web Technology".into(),
            3,
            GradingScheme::Graded,
        ))
        .unwrap();
    records
        .add_subject(
            Subject::new("TMC1013".into(), "Co-curriculum".into(), 2, GradingScheme::PassFail)
                .for_programme("BCS(BIA)")
                .with_prerequisite("TSW6223"),
        )
        .unwrap();
    let id = records
        .enroll_student(&NewStudent {
            name: "Siti \"Sue\" Aminah".into(),
            programme: "BCS(AI)".into(),
            email: "siti@example.edu".into(),
        })
        .unwrap();
    records
        .record_grade(&id, "TSW6223", Mark::new(77).unwrap())
        .unwrap();
    records
}

#[test]
fn fresh_directory_reads_as_empty() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = TomlStore::new(dir.path().join("missing"));

    let records = store.load_all().expect("empty store should load");
    assert_eq!(records, RecordSet::default());
}

#[test]
fn save_then_load_preserves_every_collection() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = TomlStore::new(dir.path());
    let records = sample();

    store.save_all(&records).expect("save should succeed");
    for file in [STUDENTS_FILE, SUBJECTS_FILE, GRADES_FILE] {
        assert!(dir.path().join(file).exists(), "{file} missing");
        assert!(!dir.path().join(format!("{file}.tmp")).exists());
    }

    let loaded = store.load_all().expect("load should succeed");
    assert_eq!(loaded, records);
}

#[test]
fn files_are_readable_toml() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = TomlStore::new(dir.path());
    store.save_all(&sample()).unwrap();

    let subjects = fs::read_to_string(dir.path().join(SUBJECTS_FILE)).unwrap();
    assert!(subjects.contains("[[subject]]"));
    assert!(subjects.contains("grading = \"pass_fail\""));
    assert!(subjects.contains("programme = \"Degree in Computer Science (BIA)\""));
    assert!(subjects.contains("programme = \"For All Programmes\""));

    let grades = fs::read_to_string(dir.path().join(GRADES_FILE)).unwrap();
    assert!(grades.contains("mark = 77"));
}

#[test]
fn hand_written_files_accept_aliases() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join(SUBJECTS_FILE),
        r#"
[[subject]]
code = "A"
name = "Alpha"
credit_hours = 3
programme = "All"
grading = "G"

[[subject]]
code = "B"
name = "Beta"
credit_hours = 2
programme = "Degree in Computer Science (ST)"
prerequisite = "A"
grading = "P"
"#,
    )
    .unwrap();

    let store = TomlStore::new(dir.path());
    let subjects = store.load_subjects().unwrap();
    assert_eq!(subjects.len(), 2);
    assert_eq!(subjects[0].grading, GradingScheme::Graded);
    assert!(subjects[0].programme.admits("anything"));
    assert_eq!(subjects[1].grading, GradingScheme::PassFail);
    assert_eq!(subjects[1].prerequisite.as_deref(), Some("A"));
}

#[test]
fn out_of_range_mark_is_a_parse_error() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(
        dir.path().join(GRADES_FILE),
        r#"
[[grade]]
student_id = "S001"
subject_code = "A"
mark = 140
letter = "A+"
grade_point = 4.0
"#,
    )
    .unwrap();

    let store = TomlStore::new(dir.path());
    assert!(matches!(store.load_grades(), Err(RecordError::Parse { .. })));
}

#[test]
fn failed_save_leaves_previous_files_in_place() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = TomlStore::new(dir.path());

    let mut records = sample();
    records.grades.clear();
    records.refresh_all_aggregates();
    store.save_all(&records).expect("initial save should succeed");

    let with_grade = sample();
    fs::create_dir(dir.path().join(format!("{STUDENTS_FILE}.tmp"))).unwrap();
    assert!(matches!(
        store.save_all(&with_grade),
        Err(RecordError::Io { .. })
    ));

    assert!(!dir.path().join(format!("{SUBJECTS_FILE}.tmp")).exists());
    assert!(!dir.path().join(format!("{GRADES_FILE}.tmp")).exists());

    let loaded = store.load_all().unwrap();
    assert!(loaded.grades.is_empty());
    assert_eq!(loaded.students[0].taken_credit_hours, 0);
    assert!(loaded.students[0].cgpa.abs() < f64::EPSILON);
}

#[test]
fn stale_aggregates_on_disk_are_recomputed_on_load() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let mut store = TomlStore::new(dir.path());
    let records = sample();

    store.save_subjects(&records.subjects).unwrap();
    store.save_grades(&records.grades).unwrap();
    let mut stale = records.students.clone();
    stale[0].cgpa = 0.0;
    stale[0].taken_credit_hours = 0;
    stale[0].cgpa_credit_hours = 0;
    store.save_students(&stale).unwrap();

    let loaded = store.load_all().unwrap();
    assert_eq!(loaded, records);
    assert_eq!(loaded.students[0].taken_credit_hours, 3);
    assert!(loaded.students[0].cgpa > 0.0);
}
