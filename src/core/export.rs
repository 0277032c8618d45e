//! Derived-graph export
//!
//! Renders the record set as N-Triples for semantic querying tools. This is a
//! downstream view of the same records the queries read; nothing in the
//! engine reads it back.

use crate::core::models::RecordSet;

/// Base IRI for every exported resource
pub const BASE_IRI: &str = "http://example.org/";

const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";

/// An RDF object: either a resource or a literal
enum Object<'a> {
    Iri(String),
    Plain(&'a str),
    Typed(String, &'static str),
}

/// Escape a literal for N-Triples
fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\t' => escaped.push_str("\\t"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Percent-encode characters that are not allowed inside an IRI reference
fn encode_segment(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(char::from(byte));
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    encoded
}

fn iri(kind: &str, key: &str) -> String {
    format!("{BASE_IRI}{kind}/{}", encode_segment(key))
}

fn vocab(term: &str) -> String {
    format!("{BASE_IRI}{term}")
}

/// Collects triples into N-Triples text
#[derive(Debug, Default)]
pub struct TripleWriter {
    out: String,
    count: usize,
}

impl TripleWriter {
    fn push(&mut self, subject: &str, predicate: &str, object: &Object<'_>) {
        let object = match object {
            Object::Iri(iri) => format!("<{iri}>"),
            Object::Plain(value) => format!("\"{}\"", escape_literal(value)),
            Object::Typed(value, datatype) => {
                format!("\"{}\"^^<{datatype}>", escape_literal(value))
            }
        };
        self.out.push_str(&format!("<{subject}> <{predicate}> {object} .\n"));
        self.count += 1;
    }

    /// Number of triples written
    #[must_use]
    pub const fn len(&self) -> usize {
        self.count
    }

    /// Whether no triple has been written
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Finished N-Triples document
    #[must_use]
    pub fn finish(self) -> String {
        self.out
    }
}

/// Render every record, plus derived `hasPassed` facts, as N-Triples
#[must_use]
pub fn to_ntriples(records: &RecordSet) -> TripleWriter {
    let mut w = TripleWriter::default();

    for student in &records.students {
        let s = iri("student", &student.id);
        w.push(&s, RDF_TYPE, &Object::Iri(vocab("Student")));
        w.push(&s, &vocab("id"), &Object::Plain(&student.id));
        w.push(&s, &vocab("name"), &Object::Plain(&student.name));
        w.push(&s, &vocab("programme"), &Object::Plain(&student.programme));
        w.push(&s, &vocab("email"), &Object::Plain(&student.email));
        w.push(
            &s,
            &vocab("cgpa"),
            &Object::Typed(format!("{:.2}", student.cgpa), XSD_DECIMAL),
        );
        w.push(
            &s,
            &vocab("takenCreditHours"),
            &Object::Typed(student.taken_credit_hours.to_string(), XSD_INTEGER),
        );
    }

    for subject in &records.subjects {
        let s = iri("subject", &subject.code);
        w.push(&s, RDF_TYPE, &Object::Iri(vocab("Subject")));
        w.push(&s, &vocab("code"), &Object::Plain(&subject.code));
        w.push(&s, &vocab("name"), &Object::Plain(&subject.name));
        w.push(
            &s,
            &vocab("credit"),
            &Object::Typed(subject.credit_hours.to_string(), XSD_INTEGER),
        );
        w.push(&s, &vocab("programme"), &Object::Plain(subject.programme.as_str()));
        w.push(
            &s,
            &vocab("grading"),
            &Object::Plain(subject.grading.describe()),
        );
        if let Some(prereq) = &subject.prerequisite {
            w.push(&s, &vocab("prerequisite"), &Object::Iri(iri("subject", prereq)));
        }
    }

    for grade in &records.grades {
        let g = iri("grade", &format!("{}_{}", grade.student_id, grade.subject_code));
        w.push(&g, RDF_TYPE, &Object::Iri(vocab("Grade")));
        w.push(&g, &vocab("student"), &Object::Iri(iri("student", &grade.student_id)));
        w.push(&g, &vocab("subject"), &Object::Iri(iri("subject", &grade.subject_code)));
        w.push(
            &g,
            &vocab("mark"),
            &Object::Typed(grade.mark.to_string(), XSD_INTEGER),
        );
        w.push(&g, &vocab("gradeValue"), &Object::Plain(&grade.letter));
        w.push(
            &g,
            &vocab("gradePoint"),
            &Object::Typed(format!("{:.2}", grade.grade_point), XSD_DECIMAL),
        );

        if grade.is_pass() {
            w.push(
                &iri("student", &grade.student_id),
                &vocab("hasPassed"),
                &Object::Iri(iri("subject", &grade.subject_code)),
            );
        }
    }

    w
}
