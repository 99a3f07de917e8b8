// 📝 Exam Catalog + Marks Ledger
//
// The catalog is the ordered list of scheduled exams. Marks are only
// accepted for a subject the catalog knows, and only within the matched
// exam's maximum.

use crate::error::{RecordError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// EXAMINATION DETAIL
// ============================================================================

/// A scheduled exam. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExaminationDetail {
    subject: String,
    date: NaiveDate,
    max_marks: u32,
}

impl ExaminationDetail {
    pub fn new(subject: impl Into<String>, date: NaiveDate, max_marks: u32) -> Self {
        ExaminationDetail {
            subject: subject.into(),
            date,
            max_marks,
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn max_marks(&self) -> u32 {
        self.max_marks
    }

    /// Case-insensitive subject comparison, one char at a time
    ///
    /// A pair matches when the chars are equal, or equal after upper-casing,
    /// or equal after lower-casing. Whole-string lowercasing would miss
    /// pairs such as `İ`/`i`.
    pub fn matches_subject(&self, subject: &str) -> bool {
        self.subject.chars().count() == subject.chars().count()
            && self
                .subject
                .chars()
                .zip(subject.chars())
                .all(|(a, b)| chars_equal_ignore_case(a, b))
    }
}

/// Per-char case folding: upper-case both sides, then lower-case both
fn chars_equal_ignore_case(a: char, b: char) -> bool {
    if a == b {
        return true;
    }
    let (ua, ub) = (simple_upper(a), simple_upper(b));
    ua == ub || simple_lower(ua) == simple_lower(ub)
}

// Multi-char expansions (`ß` → `SS`) leave the char alone
fn simple_upper(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(u), None) => u,
        _ => c,
    }
}

// Only `İ` expands when lower-cased, and its leading char is the plain `i`
fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

impl fmt::Display for ExaminationDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exam{{subject='{}', date={}, max={}}}",
            self.subject, self.date, self.max_marks
        )
    }
}

// ============================================================================
// MARKS LEDGER
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectMark {
    pub subject: String,
    pub marks: i32,
}

/// Subject → marks, keyed by the exact subject text that was entered
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarksLedger {
    entries: Vec<SubjectMark>,
}

impl MarksLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite the marks for an exact subject key
    pub(crate) fn set(&mut self, subject: &str, marks: i32) {
        match self.entries.iter_mut().find(|e| e.subject == subject) {
            Some(entry) => entry.marks = marks,
            None => self.entries.push(SubjectMark {
                subject: subject.to_string(),
                marks,
            }),
        }
    }

    pub fn get(&self, subject: &str) -> Option<i32> {
        self.entries
            .iter()
            .find(|e| e.subject == subject)
            .map(|e| e.marks)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SubjectMark> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Renders as `{Math=90, Physics=40}`
impl fmt::Display for MarksLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", entry.subject, entry.marks)?;
        }
        f.write_str("}")
    }
}

/// Anything that keeps a marks ledger (students only)
pub trait HasMarks {
    fn marks(&self) -> &MarksLedger;
    fn marks_mut(&mut self) -> &mut MarksLedger;

    /// Copy of the current marks
    fn view_marks(&self) -> MarksLedger {
        self.marks().clone()
    }
}

// ============================================================================
// EXAM CATALOG
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamCatalog {
    exams: Vec<ExaminationDetail>,
}

impl ExamCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an exam. Duplicate subjects and dates are allowed.
    pub fn add_exam(&mut self, exam: ExaminationDetail) {
        tracing::debug!(subject = exam.subject(), date = %exam.date(), max = exam.max_marks(), "exam added");
        self.exams.push(exam);
    }

    /// Exams in the order they were added
    pub fn schedule(&self) -> &[ExaminationDetail] {
        &self.exams
    }

    /// First exam whose subject matches case-insensitively
    pub fn find_subject(&self, subject: &str) -> Option<&ExaminationDetail> {
        self.exams.iter().find(|e| e.matches_subject(subject))
    }

    pub fn len(&self) -> usize {
        self.exams.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exams.is_empty()
    }

    /// Validate marks against the catalog and record them
    ///
    /// Fails without touching the ledger when the subject is unknown or the
    /// marks fall outside `0..=max_marks` of the first matching exam.
    pub fn enter_marks<S>(&self, student: &mut S, subject: &str, marks: i32) -> Result<()>
    where
        S: HasMarks + ?Sized,
    {
        let exam = self.find_subject(subject).ok_or_else(|| {
            tracing::warn!(subject, "marks rejected: unknown subject");
            RecordError::SubjectNotFound(subject.to_string())
        })?;

        let max = exam.max_marks();
        if marks < 0 || i64::from(marks) > i64::from(max) {
            tracing::warn!(subject, marks, max, "marks rejected: out of range");
            return Err(RecordError::MarksOutOfRange { marks, max });
        }

        student.marks_mut().set(subject, marks);
        Ok(())
    }
}
