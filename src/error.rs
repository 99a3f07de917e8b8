//! Error types for record operations
//!
//! Only validation failures are errors. Lookups that find nothing return
//! `None` / `false` instead.

use crate::entities::StudentId;
use thiserror::Error;

/// Result type for record operations
pub type Result<T> = std::result::Result<T, RecordError>;

/// Record management errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Argument rejected before any mutation (e.g. non-positive payment)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Marks entered for a subject the exam catalog does not know
    #[error("No such subject in exam schedule: {0}")]
    SubjectNotFound(String),

    /// Marks outside `0..=max`
    #[error("Marks must be between 0 and {max}, got {marks}")]
    MarksOutOfRange { marks: i32, max: u32 },

    /// Student id not registered in this directory
    #[error("Student not found: {0}")]
    StudentNotFound(StudentId),
}
