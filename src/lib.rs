// Campus Records - Core Library
// Exposes the record model for the console binary and for tests

pub mod error;
pub mod config;
pub mod identity;
pub mod entities;
pub mod attendance;
pub mod exams;
pub mod fees;
pub mod directory;
pub mod console;

// Re-export commonly used types
pub use error::{RecordError, Result};
pub use config::Config;
pub use identity::{IdAllocator, DEFAULT_ID_SEED};
pub use entities::{
    Person, PersonId, PersonRef, Role,
    Student, StudentId, Teacher, TeacherId,
};
pub use attendance::{AttendanceEntry, AttendanceLedger, HasAttendance};
pub use exams::{ExamCatalog, ExaminationDetail, HasMarks, MarksLedger, SubjectMark};
pub use fees::{HasPayments, Payment, PaymentLedger};
pub use directory::{
    default_student_email, Directory, DirectorySnapshot,
    NewStudent, NewTeacher, StudentUpdate, TeacherUpdate,
};
pub use console::{Console, RecordBrowser};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Today's date in local time; the default for attendance and payments
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
