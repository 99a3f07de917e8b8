// 🎓 Student Entity
//
// Carries all three ledgers: attendance, marks and tuition payments.

use crate::attendance::{AttendanceLedger, HasAttendance};
use crate::entities::{Person, Role, StudentId};
use crate::exams::{HasMarks, MarksLedger};
use crate::fees::{HasPayments, PaymentLedger};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    /// Stable identity - NEVER changes
    id: StudentId,

    name: String,
    email: String,

    attendance: AttendanceLedger,
    marks: MarksLedger,
    payments: PaymentLedger,
}

impl Student {
    /// Create a student with empty ledgers
    pub fn new(id: StudentId, name: impl Into<String>, email: impl Into<String>) -> Self {
        Student {
            id,
            name: name.into(),
            email: email.into(),
            attendance: AttendanceLedger::new(),
            marks: MarksLedger::new(),
            payments: PaymentLedger::new(),
        }
    }

    pub fn id(&self) -> StudentId {
        self.id
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }
}

impl Person for Student {
    fn raw_id(&self) -> u64 {
        self.id.0
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn email(&self) -> &str {
        &self.email
    }

    fn role(&self) -> Role {
        Role::Student
    }
}

impl HasAttendance for Student {
    fn attendance(&self) -> &AttendanceLedger {
        &self.attendance
    }

    fn attendance_mut(&mut self) -> &mut AttendanceLedger {
        &mut self.attendance
    }
}

impl HasMarks for Student {
    fn marks(&self) -> &MarksLedger {
        &self.marks
    }

    fn marks_mut(&mut self) -> &mut MarksLedger {
        &mut self.marks
    }
}

impl HasPayments for Student {
    fn payments(&self) -> &PaymentLedger {
        &self.payments
    }

    fn payments_mut(&mut self) -> &mut PaymentLedger {
        &mut self.payments
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_student_creation() {
        let student = Student::new(StudentId(1001), "Jane Doe", "jane.doe@student.univ.edu");

        assert_eq!(student.id(), StudentId(1001));
        assert_eq!(student.raw_id(), 1001);
        assert_eq!(student.name(), "Jane Doe");
        assert_eq!(student.email(), "jane.doe@student.univ.edu");
        assert_eq!(student.role(), Role::Student);

        // All ledgers start empty
        assert!(student.attendance().is_empty());
        assert!(student.marks().is_empty());
        assert!(student.payments().is_empty());
    }

    #[test]
    fn test_student_display() {
        let student = Student::new(StudentId(1005), "Ali Khan", "ali@x.edu");
        assert_eq!(
            student.to_string(),
            "[Student] ID=1005, Name=Ali Khan, Email=ali@x.edu"
        );
    }

    #[test]
    fn test_setters_keep_identity() {
        let mut student = Student::new(StudentId(1001), "Old", "old@x.edu");
        student.set_name("New".to_string());
        student.set_email("new@x.edu".to_string());

        assert_eq!(student.id(), StudentId(1001));
        assert_eq!(student.name(), "New");
        assert_eq!(student.email(), "new@x.edu");
    }
}
