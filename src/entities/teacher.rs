// 🧑‍🏫 Teacher Entity
//
// Department plus an attendance ledger. No marks, no payments.

use crate::attendance::{AttendanceLedger, HasAttendance};
use crate::entities::{Person, Role, TeacherId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Teacher {
    /// Stable identity - NEVER changes
    id: TeacherId,

    name: String,
    email: String,
    department: String,

    attendance: AttendanceLedger,
}

impl Teacher {
    pub fn new(
        id: TeacherId,
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        Teacher {
            id,
            name: name.into(),
            email: email.into(),
            department: department.into(),
            attendance: AttendanceLedger::new(),
        }
    }

    pub fn id(&self) -> TeacherId {
        self.id
    }

    pub fn department(&self) -> &str {
        &self.department
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub(crate) fn set_department(&mut self, department: String) {
        self.department = department;
    }
}

impl Person for Teacher {
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
        Role::Teacher
    }

    fn summary(&self) -> String {
        format!(
            "[{}] ID={}, Name={}, Email={}, Department={}",
            self.role(),
            self.id,
            self.name,
            self.email,
            self.department
        )
    }
}

impl HasAttendance for Teacher {
    fn attendance(&self) -> &AttendanceLedger {
        &self.attendance
    }

    fn attendance_mut(&mut self) -> &mut AttendanceLedger {
        &mut self.attendance
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_teacher_creation() {
        let teacher = Teacher::new(TeacherId(1001), "A. Smith", "a@x.edu", "Physics");

        assert_eq!(teacher.id(), TeacherId(1001));
        assert_eq!(teacher.name(), "A. Smith");
        assert_eq!(teacher.department(), "Physics");
        assert_eq!(teacher.role(), Role::Teacher);
        assert!(teacher.attendance().is_empty());
    }

    #[test]
    fn test_teacher_summary_appends_department() {
        let mut teacher = Teacher::new(TeacherId(1003), "B. Jones", "b@x.edu", "Maths");
        teacher.set_department("Statistics".to_string());

        assert_eq!(
            teacher.summary(),
            "[Teacher] ID=1003, Name=B. Jones, Email=b@x.edu, Department=Statistics"
        );
    }
}
