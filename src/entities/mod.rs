// Person Records
//
// Each person has:
// - A number from the directory's identity sequence that NEVER changes
// - A mutable name and email
// - A fixed role, which decides the ledgers it carries
//
// Students and teachers get distinct id types so that a teacher can never
// be handed to an operation that only makes sense for students.

pub mod student;
pub mod teacher;

pub use student::Student;
pub use teacher::Teacher;

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// IDS
// ============================================================================

/// Identity of a registered student
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(pub u64);

/// Identity of a registered teacher
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeacherId(pub u64);

/// Identity of any registered person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PersonId {
    Student(StudentId),
    Teacher(TeacherId),
}

impl PersonId {
    pub fn raw(&self) -> u64 {
        match self {
            PersonId::Student(id) => id.0,
            PersonId::Teacher(id) => id.0,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            PersonId::Student(_) => Role::Student,
            PersonId::Teacher(_) => Role::Teacher,
        }
    }
}

impl From<StudentId> for PersonId {
    fn from(id: StudentId) -> Self {
        PersonId::Student(id)
    }
}

impl From<TeacherId> for PersonId {
    fn from(id: TeacherId) -> Self {
        PersonId::Teacher(id)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TeacherId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw())
    }
}

// ============================================================================
// ROLE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Student,
    Teacher,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// PERSON CAPABILITY
// ============================================================================

/// Capabilities shared by every person record
pub trait Person {
    fn raw_id(&self) -> u64;
    fn name(&self) -> &str;
    fn email(&self) -> &str;
    fn role(&self) -> Role;

    /// One-line summary: `[Role] ID=<id>, Name=<name>, Email=<email>`
    fn summary(&self) -> String {
        format!(
            "[{}] ID={}, Name={}, Email={}",
            self.role(),
            self.raw_id(),
            self.name(),
            self.email()
        )
    }
}

/// Borrowed view of either kind of person, for callers holding a bare number
#[derive(Debug, Clone, Copy)]
pub enum PersonRef<'a> {
    Student(&'a Student),
    Teacher(&'a Teacher),
}

impl<'a> PersonRef<'a> {
    pub fn id(&self) -> PersonId {
        match self {
            PersonRef::Student(s) => s.id().into(),
            PersonRef::Teacher(t) => t.id().into(),
        }
    }

    pub fn as_person(&self) -> &'a dyn Person {
        match *self {
            PersonRef::Student(s) => s,
            PersonRef::Teacher(t) => t,
        }
    }
}

impl fmt::Display for PersonRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.as_person().summary())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_names() {
        assert_eq!(Role::Student.as_str(), "Student");
        assert_eq!(Role::Teacher.to_string(), "Teacher");
    }

    #[test]
    fn test_person_id_from_typed_ids() {
        let s: PersonId = StudentId(1001).into();
        let t: PersonId = TeacherId(1002).into();

        assert_eq!(s.raw(), 1001);
        assert_eq!(s.role(), Role::Student);
        assert_eq!(t.raw(), 1002);
        assert_eq!(t.role(), Role::Teacher);
        assert_eq!(t.to_string(), "1002");
    }

    #[test]
    fn test_person_ref_summary() {
        let student = Student::new(StudentId(1001), "Jane Doe", "jane@x.edu");
        let teacher = Teacher::new(TeacherId(1002), "A. Smith", "a@x.edu", "Physics");

        assert_eq!(
            PersonRef::Student(&student).to_string(),
            "[Student] ID=1001, Name=Jane Doe, Email=jane@x.edu"
        );
        assert_eq!(
            PersonRef::Teacher(&teacher).to_string(),
            "[Teacher] ID=1002, Name=A. Smith, Email=a@x.edu, Department=Physics"
        );
        assert_eq!(PersonRef::Teacher(&teacher).id(), PersonId::Teacher(TeacherId(1002)));
    }
}
