// 🏛️ Directory - the institution's record book
//
// Owns every person record, the identity sequence and the exam catalog.
// Lookups that find nothing return None/false; validation failures
// return RecordError and leave the records untouched.

use crate::attendance::{AttendanceLedger, HasAttendance};
use crate::config::Config;
use crate::entities::{Person, PersonId, PersonRef, Student, StudentId, Teacher, TeacherId};
use crate::error::{RecordError, Result};
use crate::exams::{ExamCatalog, ExaminationDetail, HasMarks, MarksLedger};
use crate::fees::{HasPayments, Payment, PaymentLedger};
use crate::identity::IdAllocator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// REQUESTS
// ============================================================================

/// Registration request for a student; `email: None` derives one from the name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewStudent {
    pub name: String,
    pub email: Option<String>,
}

impl NewStudent {
    pub fn new(name: impl Into<String>) -> Self {
        NewStudent {
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTeacher {
    pub name: String,
    pub email: String,
    pub department: String,
}

impl NewTeacher {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        department: impl Into<String>,
    ) -> Self {
        NewTeacher {
            name: name.into(),
            email: email.into(),
            department: department.into(),
        }
    }
}

/// Student update. The name is always replaced; `None` leaves the email as is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentUpdate {
    pub name: String,
    pub email: Option<String>,
}

impl StudentUpdate {
    pub fn new(name: impl Into<String>) -> Self {
        StudentUpdate {
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Teacher update. Email and department apply independently of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeacherUpdate {
    pub name: String,
    pub email: Option<String>,
    pub department: Option<String>,
}

impl TeacherUpdate {
    pub fn new(name: impl Into<String>) -> Self {
        TeacherUpdate {
            name: name.into(),
            email: None,
            department: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }
}

/// Serializable copy of everything in a directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorySnapshot {
    pub institution: String,
    pub students: Vec<Student>,
    pub teachers: Vec<Teacher>,
    pub exams: Vec<ExaminationDetail>,
}

/// `"Jane  Doe"` → `"jane.doe@<domain>"`
///
/// Every ASCII whitespace run becomes a single `.`, including leading and
/// trailing runs. Other spaces (NBSP and friends) are kept as they are.
pub fn default_student_email(name: &str, domain: &str) -> String {
    let mut local = String::with_capacity(name.len());
    let mut in_space = false;

    for c in name.to_lowercase().chars() {
        if c.is_ascii_whitespace() {
            if !in_space {
                local.push('.');
            }
            in_space = true;
        } else {
            local.push(c);
            in_space = false;
        }
    }

    format!("{}@{}", local, domain)
}

// ============================================================================
// DIRECTORY
// ============================================================================

#[derive(Debug, Clone)]
pub struct Directory {
    name: String,
    email_domain: String,
    ids: IdAllocator,
    // Ids only grow, so key order is registration order
    students: BTreeMap<StudentId, Student>,
    teachers: BTreeMap<TeacherId, Teacher>,
    exams: ExamCatalog,
}

impl Directory {
    pub fn new(config: Config) -> Self {
        Directory {
            name: config.institution_name,
            email_domain: config.student_email_domain,
            ids: IdAllocator::new(config.id_seed),
            students: BTreeMap::new(),
            teachers: BTreeMap::new(),
            exams: ExamCatalog::new(),
        }
    }

    /// Institution name
    pub fn name(&self) -> &str {
        &self.name
    }

    // ------------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------------

    pub fn register_student(&mut self, request: NewStudent) -> Student {
        let email = request
            .email
            .unwrap_or_else(|| default_student_email(&request.name, &self.email_domain));
        let id = StudentId(self.ids.next());
        let student = Student::new(id, request.name, email);

        tracing::debug!(%id, name = student.name(), "student registered");
        self.students.insert(id, student.clone());
        student
    }

    pub fn register_teacher(&mut self, request: NewTeacher) -> Teacher {
        let id = TeacherId(self.ids.next());
        let teacher = Teacher::new(id, request.name, request.email, request.department);

        tracing::debug!(%id, name = teacher.name(), "teacher registered");
        self.teachers.insert(id, teacher.clone());
        teacher
    }

    // ------------------------------------------------------------------------
    // Updates
    // ------------------------------------------------------------------------

    /// Apply an update; false if no such student
    pub fn update_student(&mut self, id: StudentId, update: StudentUpdate) -> bool {
        let Some(student) = self.students.get_mut(&id) else {
            tracing::debug!(%id, "update skipped: unknown student");
            return false;
        };

        student.set_name(update.name);
        if let Some(email) = update.email {
            student.set_email(email);
        }
        tracing::debug!(%id, "student updated");
        true
    }

    /// Apply an update; false if no such teacher
    pub fn update_teacher(&mut self, id: TeacherId, update: TeacherUpdate) -> bool {
        let Some(teacher) = self.teachers.get_mut(&id) else {
            tracing::debug!(%id, "update skipped: unknown teacher");
            return false;
        };

        teacher.set_name(update.name);
        if let Some(email) = update.email {
            teacher.set_email(email);
        }
        if let Some(department) = update.department {
            teacher.set_department(department);
        }
        tracing::debug!(%id, "teacher updated");
        true
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    pub fn find_student(&self, id: StudentId) -> Option<&Student> {
        self.students.get(&id)
    }

    pub fn find_teacher(&self, id: TeacherId) -> Option<&Teacher> {
        self.teachers.get(&id)
    }

    /// Resolve a bare number to whichever kind of person holds it
    pub fn resolve(&self, raw: u64) -> Option<PersonId> {
        self.find_person(raw).map(|p| p.id())
    }

    /// Students are checked first, then teachers
    pub fn find_person(&self, raw: u64) -> Option<PersonRef<'_>> {
        self.students
            .get(&StudentId(raw))
            .map(PersonRef::Student)
            .or_else(|| self.teachers.get(&TeacherId(raw)).map(PersonRef::Teacher))
    }

    /// Students in registration order
    pub fn list_students(&self) -> Vec<Student> {
        self.students.values().cloned().collect()
    }

    /// Teachers in registration order
    pub fn list_teachers(&self) -> Vec<Teacher> {
        self.teachers.values().cloned().collect()
    }

    /// Banner, summary line and (for teachers) a department line
    pub fn person_card(&self, raw: u64) -> Option<String> {
        let person = self.find_person(raw)?;
        let mut card = String::from("---- Person Card ----\n");
        card.push_str(&person.to_string());
        card.push('\n');
        if let PersonRef::Teacher(teacher) = person {
            card.push_str(&format!("Department: {}\n", teacher.department()));
        }
        card.push_str("---------------------");
        Some(card)
    }

    pub fn snapshot(&self) -> DirectorySnapshot {
        DirectorySnapshot {
            institution: self.name.clone(),
            students: self.list_students(),
            teachers: self.list_teachers(),
            exams: self.exams.schedule().to_vec(),
        }
    }

    // ------------------------------------------------------------------------
    // Attendance
    // ------------------------------------------------------------------------

    fn attendee_mut(&mut self, id: PersonId) -> Option<&mut dyn HasAttendance> {
        match id {
            PersonId::Student(id) => self
                .students
                .get_mut(&id)
                .map(|s| s as &mut dyn HasAttendance),
            PersonId::Teacher(id) => self
                .teachers
                .get_mut(&id)
                .map(|t| t as &mut dyn HasAttendance),
        }
    }

    /// Mark presence (`date: None` = today); false if no such person
    pub fn mark_attendance(
        &mut self,
        id: impl Into<PersonId>,
        date: Option<NaiveDate>,
        present: bool,
    ) -> bool {
        match self.attendee_mut(id.into()) {
            Some(person) => {
                person.mark_attendance(date, present);
                true
            }
            None => false,
        }
    }

    pub fn view_attendance(&self, id: impl Into<PersonId>) -> Option<AttendanceLedger> {
        match id.into() {
            PersonId::Student(id) => self.students.get(&id).map(|s| s.view_attendance()),
            PersonId::Teacher(id) => self.teachers.get(&id).map(|t| t.view_attendance()),
        }
    }

    // ------------------------------------------------------------------------
    // Exams
    // ------------------------------------------------------------------------

    pub fn add_exam(&mut self, exam: ExaminationDetail) {
        self.exams.add_exam(exam);
    }

    pub fn view_exam_schedule(&self) -> &[ExaminationDetail] {
        self.exams.schedule()
    }

    /// Record marks for a student against the exam catalog
    ///
    /// Only students carry marks; a teacher's id does not type-check here:
    ///
    /// ```compile_fail
    /// use campus_records::{Directory, NewTeacher};
    ///
    /// let mut dir = Directory::default();
    /// let teacher = dir.register_teacher(NewTeacher::new("A. Smith", "a@x.edu", "Physics"));
    /// dir.enter_marks(teacher.id(), "Physics", 10).unwrap();
    /// ```
    pub fn enter_marks(&mut self, id: StudentId, subject: &str, marks: i32) -> Result<()> {
        let student = self
            .students
            .get_mut(&id)
            .ok_or(RecordError::StudentNotFound(id))?;
        self.exams.enter_marks(student, subject, marks)
    }

    pub fn view_marks(&self, id: StudentId) -> Option<MarksLedger> {
        self.students.get(&id).map(|s| s.view_marks())
    }

    // ------------------------------------------------------------------------
    // Fees
    // ------------------------------------------------------------------------

    /// Record a payment dated today
    pub fn register_payment(&mut self, id: StudentId, amount: f64) -> Result<Payment> {
        let student = self
            .students
            .get_mut(&id)
            .ok_or(RecordError::StudentNotFound(id))?;
        student.register_payment(amount)
    }

    pub fn view_payments(&self, id: StudentId) -> Option<PaymentLedger> {
        self.students.get(&id).map(|s| s.view_payments())
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
