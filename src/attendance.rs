// 📅 Attendance Ledger
//
// One entry per calendar date. Marking a date again overwrites the
// earlier flag in place, so a date never appears twice.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// LEDGER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceEntry {
    pub date: NaiveDate,
    pub present: bool,
}

/// Date → present mapping, in order of first marking
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceLedger {
    entries: Vec<AttendanceEntry>,
}

impl AttendanceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record presence for a date (last write wins)
    pub fn mark(&mut self, date: NaiveDate, present: bool) {
        match self.entries.iter_mut().find(|e| e.date == date) {
            Some(entry) => entry.present = present,
            None => self.entries.push(AttendanceEntry { date, present }),
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<bool> {
        self.entries
            .iter()
            .find(|e| e.date == date)
            .map(|e| e.present)
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttendanceEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn present_days(&self) -> usize {
        self.entries.iter().filter(|e| e.present).count()
    }

    pub fn absent_days(&self) -> usize {
        self.len() - self.present_days()
    }
}

/// Renders as `{2024-05-01=true, 2024-05-02=false}`
impl fmt::Display for AttendanceLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, entry) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", entry.date, entry.present)?;
        }
        f.write_str("}")
    }
}

// ============================================================================
// CAPABILITY
// ============================================================================

/// Anything that keeps an attendance ledger (students and teachers)
pub trait HasAttendance {
    fn attendance(&self) -> &AttendanceLedger;
    fn attendance_mut(&mut self) -> &mut AttendanceLedger;

    /// Mark presence; `None` means today
    fn mark_attendance(&mut self, date: Option<NaiveDate>, present: bool) {
        let date = date.unwrap_or_else(crate::today);
        tracing::debug!(%date, present, "marking attendance");
        self.attendance_mut().mark(date, present);
    }

    /// Copy of the full ledger
    fn view_attendance(&self) -> AttendanceLedger {
        self.attendance().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Student, StudentId, Teacher, TeacherId};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_mark_same_date_twice_keeps_one_entry() {
        let mut ledger = AttendanceLedger::new();
        ledger.mark(date(2024, 5, 1), true);
        ledger.mark(date(2024, 5, 1), false);

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(date(2024, 5, 1)), Some(false));
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut ledger = AttendanceLedger::new();
        ledger.mark(date(2024, 5, 1), true);
        ledger.mark(date(2024, 5, 2), true);
        ledger.mark(date(2024, 5, 1), false);

        let dates: Vec<NaiveDate> = ledger.iter().map(|e| e.date).collect();
        assert_eq!(dates, vec![date(2024, 5, 1), date(2024, 5, 2)]);
        assert_eq!(ledger.present_days(), 1);
        assert_eq!(ledger.absent_days(), 1);
    }

    #[test]
    fn test_display() {
        let mut ledger = AttendanceLedger::new();
        assert_eq!(ledger.to_string(), "{}");

        ledger.mark(date(2024, 5, 1), true);
        ledger.mark(date(2024, 5, 2), false);
        assert_eq!(ledger.to_string(), "{2024-05-01=true, 2024-05-02=false}");
    }

    #[test]
    fn test_mark_defaults_to_today() {
        let mut teacher = Teacher::new(TeacherId(1001), "A. Smith", "a@x.edu", "Physics");
        teacher.mark_attendance(None, true);

        assert_eq!(teacher.attendance().get(crate::today()), Some(true));
    }

    #[test]
    fn test_view_is_a_copy() {
        let mut student = Student::new(StudentId(1001), "Jane Doe", "jane@x.edu");
        student.mark_attendance(Some(date(2024, 5, 1)), true);

        let mut view = student.view_attendance();
        view.mark(date(2024, 5, 2), true);

        assert_eq!(student.attendance().len(), 1);
        assert_eq!(view.len(), 2);
    }

    #[test]
    fn test_works_through_trait_object() {
        let mut student = Student::new(StudentId(1001), "Jane Doe", "jane@x.edu");
        let mut teacher = Teacher::new(TeacherId(1002), "A. Smith", "a@x.edu", "Physics");

        let people: Vec<&mut dyn HasAttendance> = vec![&mut student, &mut teacher];
        for person in people {
            person.mark_attendance(Some(date(2024, 5, 1)), true);
        }

        assert_eq!(student.attendance().get(date(2024, 5, 1)), Some(true));
        assert_eq!(teacher.attendance().get(date(2024, 5, 1)), Some(true));
    }
}
