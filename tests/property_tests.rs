//! Property-based tests for record invariants
//!
//! - Identity: ids strictly increase across students and teachers
//! - Attendance: one entry per date, last write wins
//! - Marks: accepted exactly when inside 0..=max
//! - Payments: accepted exactly when positive

use campus_records::{
    Directory, ExaminationDetail, NewStudent, NewTeacher, Person, RecordError, StudentId,
};
use chrono::NaiveDate;
use proptest::prelude::*;
use std::collections::HashMap;

/// Strategy for dates within a school year
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (1u32..=12, 1u32..=28).prop_map(|(m, d)| NaiveDate::from_ymd_opt(2024, m, d).unwrap())
}

proptest! {
    #[test]
    fn prop_ids_strictly_increasing(roles in prop::collection::vec(any::<bool>(), 1..50)) {
        let mut dir = Directory::default();
        let mut ids = Vec::new();

        for (i, is_student) in roles.iter().enumerate() {
            let id = if *is_student {
                dir.register_student(NewStudent::new(format!("Student {}", i))).raw_id()
            } else {
                dir.register_teacher(NewTeacher::new(format!("Teacher {}", i), "t@x.edu", "Dept")).raw_id()
            };
            ids.push(id);
        }

        prop_assert_eq!(ids[0], 1001);
        for pair in ids.windows(2) {
            prop_assert_eq!(pair[1], pair[0] + 1);
        }
    }

    #[test]
    fn prop_attendance_last_write_wins(marks in prop::collection::vec((date_strategy(), any::<bool>()), 1..40)) {
        let mut dir = Directory::default();
        let s = dir.register_student(NewStudent::new("Jane Doe"));

        let mut expected: HashMap<NaiveDate, bool> = HashMap::new();
        for (date, present) in &marks {
            prop_assert!(dir.mark_attendance(s.id(), Some(*date), *present));
            expected.insert(*date, *present);
        }

        let ledger = dir.view_attendance(s.id()).unwrap();
        prop_assert_eq!(ledger.len(), expected.len());
        for (date, present) in &expected {
            prop_assert_eq!(ledger.get(*date), Some(*present));
        }
    }

    #[test]
    fn prop_marks_accepted_iff_in_range(max in 0u32..500, marks in -100i32..700) {
        let mut dir = Directory::default();
        let s = dir.register_student(NewStudent::new("Jane Doe"));
        dir.add_exam(ExaminationDetail::new("Math", NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), max));

        let result = dir.enter_marks(s.id(), "Math", marks);
        let in_range = marks >= 0 && (marks as u32) <= max;

        if in_range {
            prop_assert!(result.is_ok());
            prop_assert_eq!(dir.view_marks(s.id()).unwrap().get("Math"), Some(marks));
        } else {
            prop_assert_eq!(result, Err(RecordError::MarksOutOfRange { marks, max }));
            prop_assert!(dir.view_marks(s.id()).unwrap().is_empty());
        }
    }

    #[test]
    fn prop_payments_accepted_iff_positive(amounts in prop::collection::vec(-1000.0f64..1000.0, 0..30)) {
        let mut dir = Directory::default();
        let s = dir.register_student(NewStudent::new("Jane Doe"));

        let mut accepted = 0;
        for amount in &amounts {
            match dir.register_payment(s.id(), *amount) {
                Ok(p) => {
                    prop_assert!(*amount > 0.0);
                    prop_assert_eq!(p.amount(), *amount);
                    accepted += 1;
                }
                Err(e) => {
                    prop_assert!(*amount <= 0.0);
                    prop_assert!(matches!(e, RecordError::InvalidArgument(_)), "unexpected error: {}", e);
                }
            }
        }

        prop_assert_eq!(dir.view_payments(s.id()).unwrap().len(), accepted);
    }

    #[test]
    fn prop_unknown_student_never_mutates(raw in 0u64..1000) {
        let mut dir = Directory::default();
        dir.register_student(NewStudent::new("Jane Doe"));
        let before = dir.snapshot();

        // Seed is 1000, so nothing below 1001 is registered
        prop_assert!(dir.find_student(StudentId(raw)).is_none());
        prop_assert!(!dir.mark_attendance(StudentId(raw), None, true));
        prop_assert!(dir.register_payment(StudentId(raw), 10.0).is_err());
        prop_assert_eq!(dir.snapshot(), before);
    }
}
