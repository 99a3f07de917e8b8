// 🖥️ Console - numbered menu over a Directory
//
// Reads from any BufRead and writes to any Write, so the same loop runs
// on stdin/stdout and on scripted input in tests. Bad input prints
// "Error: ..." and the loop carries on. End of input exits.

use crate::directory::{Directory, NewStudent, NewTeacher, StudentUpdate, TeacherUpdate};
use crate::entities::{StudentId, TeacherId};
use crate::exams::ExaminationDetail;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use std::io::{BufRead, Write};

/// Interactive viewer the console can hand the directory to (menu option 17)
pub trait RecordBrowser {
    fn browse(&mut self, directory: &Directory) -> Result<()>;
}

/// Raised when input runs out in the middle of a prompt
#[derive(Debug, thiserror::Error)]
#[error("end of input")]
struct EndOfInput;

/// Parse an ISO `YYYY-MM-DD` date
pub fn parse_date(text: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (expected yyyy-mm-dd)", text.trim()))
}

pub struct Console<'a, R, W> {
    directory: &'a mut Directory,
    input: R,
    output: W,
    browser: Option<Box<dyn RecordBrowser + 'a>>,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(directory: &'a mut Directory, input: R, output: W) -> Self {
        Console {
            directory,
            input,
            output,
            browser: None,
        }
    }

    /// Enable the "Browse Records" menu entry
    pub fn with_browser(mut self, browser: Box<dyn RecordBrowser + 'a>) -> Self {
        self.browser = Some(browser);
        self
    }

    /// Run the menu until `0` or end of input
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;

            let Some(line) = self.read_line()? else {
                writeln!(self.output, "\nExiting...")?;
                return Ok(());
            };

            let outcome = match line.trim().parse::<u32>() {
                Ok(0) => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                Ok(1) => self.register_student(),
                Ok(2) => self.register_teacher(),
                Ok(3) => self.update_student(),
                Ok(4) => self.update_teacher(),
                Ok(5) => self.add_exam(),
                Ok(6) => self.view_exams(),
                Ok(7) => self.enter_marks(),
                Ok(8) => self.view_marks(),
                Ok(9) => self.mark_attendance(),
                Ok(10) => self.view_attendance(),
                Ok(11) => self.register_fee(),
                Ok(12) => self.view_payments(),
                Ok(13) => self.list_students(),
                Ok(14) => self.list_teachers(),
                Ok(15) => self.person_card(),
                Ok(16) => self.export_json(),
                Ok(17) if self.browser.is_some() => self.browse(),
                _ => {
                    tracing::debug!(input = line.trim(), "unknown menu choice");
                    writeln!(self.output, "Invalid choice!").map_err(anyhow::Error::from)
                }
            };

            if let Err(err) = outcome {
                if err.is::<EndOfInput>() {
                    writeln!(self.output, "\nExiting...")?;
                    return Ok(());
                }
                writeln!(self.output, "Error: {:#}", err)?;
            }
        }
    }

    fn print_menu(&mut self) -> Result<()> {
        let out = &mut self.output;
        writeln!(out, "\n=== {} ===", self.directory.name().to_uppercase())?;
        writeln!(out, "1. Register Student")?;
        writeln!(out, "2. Register Teacher")?;
        writeln!(out, "3. Update Student")?;
        writeln!(out, "4. Update Teacher")?;
        writeln!(out, "5. Add Exam")?;
        writeln!(out, "6. View Exams")?;
        writeln!(out, "7. Enter Marks")?;
        writeln!(out, "8. View Student Marks")?;
        writeln!(out, "9. Mark Attendance")?;
        writeln!(out, "10. View Attendance")?;
        writeln!(out, "11. Register Fee Payment")?;
        writeln!(out, "12. View Payments")?;
        writeln!(out, "13. List Students")?;
        writeln!(out, "14. List Teachers")?;
        writeln!(out, "15. Person Card")?;
        writeln!(out, "16. Export Records (JSON)")?;
        if self.browser.is_some() {
            writeln!(out, "17. Browse Records")?;
        }
        writeln!(out, "0. Exit")?;
        write!(out, "Enter choice: ")?;
        out.flush()?;
        Ok(())
    }

    // ========================================================================
    // INPUT
    // ========================================================================

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }

    /// Answer exactly as typed, surrounding spaces included
    fn prompt(&mut self, label: &str) -> Result<String> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;
        match self.read_line()? {
            Some(line) => Ok(line),
            None => Err(EndOfInput.into()),
        }
    }

    /// Blank answer means "not supplied"
    fn prompt_optional(&mut self, label: &str) -> Result<Option<String>> {
        let answer = self.prompt(label)?;
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            None
        } else {
            Some(answer.to_string())
        })
    }

    fn prompt_id(&mut self, label: &str) -> Result<u64> {
        let answer = self.prompt(label)?;
        answer
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid ID: '{}'", answer.trim()))
    }

    fn prompt_int(&mut self, label: &str) -> Result<i32> {
        let answer = self.prompt(label)?;
        answer
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid number: '{}'", answer.trim()))
    }

    fn prompt_amount(&mut self, label: &str) -> Result<f64> {
        let answer = self.prompt(label)?;
        answer
            .trim()
            .parse()
            .map_err(|_| anyhow!("Invalid amount: '{}'", answer.trim()))
    }

    // ========================================================================
    // ACTIONS
    // ========================================================================

    fn register_student(&mut self) -> Result<()> {
        let name = self.prompt("Enter student name: ")?;
        let email = self.prompt_optional("Enter student email (or leave blank): ")?;

        let request = NewStudent { name, email };
        let student = self.directory.register_student(request);
        writeln!(self.output, "Registered: {}", student)?;
        Ok(())
    }

    fn register_teacher(&mut self) -> Result<()> {
        let name = self.prompt("Enter teacher name: ")?;
        let email = self.prompt("Enter teacher email: ")?;
        let department = self.prompt("Enter department: ")?;

        let teacher = self
            .directory
            .register_teacher(NewTeacher::new(name, email, department));
        writeln!(self.output, "Registered: {}", teacher)?;
        Ok(())
    }

    fn update_student(&mut self) -> Result<()> {
        let id = self.prompt_id("Enter student ID: ")?;
        let name = self.prompt("Enter new name: ")?;
        let email = self.prompt_optional("Enter new email (or leave blank): ")?;

        let ok = self
            .directory
            .update_student(StudentId(id), StudentUpdate { name, email });
        writeln!(self.output, "{}", if ok { "Updated." } else { "Student not found." })?;
        Ok(())
    }

    fn update_teacher(&mut self) -> Result<()> {
        let id = self.prompt_id("Enter teacher ID: ")?;
        let name = self.prompt("Enter new name: ")?;
        let email = self.prompt_optional("Enter new email (or leave blank): ")?;
        let department = self.prompt_optional("Enter new department (or leave blank): ")?;

        let update = TeacherUpdate {
            name,
            email,
            department,
        };
        let ok = self.directory.update_teacher(TeacherId(id), update);
        writeln!(self.output, "{}", if ok { "Updated." } else { "Teacher not found." })?;
        Ok(())
    }

    fn add_exam(&mut self) -> Result<()> {
        let subject = self.prompt("Enter subject: ")?;
        let date = parse_date(&self.prompt("Enter exam date (yyyy-mm-dd): ")?)?;
        let answer = self.prompt("Enter max marks: ")?;
        let answer = answer.trim();
        let max_marks: u32 = answer
            .parse()
            .map_err(|_| anyhow!("Invalid max marks: '{}' (expected a whole number >= 0)", answer))?;

        self.directory
            .add_exam(ExaminationDetail::new(subject, date, max_marks));
        writeln!(self.output, "Exam added.")?;
        Ok(())
    }

    fn view_exams(&mut self) -> Result<()> {
        let schedule = self.directory.view_exam_schedule();
        if schedule.is_empty() {
            writeln!(self.output, "No exams scheduled.")?;
        }
        for exam in schedule {
            writeln!(self.output, "{}", exam)?;
        }
        Ok(())
    }

    fn enter_marks(&mut self) -> Result<()> {
        let id = StudentId(self.prompt_id("Enter student ID: ")?);
        if self.directory.find_student(id).is_none() {
            writeln!(self.output, "Student not found.")?;
            return Ok(());
        }
        let subject = self.prompt("Enter subject: ")?;
        let marks = self.prompt_int("Enter marks: ")?;

        self.directory.enter_marks(id, &subject, marks)?;
        writeln!(self.output, "Marks entered.")?;
        Ok(())
    }

    fn view_marks(&mut self) -> Result<()> {
        let id = StudentId(self.prompt_id("Enter student ID: ")?);
        match self.directory.view_marks(id) {
            Some(marks) => writeln!(self.output, "Marks: {}", marks)?,
            None => writeln!(self.output, "Student not found.")?,
        }
        Ok(())
    }

    fn mark_attendance(&mut self) -> Result<()> {
        let raw = self.prompt_id("Enter ID: ")?;
        let Some(person) = self.directory.resolve(raw) else {
            writeln!(self.output, "Person not found.")?;
            return Ok(());
        };
        let date = match self.prompt_optional("Enter date (yyyy-mm-dd or blank for today): ")? {
            Some(text) => Some(parse_date(&text)?),
            None => None,
        };
        let present = self.prompt("Present? (y/n): ")?.trim().eq_ignore_ascii_case("y");

        self.directory.mark_attendance(person, date, present);
        writeln!(self.output, "Attendance marked.")?;
        Ok(())
    }

    fn view_attendance(&mut self) -> Result<()> {
        let raw = self.prompt_id("Enter ID: ")?;
        match self
            .directory
            .resolve(raw)
            .and_then(|person| self.directory.view_attendance(person))
        {
            Some(ledger) => writeln!(self.output, "Attendance: {}", ledger)?,
            None => writeln!(self.output, "Person not found.")?,
        }
        Ok(())
    }

    fn register_fee(&mut self) -> Result<()> {
        let id = StudentId(self.prompt_id("Enter student ID: ")?);
        if self.directory.find_student(id).is_none() {
            writeln!(self.output, "Student not found.")?;
            return Ok(());
        }
        let amount = self.prompt_amount("Enter amount: ")?;

        self.directory.register_payment(id, amount)?;
        writeln!(self.output, "Payment registered.")?;
        Ok(())
    }

    fn view_payments(&mut self) -> Result<()> {
        let id = StudentId(self.prompt_id("Enter student ID: ")?);
        match self.directory.view_payments(id) {
            Some(payments) => writeln!(self.output, "Payments: {}", payments)?,
            None => writeln!(self.output, "Student not found.")?,
        }
        Ok(())
    }

    fn list_students(&mut self) -> Result<()> {
        for student in self.directory.list_students() {
            writeln!(self.output, "{}", student)?;
        }
        Ok(())
    }

    fn list_teachers(&mut self) -> Result<()> {
        for teacher in self.directory.list_teachers() {
            writeln!(self.output, "{}", teacher)?;
        }
        Ok(())
    }

    fn person_card(&mut self) -> Result<()> {
        let raw = self.prompt_id("Enter ID: ")?;
        match self.directory.person_card(raw) {
            Some(card) => writeln!(self.output, "{}", card)?,
            None => writeln!(self.output, "Person not found.")?,
        }
        Ok(())
    }

    fn export_json(&mut self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.directory.snapshot())
            .context("Failed to serialize records")?;
        writeln!(self.output, "{}", json)?;
        Ok(())
    }

    fn browse(&mut self) -> Result<()> {
        if let Some(browser) = self.browser.as_mut() {
            browser.browse(&*self.directory)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_script(dir: &mut Directory, script: &str) -> String {
        let mut out = Vec::new();
        Console::new(dir, script.as_bytes(), &mut out).run().unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2024-05-01").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert!(parse_date("01/05/2024").is_err());
        assert!(parse_date("2024-02-30").is_err());
    }

    #[test]
    fn test_exit_and_eof() {
        let mut dir = Directory::default();
        assert!(run_script(&mut dir, "0\n").ends_with("Exiting...\n"));
        assert!(run_script(&mut dir, "").ends_with("Exiting...\n"));
    }

    #[test]
    fn test_invalid_choice_continues() {
        let mut dir = Directory::default();
        let out = run_script(&mut dir, "99\nabc\n0\n");
        assert_eq!(out.matches("Invalid choice!").count(), 2);
    }

    #[test]
    fn test_browse_hidden_without_browser() {
        let mut dir = Directory::default();
        let out = run_script(&mut dir, "17\n0\n");
        assert!(!out.contains("Browse Records"));
        assert!(out.contains("Invalid choice!"));
    }

    struct CountingBrowser<'c> {
        calls: &'c mut usize,
    }

    impl RecordBrowser for CountingBrowser<'_> {
        fn browse(&mut self, directory: &Directory) -> Result<()> {
            assert_eq!(directory.list_students().len(), 1);
            *self.calls += 1;
            Ok(())
        }
    }

    #[test]
    fn test_browse_hands_directory_to_browser() {
        let mut dir = Directory::default();
        let mut calls = 0;
        let mut out = Vec::new();
        {
            let browser = CountingBrowser { calls: &mut calls };
            Console::new(&mut dir, "1\nJane Doe\n\n17\n0\n".as_bytes(), &mut out)
                .with_browser(Box::new(browser))
                .run()
                .unwrap();
        }
        assert_eq!(calls, 1);
        assert!(String::from_utf8(out).unwrap().contains("17. Browse Records"));
    }

    #[test]
    fn test_names_keep_surrounding_spaces() {
        use crate::attendance::HasAttendance;
        use crate::entities::Person;

        let mut dir = Directory::default();
        // Padded numbers, dates and answers still parse
        let script = "1\n Bo \n   \n9\n 1001 \n 2024-05-01 \n y \n0\n";
        let out = run_script(&mut dir, script);
        assert!(!out.contains("Error"));

        let student = dir.find_student(StudentId(1001)).unwrap();
        assert_eq!(student.name(), " Bo ");
        assert_eq!(student.email(), ".bo.@student.univ.edu");

        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(student.attendance().get(date), Some(true));
    }

    #[test]
    fn test_eof_mid_prompt_exits_cleanly() {
        let mut dir = Directory::default();
        let out = run_script(&mut dir, "2\nA. Smith\n");
        assert!(out.ends_with("Exiting...\n"));
        assert!(dir.list_teachers().is_empty());
    }
}
