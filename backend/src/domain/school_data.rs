//! In-memory snapshot of everything the reports read.
//!
//! Reports are computed over a [`SchoolData`] value rather than straight from
//! disk, so a whole dashboard is built from one consistent load.

use anyhow::{Context, Result};
use log::info;

use crate::domain::models::{
    ActivityRecord, AttendanceRecord, ExpenseRecord, MemorizationRecord, Student,
};
use crate::domain::record_filter::StudentDirectory;
use crate::storage::csv::{CsvConnection, RecordRepository, StudentRepository};
use crate::storage::traits::{RecordStorage, StudentStorage};

#[derive(Debug, Clone, Default)]
pub struct SchoolData {
    pub students: Vec<Student>,
    pub attendance: Vec<AttendanceRecord>,
    pub memorization: Vec<MemorizationRecord>,
    pub activities: Vec<ActivityRecord>,
    pub expenses: Vec<ExpenseRecord>,
}

impl SchoolData {
    /// Read every data file. Missing files load as empty collections.
    pub fn load(connection: &CsvConnection) -> Result<Self> {
        let data = Self {
            students: StudentRepository::new(connection.clone())
                .list_students()
                .context("Failed to load students")?,
            attendance: RecordRepository::<AttendanceRecord>::new(connection.clone())
                .list_records()
                .context("Failed to load attendance")?,
            memorization: RecordRepository::<MemorizationRecord>::new(connection.clone())
                .list_records()
                .context("Failed to load memorization")?,
            activities: RecordRepository::<ActivityRecord>::new(connection.clone())
                .list_records()
                .context("Failed to load activities")?,
            expenses: RecordRepository::<ExpenseRecord>::new(connection.clone())
                .list_records()
                .context("Failed to load expenses")?,
        };

        info!(
            "Loaded school data from {}: {} students, {} attendance, {} memorization, {} activity, {} expense records",
            connection.base_directory().display(),
            data.students.len(),
            data.attendance.len(),
            data.memorization.len(),
            data.activities.len(),
            data.expenses.len()
        );
        Ok(data)
    }

    /// Write every data file, replacing what is on disk
    pub fn save(&self, connection: &CsvConnection) -> Result<()> {
        StudentRepository::new(connection.clone()).replace_students(&self.students)?;
        RecordRepository::<AttendanceRecord>::new(connection.clone()).replace_records(&self.attendance)?;
        RecordRepository::<MemorizationRecord>::new(connection.clone()).replace_records(&self.memorization)?;
        RecordRepository::<ActivityRecord>::new(connection.clone()).replace_records(&self.activities)?;
        RecordRepository::<ExpenseRecord>::new(connection.clone()).replace_records(&self.expenses)?;

        info!("Saved school data to {}", connection.base_directory().display());
        Ok(())
    }

    pub fn directory(&self) -> StudentDirectory {
        StudentDirectory::new(&self.students)
    }

    pub fn student(&self, student_id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == student_id)
    }

    pub fn add_student(&mut self, student: Student) {
        self.students.push(student);
        self.students.sort_by(|a, b| a.name.cmp(&b.name));
    }

    pub fn add_attendance(&mut self, record: AttendanceRecord) {
        self.attendance.push(record);
    }

    pub fn add_memorization(&mut self, record: MemorizationRecord) {
        self.memorization.push(record);
    }

    pub fn add_activity(&mut self, record: ActivityRecord) {
        self.activities.push(record);
    }

    pub fn add_expense(&mut self, record: ExpenseRecord) {
        self.expenses.push(record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::{test_student, TestEnvironment, TestHelper};
    use shared::AttendanceStatus;
    use std::collections::BTreeMap;

    fn sample() -> SchoolData {
        let mut data = SchoolData::default();
        data.add_student(test_student("Zaid", "8B", "Tahsin"));
        data.add_student(test_student("Ahmad", "7A", "Tahfizh 2"));
        data.add_attendance(AttendanceRecord {
            student_id: "ahmad".to_string(),
            date: "10/07/2025".to_string(),
            status: Some(AttendanceStatus::Present),
            remarks: None,
        });
        data.add_memorization(MemorizationRecord {
            student_name: "Ahmad".to_string(),
            date: "2025-07-10".to_string(),
            pages_actual: 3.0,
            status: "lancar".to_string(),
            juz: None,
            surah: None,
        });
        data.add_activity(ActivityRecord {
            student_id: "ahmad".to_string(),
            date: "10/07/2025".to_string(),
            activities: BTreeMap::from([("tahajud".to_string(), true)]),
        });
        data.add_expense(ExpenseRecord {
            student_name: "Ahmad".to_string(),
            date: "10/07/2025".to_string(),
            amount: 5000.0,
            category: "jajan".to_string(),
            note: String::new(),
        });
        data
    }

    #[test]
    fn test_load_empty_directory() -> Result<()> {
        let env = TestEnvironment::new()?;
        let data = SchoolData::load(&env.connection)?;
        assert!(data.students.is_empty());
        assert!(data.expenses.is_empty());
        Ok(())
    }

    #[test]
    fn test_save_then_load() -> Result<()> {
        let env = TestEnvironment::new()?;
        let data = sample();
        data.save(&env.connection)?;

        let loaded = SchoolData::load(&env.connection)?;
        assert_eq!(loaded.students.len(), 2);
        assert_eq!(loaded.students[0].name, "Ahmad");
        assert_eq!(loaded.attendance, data.attendance);
        assert_eq!(loaded.memorization, data.memorization);
        assert_eq!(loaded.activities, data.activities);
        assert_eq!(loaded.expenses, data.expenses);
        Ok(())
    }

    #[test]
    fn test_add_keeps_duplicates() {
        let mut data = sample();
        let duplicate = data.expenses[0].clone();
        data.add_expense(duplicate);
        assert_eq!(data.expenses.len(), 2);
        assert_eq!(data.student("zaid").map(|s| s.name.as_str()), Some("Zaid"));
        assert!(data.student("nobody").is_none());
    }

    #[test]
    fn test_load_sees_records_appended_through_repositories() -> Result<()> {
        let helper = TestHelper::new()?;
        let expected = sample();
        helper.create_test_student_with_name("Zaid", "8B", "Tahsin")?;
        helper.create_test_student_with_name("Ahmad", "7A", "Tahfizh 2")?;
        for record in &expected.attendance {
            helper.attendance_repo.append_record(record)?;
        }
        for record in &expected.memorization {
            helper.memorization_repo.append_record(record)?;
        }
        for record in &expected.activities {
            helper.activity_repo.append_record(record)?;
        }
        for record in &expected.expenses {
            helper.expense_repo.append_record(record)?;
        }

        let loaded = SchoolData::load(&helper.env.connection)?;
        let names: Vec<&str> = loaded.students.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Ahmad", "Zaid"]);
        assert_eq!(loaded.attendance, expected.attendance);
        assert_eq!(loaded.memorization, expected.memorization);
        assert_eq!(loaded.activities, expected.activities);
        assert_eq!(loaded.expenses, expected.expenses);
        Ok(())
    }
}
