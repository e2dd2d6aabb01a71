//! Test utilities for automatic cleanup and consistent test infrastructure.
//!
//! Every environment owns a [`TempDir`], so the data directory is removed
//! even when a test panics.

use anyhow::Result;
use chrono::Utc;
use tempfile::TempDir;

use super::config_repository::ConfigRepository;
use super::connection::CsvConnection;
use super::record_repository::RecordRepository;
use super::student_repository::StudentRepository;
use crate::domain::models::{
    ActivityRecord, AttendanceRecord, ExpenseRecord, MemorizationRecord, Student,
};
use crate::storage::traits::StudentStorage;

/// Temporary data directory plus a connection to it
pub struct TestEnvironment {
    pub connection: CsvConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: std::path::PathBuf,
    _temp_dir: TempDir, // Keep alive to prevent cleanup
}

impl TestEnvironment {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let connection = CsvConnection::new(temp_dir.path())?;
        Ok(Self {
            connection,
            base_path: temp_dir.path().to_path_buf(),
            _temp_dir: temp_dir,
        })
    }
}

/// Repository instances over a fresh test environment
pub struct TestHelper {
    pub env: TestEnvironment,
    pub student_repo: StudentRepository,
    pub config_repo: ConfigRepository,
    pub attendance_repo: RecordRepository<AttendanceRecord>,
    pub memorization_repo: RecordRepository<MemorizationRecord>,
    pub activity_repo: RecordRepository<ActivityRecord>,
    pub expense_repo: RecordRepository<ExpenseRecord>,
}

impl TestHelper {
    pub fn new() -> Result<Self> {
        Self::from_env(TestEnvironment::new()?)
    }

    pub fn from_env(env: TestEnvironment) -> Result<Self> {
        let connection = env.connection.clone();
        Ok(Self {
            student_repo: StudentRepository::new(connection.clone()),
            config_repo: ConfigRepository::new(connection.clone()),
            attendance_repo: RecordRepository::new(connection.clone()),
            memorization_repo: RecordRepository::new(connection.clone()),
            activity_repo: RecordRepository::new(connection.clone()),
            expense_repo: RecordRepository::new(connection),
            env,
        })
    }

    /// Create a test student with default values
    pub fn create_test_student(&self) -> Result<Student> {
        self.create_test_student_with_name("Test Student", "7A", "Tahsin")
    }

    /// Create a test student; the id is derived from the name
    pub fn create_test_student_with_name(
        &self,
        name: &str,
        class_name: &str,
        level: &str,
    ) -> Result<Student> {
        let student = test_student(name, class_name, level);
        self.student_repo.store_student(&student)?;
        Ok(student)
    }
}

/// In-memory student whose id is the lowercased name with `_` for spaces
pub fn test_student(name: &str, class_name: &str, level: &str) -> Student {
    let now = Utc::now();
    Student {
        id: name.to_lowercase().replace(' ', "_"),
        name: name.to_string(),
        class_name: class_name.to_string(),
        level: level.to_string(),
        halaqah: None,
        enrolled_on: None,
        active: true,
        created_at: now,
        updated_at: now,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_cleanup() -> Result<()> {
        let base_path;
        {
            let env = TestEnvironment::new()?;
            base_path = env.base_path.clone();
            assert!(base_path.exists());
        }
        assert!(!base_path.exists());
        Ok(())
    }

    #[test]
    fn test_repository_helper() -> Result<()> {
        let helper = TestHelper::new()?;
        let student = helper.create_test_student()?;
        assert_eq!(student.id, "test_student");
        assert!(helper.student_repo.get_student(&student.id)?.is_some());
        Ok(())
    }
}
