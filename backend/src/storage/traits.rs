//! # Storage Traits
//!
//! Storage abstraction traits that let the domain layer work with any
//! backend. All operations are synchronous.

use anyhow::Result;

use crate::config::ReportingConfig;
use crate::domain::models::Student;

/// Student registry persistence
pub trait StudentStorage: Send + Sync {
    /// Store a new student
    fn store_student(&self, student: &Student) -> Result<()>;

    /// Retrieve a specific student by ID
    fn get_student(&self, student_id: &str) -> Result<Option<Student>>;

    /// List all students ordered by name
    fn list_students(&self) -> Result<Vec<Student>>;

    /// Update an existing student
    fn update_student(&self, student: &Student) -> Result<()>;

    /// Replace the whole registry
    fn replace_students(&self, students: &[Student]) -> Result<()>;
}

/// Append-only persistence for one kind of event record
pub trait RecordStorage<R>: Send + Sync {
    /// All records in insertion order. Rows that cannot be read are skipped.
    fn list_records(&self) -> Result<Vec<R>>;

    /// Append a record; duplicates are kept
    fn append_record(&self, record: &R) -> Result<()>;

    /// Replace every stored record
    fn replace_records(&self, records: &[R]) -> Result<()>;
}

/// Reporting configuration persistence
pub trait ConfigStorage: Send + Sync {
    /// Get the configuration, creating the default file if missing
    fn get_config(&self) -> Result<ReportingConfig>;

    /// Overwrite the configuration
    fn update_config(&self, config: &ReportingConfig) -> Result<()>;
}
