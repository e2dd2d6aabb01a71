//! # CSV Storage Module
//!
//! File-based storage for the reporting backend. Everything lives in a
//! single data directory:
//!
//! ```text
//! data/
//! ├── reporting_config.yaml
//! ├── students.yaml
//! ├── attendance.csv
//! ├── memorization.csv
//! ├── activities.csv
//! └── expenses.csv
//! ```
//!
//! Writes go to a temp file that is renamed over the target, so a crash
//! never leaves a half-written file behind.

pub mod config_repository;
pub mod connection;
pub mod record_repository;
pub mod student_repository;

#[cfg(test)]
pub mod test_utils;

pub use config_repository::ConfigRepository;
pub use connection::CsvConnection;
pub use record_repository::{CsvRecord, RecordRepository};
pub use student_repository::StudentRepository;
