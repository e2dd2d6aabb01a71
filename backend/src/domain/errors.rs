//! Typed errors raised by the reporting domain.

use thiserror::Error;

/// Why a raw record date could not be bucketed.
///
/// Aggregation never surfaces this to callers; a record whose date fails to
/// parse is simply excluded from every period.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateParseError {
    #[error("Date is empty")]
    Empty,
    #[error("Expected 2 or 3 date components, found {0}")]
    TokenCount(usize),
    #[error("Date component is not numeric: {0:?}")]
    NonNumeric(String),
    #[error("Month out of range: {0}")]
    MonthOutOfRange(u32),
    #[error("Day {day} out of range for {year}-{month:02}")]
    DayOutOfRange { year: i32, month: u32, day: u32 },
}

/// Invalid reporting window
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PeriodError {
    #[error("Month index must be between 0 and 11, got {0}")]
    InvalidMonth(u32),
    #[error("Semester must be 1 or 2, got {0}")]
    InvalidSemester(u8),
    #[error("Academic month index must be between 0 and 11, got {0}")]
    InvalidAcademicIndex(u32),
    #[error("Custom range starts after it ends ({from} > {to})")]
    InvertedRange { from: String, to: String },
}

#[derive(Debug, Error)]
pub enum StudentValidationError {
    #[error("Student name cannot be empty")]
    EmptyName,
    #[error("Student name is too long")]
    NameTooLong,
    #[error("Class cannot be empty")]
    EmptyClass,
    #[error("Level cannot be empty")]
    EmptyLevel,
    #[error("Invalid enrollment date: {0}")]
    InvalidEnrollmentDate(String),
    #[error("Student not found: {0}")]
    NotFound(String),
}
