//! Raw event records as they arrive from the record source.
//!
//! Dates are kept as the raw text that was entered; they are parsed only
//! when a record is bucketed so that one bad date never blocks loading.

use serde::{Deserialize, Serialize};
use shared::AttendanceStatus;
use std::collections::BTreeMap;

/// How a record points at its student
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentRef<'a> {
    Id(&'a str),
    Name(&'a str),
}

/// Common accessors used by the record filter
pub trait StudentRecord {
    fn student_ref(&self) -> StudentRef<'_>;
    fn raw_date(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub student_id: String,
    pub date: String,
    /// `None` when the sheet carried a label we do not recognise
    pub status: Option<AttendanceStatus>,
    pub remarks: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorizationRecord {
    pub student_name: String,
    pub date: String,
    pub pages_actual: f64,
    pub status: String,
    pub juz: Option<String>,
    pub surah: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityRecord {
    pub student_id: String,
    pub date: String,
    pub activities: BTreeMap<String, bool>,
}

impl ActivityRecord {
    pub fn is_completed(&self, activity: &str) -> bool {
        self.activities.get(activity).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpenseRecord {
    pub student_name: String,
    pub date: String,
    pub amount: f64,
    pub category: String,
    pub note: String,
}

impl StudentRecord for AttendanceRecord {
    fn student_ref(&self) -> StudentRef<'_> {
        StudentRef::Id(&self.student_id)
    }

    fn raw_date(&self) -> &str {
        &self.date
    }
}

impl StudentRecord for MemorizationRecord {
    fn student_ref(&self) -> StudentRef<'_> {
        StudentRef::Name(&self.student_name)
    }

    fn raw_date(&self) -> &str {
        &self.date
    }
}

impl StudentRecord for ActivityRecord {
    fn student_ref(&self) -> StudentRef<'_> {
        StudentRef::Id(&self.student_id)
    }

    fn raw_date(&self) -> &str {
        &self.date
    }
}

impl StudentRecord for ExpenseRecord {
    fn student_ref(&self) -> StudentRef<'_> {
        StudentRef::Name(&self.student_name)
    }

    fn raw_date(&self) -> &str {
        &self.date
    }
}
