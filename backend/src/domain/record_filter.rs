//! Selects the records that belong to one student within one period.
//!
//! Attendance and activity records point at a student by id while
//! memorization and expense records only carry the display name. Both are
//! resolved to a [`StudentKey`] through a [`StudentDirectory`] before any
//! comparison, so two students who share a name are never merged.

use log::{debug, warn};
use shared::Period;
use std::collections::HashMap;

use crate::domain::calendar::{self, DateParts};
use crate::domain::models::student::normalize_name;
use crate::domain::models::{Student, StudentKey, StudentRecord, StudentRef};
use crate::domain::period::PeriodExt;

/// Outcome of resolving a record's student reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Key(StudentKey),
    /// The name matches more than one registered student
    Ambiguous,
}

/// Lookup from ids and display names to student keys
#[derive(Debug, Clone, Default)]
pub struct StudentDirectory {
    by_name: HashMap<String, Vec<String>>,
    display_names: HashMap<StudentKey, String>,
}

impl StudentDirectory {
    pub fn new(students: &[Student]) -> Self {
        let mut by_name: HashMap<String, Vec<String>> = HashMap::new();
        let mut display_names = HashMap::with_capacity(students.len());
        for student in students {
            by_name
                .entry(normalize_name(&student.name))
                .or_default()
                .push(student.id.clone());
            display_names.insert(student.key(), student.name.clone());
        }
        Self {
            by_name,
            display_names,
        }
    }

    /// Registered name for a key, `None` for unregistered keys
    pub fn display_name(&self, key: &StudentKey) -> Option<&str> {
        self.display_names.get(key).map(String::as_str)
    }

    pub fn resolve(&self, student: StudentRef<'_>) -> Resolution {
        match student {
            StudentRef::Id(id) => Resolution::Key(StudentKey::from_id(id)),
            StudentRef::Name(name) => match self.by_name.get(&normalize_name(name)) {
                Some(ids) if ids.len() == 1 => Resolution::Key(StudentKey::from_id(&ids[0])),
                Some(_) => Resolution::Ambiguous,
                None => Resolution::Key(StudentKey::unregistered(name)),
            },
        }
    }

    /// Key for a record, or `None` when its name is ambiguous
    pub fn key_for<R: StudentRecord>(&self, record: &R) -> Option<StudentKey> {
        match self.resolve(record.student_ref()) {
            Resolution::Key(key) => Some(key),
            Resolution::Ambiguous => {
                warn!(
                    "Record dated {} names an ambiguous student {:?}; excluded",
                    record.raw_date(),
                    record.student_ref()
                );
                None
            }
        }
    }
}

/// Parsed date of a record, or `None` (logged) when the date is unusable
pub fn record_date<R: StudentRecord>(record: &R) -> Option<DateParts> {
    match calendar::parse_date(record.raw_date()) {
        Ok(date) => Some(date),
        Err(e) => {
            warn!("Excluding record with unparseable date {:?}: {}", record.raw_date(), e);
            None
        }
    }
}

struct IndexedRecord<'a, R> {
    key: StudentKey,
    date: DateParts,
    record: &'a R,
}

/// Records with their student key and date resolved up front.
///
/// Records with an unparseable date or an ambiguous name are dropped, and
/// logged, while the index is built. Selecting many students or periods from
/// one index therefore reports each bad record once.
pub struct RecordIndex<'a, R> {
    entries: Vec<IndexedRecord<'a, R>>,
    excluded: usize,
}

impl<'a, R: StudentRecord> RecordIndex<'a, R> {
    pub fn new(records: &'a [R], directory: &StudentDirectory) -> Self {
        let mut entries = Vec::with_capacity(records.len());
        let mut excluded = 0;
        for record in records {
            match (directory.key_for(record), record_date(record)) {
                (Some(key), Some(date)) => entries.push(IndexedRecord { key, date, record }),
                _ => excluded += 1,
            }
        }

        debug!("Indexed {} records, excluded {}", entries.len(), excluded);
        Self { entries, excluded }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Records dropped for an unusable date or an ambiguous name
    pub fn excluded(&self) -> usize {
        self.excluded
    }

    /// Records of one student that fall inside `period`, in input order
    pub fn select(&self, student: &StudentKey, period: &Period) -> Vec<&'a R> {
        let selected: Vec<&'a R> = self
            .entries
            .iter()
            .filter(|entry| &entry.key == student && period.contains(&entry.date))
            .map(|entry| entry.record)
            .collect();

        debug!(
            "Selected {} of {} records for {} in {:?}",
            selected.len(),
            self.entries.len(),
            student,
            period
        );
        selected
    }
}

/// Records of one student that fall inside `period`.
///
/// Records with unparseable dates or ambiguous names are skipped, never
/// reported as errors. The input slice is not modified. Use a
/// [`RecordIndex`] when selecting repeatedly from the same records.
pub fn filter_by_period<'a, R: StudentRecord>(
    records: &'a [R],
    directory: &StudentDirectory,
    student: &StudentKey,
    period: &Period,
) -> Vec<&'a R> {
    RecordIndex::new(records, directory).select(student, period)
}
