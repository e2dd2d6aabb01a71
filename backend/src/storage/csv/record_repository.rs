//! # CSV Record Repository
//!
//! One CSV file per record kind. Each kind maps to a flat row type through
//! [`CsvRecord`]; rows keep numbers and statuses as text so that a single bad
//! cell only loses that value, not the whole file.
//!
//! ```csv
//! student_id,date,status,remarks
//! 6f1c...,10/07/2025,present,
//! 6f1c...,15/07/2025,sick,demam
//! ```

use anyhow::{Context, Result};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::AttendanceStatus;
use std::collections::BTreeMap;
use std::fs::File;
use std::marker::PhantomData;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::{ActivityRecord, AttendanceRecord, ExpenseRecord, MemorizationRecord};
use crate::storage::traits::RecordStorage;

/// Separator between completed activity keys in `activities.csv`
const ACTIVITY_SEPARATOR: char = '|';

/// Mapping between a domain record and its CSV row
pub trait CsvRecord: Sized {
    const FILE_NAME: &'static str;
    const HEADERS: &'static [&'static str];
    type Row: Serialize + DeserializeOwned;

    fn to_row(&self) -> Self::Row;
    fn from_row(row: Self::Row) -> Self;
}

/// CSV-backed storage for one record kind
#[derive(Debug, Clone)]
pub struct RecordRepository<R> {
    connection: CsvConnection,
    _record: PhantomData<fn() -> R>,
}

impl<R: CsvRecord> RecordRepository<R> {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            connection,
            _record: PhantomData,
        }
    }

    fn file_path(&self) -> PathBuf {
        self.connection.file_path(R::FILE_NAME)
    }

    fn read_records(&self) -> Result<Vec<R>> {
        let path = self.file_path();
        if !path.exists() {
            debug!("{} does not exist yet, no records", R::FILE_NAME);
            return Ok(Vec::new());
        }

        let file = File::open(&path).with_context(|| format!("Failed to open {}", path.display()))?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(file);

        let mut records = Vec::new();
        for (index, row) in reader.deserialize::<R::Row>().enumerate() {
            match row {
                Ok(row) => records.push(R::from_row(row)),
                Err(e) => warn!("Skipping unreadable row {} in {}: {}", index + 1, R::FILE_NAME, e),
            }
        }

        debug!("Read {} records from {}", records.len(), R::FILE_NAME);
        Ok(records)
    }

    fn write_records(&self, records: &[R]) -> Result<()> {
        let mut writer = WriterBuilder::new().has_headers(false).from_writer(Vec::new());
        writer.write_record(R::HEADERS)?;
        for record in records {
            writer.serialize(record.to_row())?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush {}: {}", R::FILE_NAME, e))?;

        self.connection.write_atomic(&self.file_path(), &bytes)
    }
}

impl<R: CsvRecord> RecordStorage<R> for RecordRepository<R> {
    fn list_records(&self) -> Result<Vec<R>> {
        self.read_records()
    }

    fn append_record(&self, record: &R) -> Result<()> {
        let mut records = self.read_records()?;
        records.push(R::from_row(record.to_row()));
        self.write_records(&records)?;
        info!("Appended record to {} ({} total)", R::FILE_NAME, records.len());
        Ok(())
    }

    fn replace_records(&self, records: &[R]) -> Result<()> {
        self.write_records(records)?;
        info!("Wrote {} records to {}", records.len(), R::FILE_NAME);
        Ok(())
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn parse_amount(raw: &str, file: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            if !raw.trim().is_empty() {
                warn!("Invalid number {:?} in {}, using 0", raw, file);
            }
            0.0
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AttendanceRow {
    student_id: String,
    date: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    remarks: String,
}

impl CsvRecord for AttendanceRecord {
    const FILE_NAME: &'static str = "attendance.csv";
    const HEADERS: &'static [&'static str] = &["student_id", "date", "status", "remarks"];
    type Row = AttendanceRow;

    fn to_row(&self) -> AttendanceRow {
        AttendanceRow {
            student_id: self.student_id.clone(),
            date: self.date.clone(),
            status: self.status.map(|s| s.as_label().to_string()).unwrap_or_default(),
            remarks: self.remarks.clone().unwrap_or_default(),
        }
    }

    fn from_row(row: AttendanceRow) -> Self {
        let status = AttendanceStatus::from_label(&row.status);
        if status.is_none() && !row.status.is_empty() {
            debug!("Unknown attendance status {:?} on {}", row.status, row.date);
        }
        AttendanceRecord {
            student_id: row.student_id,
            date: row.date,
            status,
            remarks: non_empty(row.remarks),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MemorizationRow {
    student_name: String,
    date: String,
    #[serde(default)]
    pages_actual: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    juz: String,
    #[serde(default)]
    surah: String,
}

impl CsvRecord for MemorizationRecord {
    const FILE_NAME: &'static str = "memorization.csv";
    const HEADERS: &'static [&'static str] =
        &["student_name", "date", "pages_actual", "status", "juz", "surah"];
    type Row = MemorizationRow;

    fn to_row(&self) -> MemorizationRow {
        MemorizationRow {
            student_name: self.student_name.clone(),
            date: self.date.clone(),
            pages_actual: self.pages_actual.to_string(),
            status: self.status.clone(),
            juz: self.juz.clone().unwrap_or_default(),
            surah: self.surah.clone().unwrap_or_default(),
        }
    }

    fn from_row(row: MemorizationRow) -> Self {
        MemorizationRecord {
            pages_actual: parse_amount(&row.pages_actual, Self::FILE_NAME),
            student_name: row.student_name,
            date: row.date,
            status: row.status,
            juz: non_empty(row.juz),
            surah: non_empty(row.surah),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ActivityRow {
    student_id: String,
    date: String,
    /// Completed activity keys joined with `|`
    #[serde(default)]
    completed: String,
}

impl CsvRecord for ActivityRecord {
    const FILE_NAME: &'static str = "activities.csv";
    const HEADERS: &'static [&'static str] = &["student_id", "date", "completed"];
    type Row = ActivityRow;

    fn to_row(&self) -> ActivityRow {
        let completed: Vec<&str> = self
            .activities
            .iter()
            .filter(|(_, done)| **done)
            .map(|(key, _)| key.as_str())
            .collect();
        ActivityRow {
            student_id: self.student_id.clone(),
            date: self.date.clone(),
            completed: completed.join(&ACTIVITY_SEPARATOR.to_string()),
        }
    }

    fn from_row(row: ActivityRow) -> Self {
        let activities: BTreeMap<String, bool> = row
            .completed
            .split(ACTIVITY_SEPARATOR)
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(|key| (key.to_string(), true))
            .collect();
        ActivityRecord {
            student_id: row.student_id,
            date: row.date,
            activities,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExpenseRow {
    student_name: String,
    date: String,
    #[serde(default)]
    amount: String,
    #[serde(default)]
    category: String,
    #[serde(default)]
    note: String,
}

impl CsvRecord for ExpenseRecord {
    const FILE_NAME: &'static str = "expenses.csv";
    const HEADERS: &'static [&'static str] = &["student_name", "date", "amount", "category", "note"];
    type Row = ExpenseRow;

    fn to_row(&self) -> ExpenseRow {
        ExpenseRow {
            student_name: self.student_name.clone(),
            date: self.date.clone(),
            amount: self.amount.to_string(),
            category: self.category.clone(),
            note: self.note.clone(),
        }
    }

    fn from_row(row: ExpenseRow) -> Self {
        ExpenseRecord {
            amount: parse_amount(&row.amount, Self::FILE_NAME),
            student_name: row.student_name,
            date: row.date,
            category: row.category,
            note: row.note,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::csv::test_utils::TestEnvironment;
    use std::fs;

    #[test]
    fn test_missing_file_reads_as_empty() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo: RecordRepository<AttendanceRecord> = RecordRepository::new(env.connection.clone());
        assert!(repo.list_records()?.is_empty());
        Ok(())
    }

    #[test]
    fn test_append_keeps_duplicates_and_order() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo: RecordRepository<AttendanceRecord> = RecordRepository::new(env.connection.clone());
        let record = AttendanceRecord {
            student_id: "s1".to_string(),
            date: "10/07/2025".to_string(),
            status: Some(AttendanceStatus::Sick),
            remarks: Some("demam".to_string()),
        };

        repo.append_record(&record)?;
        repo.append_record(&record)?;
        repo.append_record(&AttendanceRecord { status: None, remarks: None, ..record.clone() })?;

        let stored = repo.list_records()?;
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0], record);
        assert_eq!(stored[2].status, None);
        assert_eq!(stored[2].remarks, None);
        Ok(())
    }

    #[test]
    fn test_activity_keys_survive_storage() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo: RecordRepository<ActivityRecord> = RecordRepository::new(env.connection.clone());
        let mut activities = BTreeMap::new();
        activities.insert("tahajud".to_string(), true);
        activities.insert("piket".to_string(), false);
        activities.insert("shaum".to_string(), true);

        repo.append_record(&ActivityRecord {
            student_id: "s1".to_string(),
            date: "2025-07-01".to_string(),
            activities,
        })?;

        let stored = repo.list_records()?;
        assert!(stored[0].is_completed("tahajud"));
        assert!(stored[0].is_completed("shaum"));
        // Incomplete activities are not stored at all
        assert!(!stored[0].activities.contains_key("piket"));
        Ok(())
    }

    #[test]
    fn test_bad_cells_are_soft_failures() -> Result<()> {
        let env = TestEnvironment::new()?;
        let path = env.connection.file_path(ExpenseRecord::FILE_NAME);
        fs::write(
            &path,
            "student_name,date,amount,category,note\n\
             Ahmad,01/07/2025,abc,jajan,\n\
             Budi,02/07/2025,12000,buku,tulis\n",
        )?;

        let repo: RecordRepository<ExpenseRecord> = RecordRepository::new(env.connection.clone());
        let stored = repo.list_records()?;
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[0].amount, 0.0);
        assert_eq!(stored[1].amount, 12000.0);
        assert_eq!(stored[1].note, "tulis");
        Ok(())
    }

    #[test]
    fn test_hand_written_attendance_labels() -> Result<()> {
        let env = TestEnvironment::new()?;
        fs::write(
            env.connection.file_path(AttendanceRecord::FILE_NAME),
            "student_id,date,status,remarks\ns1,01/07/2025,Hadir,\ns1,02/07/2025,telat,\n",
        )?;

        let repo: RecordRepository<AttendanceRecord> = RecordRepository::new(env.connection.clone());
        let stored = repo.list_records()?;
        assert_eq!(stored[0].status, Some(AttendanceStatus::Present));
        assert_eq!(stored[1].status, None);
        Ok(())
    }

    #[test]
    fn test_replace_records() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo: RecordRepository<MemorizationRecord> = RecordRepository::new(env.connection.clone());
        let record = MemorizationRecord {
            student_name: "Ahmad".to_string(),
            date: "01/07/2025".to_string(),
            pages_actual: 2.5,
            status: "lancar".to_string(),
            juz: Some("29".to_string()),
            surah: Some("Al-Mulk".to_string()),
        };

        repo.append_record(&record)?;
        repo.replace_records(&[])?;
        assert!(repo.list_records()?.is_empty());

        repo.replace_records(&[record.clone()])?;
        assert_eq!(repo.list_records()?, vec![record]);
        Ok(())
    }
}
