//! # Student Registry Repository
//!
//! The whole registry lives in one `students.yaml` file at the root of the
//! data directory, kept sorted by name:
//!
//! ```yaml
//! - id: 5b0e...
//!   name: Ahmad Fauzi
//!   class_name: 7A
//!   level: Tahfizh 2
//!   halaqah: Umar
//!   enrolled_on: "2024-07-15"
//!   active: true
//!   created_at: "2025-01-21T19:30:00+00:00"
//!   updated_at: "2025-01-21T19:30:00+00:00"
//! ```

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::Student;
use crate::storage::traits::StudentStorage;

const STUDENTS_FILE: &str = "students.yaml";

/// Intermediate struct for YAML serialization with string date fields
#[derive(Debug, Clone, Serialize, Deserialize)]
struct YamlStudent {
    id: String,
    name: String,
    class_name: String,
    level: String,
    #[serde(default)]
    halaqah: Option<String>,
    #[serde(default)]
    enrolled_on: Option<String>,
    #[serde(default = "default_active")]
    active: bool,
    created_at: String,
    updated_at: String,
}

fn default_active() -> bool {
    true
}

impl From<&Student> for YamlStudent {
    fn from(student: &Student) -> Self {
        YamlStudent {
            id: student.id.clone(),
            name: student.name.clone(),
            class_name: student.class_name.clone(),
            level: student.level.clone(),
            halaqah: student.halaqah.clone(),
            enrolled_on: student.enrolled_on.map(|d| d.format("%Y-%m-%d").to_string()),
            active: student.active,
            created_at: student.created_at.to_rfc3339(),
            updated_at: student.updated_at.to_rfc3339(),
        }
    }
}

impl TryFrom<YamlStudent> for Student {
    type Error = anyhow::Error;

    fn try_from(yaml: YamlStudent) -> Result<Self> {
        let enrolled_on = match yaml.enrolled_on.as_deref() {
            Some(raw) if !raw.trim().is_empty() => Some(
                NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|e| anyhow!("Failed to parse enrolled_on: {}", e))?,
            ),
            _ => None,
        };

        Ok(Student {
            id: yaml.id,
            name: yaml.name,
            class_name: yaml.class_name,
            level: yaml.level,
            halaqah: yaml.halaqah,
            enrolled_on,
            active: yaml.active,
            created_at: parse_timestamp(&yaml.created_at, "created_at")?,
            updated_at: parse_timestamp(&yaml.updated_at, "updated_at")?,
        })
    }
}

fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| anyhow!("Failed to parse {}: {}", field, e))
}

/// YAML-backed student registry
#[derive(Debug, Clone)]
pub struct StudentRepository {
    connection: CsvConnection,
}

impl StudentRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn students_path(&self) -> PathBuf {
        self.connection.file_path(STUDENTS_FILE)
    }

    fn load_students(&self) -> Result<Vec<Student>> {
        let path = self.students_path();
        if !path.exists() {
            debug!("No student registry at {:?}", path);
            return Ok(Vec::new());
        }

        let yaml_content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if yaml_content.trim().is_empty() {
            return Ok(Vec::new());
        }
        let entries: Vec<YamlStudent> = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let mut students = Vec::with_capacity(entries.len());
        for entry in entries {
            let id = entry.id.clone();
            match Student::try_from(entry) {
                Ok(student) => students.push(student),
                Err(e) => warn!("Skipping student {} in registry: {}", id, e),
            }
        }

        students.sort_by(|a, b| a.name.cmp(&b.name));
        debug!("Loaded {} students", students.len());
        Ok(students)
    }

    fn save_students(&self, students: &[Student]) -> Result<()> {
        let mut entries: Vec<YamlStudent> = students.iter().map(YamlStudent::from).collect();
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        let yaml_content = serde_yaml::to_string(&entries)?;
        self.connection
            .write_atomic(&self.students_path(), yaml_content.as_bytes())
    }
}

impl StudentStorage for StudentRepository {
    fn store_student(&self, student: &Student) -> Result<()> {
        let mut students = self.load_students()?;
        if students.iter().any(|s| s.id == student.id) {
            return Err(anyhow!("Student with ID {} already exists", student.id));
        }

        students.push(student.clone());
        self.save_students(&students)?;
        info!("Stored student: {} ({})", student.name, student.id);
        Ok(())
    }

    fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        Ok(self
            .load_students()?
            .into_iter()
            .find(|s| s.id == student_id))
    }

    fn list_students(&self) -> Result<Vec<Student>> {
        self.load_students()
    }

    fn update_student(&self, student: &Student) -> Result<()> {
        let mut students = self.load_students()?;
        let existing = students
            .iter_mut()
            .find(|s| s.id == student.id)
            .ok_or_else(|| anyhow!("Student with ID {} not found", student.id))?;
        *existing = student.clone();

        self.save_students(&students)?;
        info!("Updated student: {} ({})", student.name, student.id);
        Ok(())
    }

    fn replace_students(&self, students: &[Student]) -> Result<()> {
        self.save_students(students)?;
        info!("Replaced student registry with {} students", students.len());
        Ok(())
    }
}
