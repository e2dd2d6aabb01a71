use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use log::{debug, info, warn};
use uuid::Uuid;

use crate::domain::commands::students::{
    CreateStudentCommand, CreateStudentResult, ListStudentsResult, SetStudentActiveCommand,
    UpdateStudentCommand, UpdateStudentResult,
};
use crate::domain::errors::StudentValidationError;
use crate::domain::models::student::normalize_name;
use crate::domain::models::Student;
use crate::storage::csv::{CsvConnection, StudentRepository};
use crate::storage::traits::StudentStorage;

const MAX_NAME_LENGTH: usize = 100;

/// Service for managing the student registry
#[derive(Debug, Clone)]
pub struct StudentService {
    student_repository: StudentRepository,
}

impl StudentService {
    pub fn new(connection: CsvConnection) -> Self {
        Self {
            student_repository: StudentRepository::new(connection),
        }
    }

    /// Register a new student
    pub fn create_student(&self, command: CreateStudentCommand) -> Result<CreateStudentResult> {
        info!(
            "Creating student: name={}, class={}, level={}",
            command.name, command.class_name, command.level
        );

        validate_name(&command.name)?;
        validate_required(&command.class_name, StudentValidationError::EmptyClass)?;
        validate_required(&command.level, StudentValidationError::EmptyLevel)?;
        let enrolled_on = command
            .enrolled_on
            .as_deref()
            .map(parse_enrollment_date)
            .transpose()?;

        let now = Utc::now();
        let student = Student {
            id: Uuid::new_v4().to_string(),
            name: command.name.trim().to_string(),
            class_name: command.class_name.trim().to_string(),
            level: command.level.trim().to_string(),
            halaqah: command.halaqah.map(|h| h.trim().to_string()).filter(|h| !h.is_empty()),
            enrolled_on,
            active: true,
            created_at: now,
            updated_at: now,
        };

        self.student_repository
            .store_student(&student)
            .context("Failed to store new student")?;

        info!("Created student: {} with ID: {}", student.name, student.id);
        Ok(CreateStudentResult { student })
    }

    pub fn get_student(&self, student_id: &str) -> Result<Option<Student>> {
        debug!("Getting student: {}", student_id);

        let student = self.student_repository.get_student(student_id)?;
        if student.is_none() {
            warn!("Student not found: {}", student_id);
        }
        Ok(student)
    }

    /// All students, ordered by name
    pub fn list_students(&self) -> Result<ListStudentsResult> {
        let students = self.student_repository.list_students()?;
        debug!("Found {} students", students.len());
        Ok(ListStudentsResult { students })
    }

    /// Students whose name matches ignoring case and surrounding whitespace
    pub fn find_by_name(&self, name: &str) -> Result<Vec<Student>> {
        let wanted = normalize_name(name);
        let matches: Vec<Student> = self
            .student_repository
            .list_students()?
            .into_iter()
            .filter(|s| normalize_name(&s.name) == wanted)
            .collect();

        if matches.len() > 1 {
            warn!("Name {:?} matches {} students", name, matches.len());
        }
        Ok(matches)
    }

    pub fn update_student(&self, command: UpdateStudentCommand) -> Result<UpdateStudentResult> {
        info!("Updating student: {}", command.student_id);

        let mut student = self
            .student_repository
            .get_student(&command.student_id)?
            .ok_or_else(|| StudentValidationError::NotFound(command.student_id.clone()))?;

        if let Some(name) = command.name {
            validate_name(&name)?;
            student.name = name.trim().to_string();
        }
        if let Some(class_name) = command.class_name {
            validate_required(&class_name, StudentValidationError::EmptyClass)?;
            student.class_name = class_name.trim().to_string();
        }
        if let Some(level) = command.level {
            validate_required(&level, StudentValidationError::EmptyLevel)?;
            student.level = level.trim().to_string();
        }
        if let Some(halaqah) = command.halaqah {
            // An empty string clears the group
            let halaqah = halaqah.trim().to_string();
            student.halaqah = if halaqah.is_empty() { None } else { Some(halaqah) };
        }
        if let Some(raw) = command.enrolled_on {
            student.enrolled_on = Some(parse_enrollment_date(&raw)?);
        }

        student.updated_at = Utc::now();
        self.student_repository.update_student(&student)?;

        info!("Updated student: {} with ID: {}", student.name, student.id);
        Ok(UpdateStudentResult { student })
    }

    /// Activate or deactivate a student. History stays attributable either way.
    pub fn set_student_active(&self, command: SetStudentActiveCommand) -> Result<UpdateStudentResult> {
        info!("Setting student {} active={}", command.student_id, command.active);

        let mut student = self
            .student_repository
            .get_student(&command.student_id)?
            .ok_or_else(|| StudentValidationError::NotFound(command.student_id.clone()))?;

        if student.active != command.active {
            student.active = command.active;
            student.updated_at = Utc::now();
            self.student_repository.update_student(&student)?;
        }

        Ok(UpdateStudentResult { student })
    }
}

fn validate_name(name: &str) -> Result<(), StudentValidationError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(StudentValidationError::EmptyName);
    }
    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(StudentValidationError::NameTooLong);
    }
    Ok(())
}

fn validate_required(value: &str, error: StudentValidationError) -> Result<(), StudentValidationError> {
    if value.trim().is_empty() {
        Err(error)
    } else {
        Ok(())
    }
}

fn parse_enrollment_date(raw: &str) -> Result<NaiveDate, StudentValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| StudentValidationError::InvalidEnrollmentDate(raw.to_string()))
}
