//! Domain model for a student (santri) and the key records are attributed by.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shared::StudentSummary;
use std::fmt;

/// A student enrolled at the institution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class_name: String,
    /// Memorization program, e.g. "Tahsin" or "Tahfizh 2"; selects the target row
    pub level: String,
    pub halaqah: Option<String>,
    pub enrolled_on: Option<NaiveDate>,
    /// Inactive students stay in the registry so their history still resolves
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Student {
    pub fn key(&self) -> StudentKey {
        StudentKey::from_id(&self.id)
    }

    pub fn summary(&self) -> StudentSummary {
        StudentSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            class_name: self.class_name.clone(),
            level: self.level.clone(),
        }
    }
}

/// Opaque identity every record is attributed to before aggregation.
///
/// Registered students are keyed by id. Names that never resolve to a
/// registered student get a separate namespace so they cannot collide with
/// an id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StudentKey(String);

impl StudentKey {
    pub fn from_id(id: &str) -> Self {
        StudentKey(format!("id:{}", id))
    }

    pub fn unregistered(name: &str) -> Self {
        StudentKey(format!("name:{}", normalize_name(name)))
    }
}

impl fmt::Display for StudentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Case- and whitespace-insensitive form of a display name
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
