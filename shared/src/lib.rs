use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A reporting window.
///
/// Months are always 0-based (`0` = January). Semester 1 covers July–December
/// and semester 2 covers January–June of the same calendar `year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Period {
    Month { year: i32, month0: u32 },
    Semester { year: i32, semester: u8 },
    /// Inclusive on both ends
    Custom { from: NaiveDate, to: NaiveDate },
}

/// Attendance status recorded for a student on a given day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceStatus {
    Present,
    Excused,
    Sick,
    Unexcused,
    EarlyLeave,
}

impl AttendanceStatus {
    /// Parse a status label as entered on the attendance sheet.
    ///
    /// Accepts both the Indonesian labels used by the dashboard ("hadir",
    /// "izin", "sakit", "alpa", "pulang") and their English equivalents.
    /// Unknown labels yield `None` and are not counted.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_lowercase().as_str() {
            "present" | "hadir" => Some(AttendanceStatus::Present),
            "excused" | "izin" => Some(AttendanceStatus::Excused),
            "sick" | "sakit" => Some(AttendanceStatus::Sick),
            "unexcused" | "alpa" | "alpha" | "alfa" => Some(AttendanceStatus::Unexcused),
            "early-leave" | "early_leave" | "pulang" => Some(AttendanceStatus::EarlyLeave),
            _ => None,
        }
    }

    /// Stable label used when persisting records
    pub fn as_label(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "present",
            AttendanceStatus::Excused => "excused",
            AttendanceStatus::Sick => "sick",
            AttendanceStatus::Unexcused => "unexcused",
            AttendanceStatus::EarlyLeave => "early-leave",
        }
    }
}

/// Count of attendance records per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceTally {
    pub present: u32,
    pub excused: u32,
    pub sick: u32,
    pub unexcused: u32,
    pub early_leave: u32,
}

impl AttendanceTally {
    pub fn count(&self, status: AttendanceStatus) -> u32 {
        match status {
            AttendanceStatus::Present => self.present,
            AttendanceStatus::Excused => self.excused,
            AttendanceStatus::Sick => self.sick,
            AttendanceStatus::Unexcused => self.unexcused,
            AttendanceStatus::EarlyLeave => self.early_leave,
        }
    }

    pub fn total(&self) -> u32 {
        self.present + self.excused + self.sick + self.unexcused + self.early_leave
    }
}

/// Memorization ("hafalan") status label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemorizationStatus {
    BaikSekali,
    Baik,
    Cukup,
    Kurang,
    SangatKurang,
}

impl MemorizationStatus {
    pub fn label(&self) -> &'static str {
        match self {
            MemorizationStatus::BaikSekali => "Baik Sekali",
            MemorizationStatus::Baik => "Baik",
            MemorizationStatus::Cukup => "Cukup",
            MemorizationStatus::Kurang => "Kurang",
            MemorizationStatus::SangatKurang => "Sangat Kurang",
        }
    }
}

impl fmt::Display for MemorizationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Spending status label relative to the period budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FinanceStatus {
    SangatHemat,
    Hemat,
    CukupProporsional,
    Boros,
    SangatBoros,
}

impl FinanceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FinanceStatus::SangatHemat => "Sangat Hemat",
            FinanceStatus::Hemat => "Hemat",
            FinanceStatus::CukupProporsional => "Cukup Proporsional",
            FinanceStatus::Boros => "Boros",
            FinanceStatus::SangatBoros => "Sangat Boros",
        }
    }
}

impl fmt::Display for FinanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Pages memorized within a period compared against the level target
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MemorizationProgress {
    pub pages: f64,
    pub target: f64,
    pub percentage: i64,
    pub status: MemorizationStatus,
}

/// Completion count for one tracked activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityCount {
    pub activity: String,
    pub completed: u32,
}

/// Completion counts for every tracked activity, in tracking order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityTally {
    pub counts: Vec<ActivityCount>,
}

impl ActivityTally {
    pub fn completed(&self, activity: &str) -> u32 {
        self.counts
            .iter()
            .find(|c| c.activity == activity)
            .map(|c| c.completed)
            .unwrap_or(0)
    }
}

/// Spending within a period compared against the daily-rate budget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinanceUsage {
    pub spent: f64,
    pub budget: f64,
    pub days: u32,
    pub percentage: i64,
    pub status: FinanceStatus,
}

/// Identity of the student a report is about
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSummary {
    pub id: String,
    pub name: String,
    pub class_name: String,
    pub level: String,
}

/// Everything the report renderer needs for one student and one period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentReport {
    pub student: StudentSummary,
    pub period: Period,
    pub period_label: String,
    pub attendance: AttendanceTally,
    pub memorization: MemorizationProgress,
    pub activities: ActivityTally,
    pub finance: FinanceUsage,
}

/// Accumulated memorization bonus for one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusEntry {
    pub student_key: String,
    pub display_name: String,
    pub pages: f64,
    pub bonus: f64,
}

/// Dashboard-level bonus totals across all memorization records
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusSummary {
    pub rate_per_page: f64,
    pub entries: Vec<BonusEntry>,
    pub total_pages: f64,
    pub total_bonus: f64,
}

/// One month in the academic-year finance view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceMonthRow {
    /// 0 = July ... 11 = June
    pub academic_index: u32,
    pub period: Period,
    pub label: String,
    pub usage: FinanceUsage,
}

/// Finance usage for each month of an academic year plus the yearly total
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinanceAcademicYear {
    /// Calendar year in which the academic year starts (July)
    pub academic_year: i32,
    pub months: Vec<FinanceMonthRow>,
    pub total: FinanceUsage,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attendance_status_labels() {
        assert_eq!(AttendanceStatus::from_label("Hadir"), Some(AttendanceStatus::Present));
        assert_eq!(AttendanceStatus::from_label(" sakit "), Some(AttendanceStatus::Sick));
        assert_eq!(AttendanceStatus::from_label("early-leave"), Some(AttendanceStatus::EarlyLeave));
        assert_eq!(AttendanceStatus::from_label("alpa"), Some(AttendanceStatus::Unexcused));
        assert_eq!(AttendanceStatus::from_label("terlambat"), None);
        assert_eq!(AttendanceStatus::from_label(""), None);
    }

    #[test]
    fn test_attendance_tally_total() {
        let tally = AttendanceTally { present: 3, excused: 1, sick: 2, unexcused: 0, early_leave: 1 };
        assert_eq!(tally.total(), 7);
        assert_eq!(tally.count(AttendanceStatus::Sick), 2);
    }

    #[test]
    fn test_period_serializes_with_kind_tag() {
        let period = Period::Month { year: 2025, month0: 6 };
        let json = serde_json::to_value(period).unwrap();
        assert_eq!(json["kind"], "month");
        assert_eq!(json["month0"], 6);

        let back: Period = serde_json::from_value(json).unwrap();
        assert_eq!(back, period);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(MemorizationStatus::SangatKurang.to_string(), "Sangat Kurang");
        assert_eq!(FinanceStatus::CukupProporsional.to_string(), "Cukup Proporsional");
    }
}
