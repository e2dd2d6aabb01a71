//! Per-domain aggregators.
//!
//! Each aggregator takes records already narrowed by
//! [`filter_by_period`](crate::domain::record_filter::filter_by_period) and
//! reduces them to the statistics a report shows. Empty input always yields
//! a zeroed result.

use log::{debug, warn};
use shared::{
    ActivityCount, ActivityTally, AttendanceStatus, AttendanceTally, BonusEntry, BonusSummary,
    FinanceAcademicYear, FinanceMonthRow, FinanceUsage, MemorizationProgress, Period,
};
use std::collections::BTreeMap;

use crate::domain::calendar;
use crate::domain::classification::{classify_finance, classify_memorization};
use crate::domain::models::student::normalize_name;
use crate::domain::models::{
    ActivityRecord, AttendanceRecord, ExpenseRecord, MemorizationRecord, StudentKey, StudentRecord,
};
use crate::domain::period::{self, PeriodExt};
use crate::domain::record_filter::{RecordIndex, Resolution, StudentDirectory};

/// Pages expected from a student of a given level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemorizationTargets {
    pub daily: f64,
    pub monthly: f64,
    pub semester: f64,
}

impl MemorizationTargets {
    const TAHSIN: Self = Self { daily: 4.0, monthly: 4.0, semester: 20.0 };
    const TAHFIZH_KAMIL: Self = Self { daily: 20.0, monthly: 20.0, semester: 100.0 };
    const TAHFIZH_2: Self = Self { daily: 10.0, monthly: 10.0, semester: 50.0 };
    const TAHFIZH_1: Self = Self { daily: 6.0, monthly: 6.0, semester: 30.0 };

    /// Used when the level is unknown or the student is not registered
    pub const DEFAULT: Self = Self::TAHSIN;

    /// Target for a reporting window.
    ///
    /// Custom ranges pick a row by length: a single day uses the daily target,
    /// up to 31 days the monthly target, anything longer the semester target.
    pub fn for_period(&self, period: &Period) -> f64 {
        match period {
            Period::Month { .. } => self.monthly,
            Period::Semester { .. } => self.semester,
            Period::Custom { .. } => match period.days() {
                0 | 1 => self.daily,
                2..=31 => self.monthly,
                _ => self.semester,
            },
        }
    }
}

/// Target row for a level name such as "Tahfizh Kamil" or "tahfidz 2"
pub fn targets_for_level(level: &str) -> MemorizationTargets {
    let level = normalize_name(level);
    let has = |needles: &[&str]| needles.iter().any(|n| level.contains(n));

    if has(&["tahsin"]) {
        MemorizationTargets::TAHSIN
    } else if has(&["tahfizh kamil", "tahfidz kamil"]) {
        MemorizationTargets::TAHFIZH_KAMIL
    } else if has(&["tahfizh 2", "tahfidz 2"]) {
        MemorizationTargets::TAHFIZH_2
    } else if has(&["tahfizh", "tahfidz"]) {
        MemorizationTargets::TAHFIZH_1
    } else {
        MemorizationTargets::DEFAULT
    }
}

/// `round(actual / target × 100)`, or 0 when the target is not positive
pub fn percentage(actual: f64, target: f64) -> i64 {
    if target <= 0.0 || !target.is_finite() {
        return 0;
    }
    let pct = (actual / target * 100.0).round();
    if pct.is_finite() {
        pct as i64
    } else {
        0
    }
}

pub fn tally_attendance(records: &[&AttendanceRecord]) -> AttendanceTally {
    let mut tally = AttendanceTally::default();
    for record in records {
        match record.status {
            Some(AttendanceStatus::Present) => tally.present += 1,
            Some(AttendanceStatus::Excused) => tally.excused += 1,
            Some(AttendanceStatus::Sick) => tally.sick += 1,
            Some(AttendanceStatus::Unexcused) => tally.unexcused += 1,
            Some(AttendanceStatus::EarlyLeave) => tally.early_leave += 1,
            None => debug!("Attendance record on {} has no known status", record.date),
        }
    }
    tally
}

pub fn memorization_progress(
    records: &[&MemorizationRecord],
    targets: &MemorizationTargets,
    period: &Period,
) -> MemorizationProgress {
    let pages: f64 = records
        .iter()
        .map(|r| r.pages_actual)
        .filter(|p| p.is_finite())
        .sum();
    let target = targets.for_period(period);
    let percentage = percentage(pages, target);

    MemorizationProgress {
        pages,
        target,
        percentage,
        status: classify_memorization(percentage as f64),
    }
}

pub fn tally_activities(records: &[&ActivityRecord], tracked: &[String]) -> ActivityTally {
    let counts = tracked
        .iter()
        .map(|activity| ActivityCount {
            activity: activity.clone(),
            completed: records.iter().filter(|r| r.is_completed(activity)).count() as u32,
        })
        .collect();
    ActivityTally { counts }
}

pub fn finance_usage(records: &[&ExpenseRecord], period: &Period, daily_rate: f64) -> FinanceUsage {
    let spent: f64 = records
        .iter()
        .map(|r| r.amount)
        .filter(|a| a.is_finite())
        .sum();
    let days = period.days();
    let budget = daily_rate * days as f64;
    let percentage = percentage(spent, budget);

    FinanceUsage {
        spent,
        budget,
        days,
        percentage,
        status: classify_finance(percentage as f64),
    }
}

/// Spending for every month of an academic year (July through June).
pub fn finance_academic_year(
    records: &[ExpenseRecord],
    directory: &StudentDirectory,
    student: &StudentKey,
    academic_year: i32,
    daily_rate: f64,
) -> FinanceAcademicYear {
    let index = RecordIndex::new(records, directory);
    let months: Vec<FinanceMonthRow> = (0..12)
        .map(|academic_index| {
            let month = Period::Month {
                year: period::academic_calendar_year(academic_year, academic_index),
                month0: period::calendar_month(academic_index),
            };
            let selected = index.select(student, &month);
            FinanceMonthRow {
                academic_index,
                period: month,
                label: month.label(),
                usage: finance_usage(&selected, &month, daily_rate),
            }
        })
        .collect();

    let spent: f64 = months.iter().map(|m| m.usage.spent).sum();
    let days = calendar::days_in_semester(academic_year, 1)
        + calendar::days_in_semester(academic_year.saturating_add(1), 2);
    let budget = daily_rate * days as f64;
    let total_pct = percentage(spent, budget);

    FinanceAcademicYear {
        academic_year,
        months,
        total: FinanceUsage {
            spent,
            budget,
            days,
            percentage: total_pct,
            status: classify_finance(total_pct as f64),
        },
    }
}

/// Memorization bonus over every record ever entered.
///
/// Pages are grouped per student key. A name that matches several registered
/// students cannot be attributed, so its pages are grouped under the name
/// itself; the grand total stays complete either way.
pub fn bonus_summary(
    records: &[MemorizationRecord],
    directory: &StudentDirectory,
    rate_per_page: f64,
) -> BonusSummary {
    let mut pages_by_key: BTreeMap<StudentKey, (String, f64)> = BTreeMap::new();

    for record in records {
        if !record.pages_actual.is_finite() {
            continue;
        }
        let key = match directory.resolve(record.student_ref()) {
            Resolution::Key(key) => key,
            Resolution::Ambiguous => {
                warn!(
                    "Bonus pages for ambiguous name {:?} grouped under the name",
                    record.student_name
                );
                StudentKey::unregistered(&record.student_name)
            }
        };
        let entry = pages_by_key.entry(key).or_insert_with_key(|key| {
            let display_name = directory
                .display_name(key)
                .unwrap_or_else(|| record.student_name.trim());
            (display_name.to_string(), 0.0)
        });
        entry.1 += record.pages_actual;
    }

    let mut entries: Vec<BonusEntry> = pages_by_key
        .into_iter()
        .map(|(key, (display_name, pages))| BonusEntry {
            student_key: key.to_string(),
            display_name,
            pages,
            bonus: pages * rate_per_page,
        })
        .collect();
    entries.sort_by(|a, b| {
        a.display_name
            .cmp(&b.display_name)
            .then_with(|| a.student_key.cmp(&b.student_key))
    });

    let total_pages = entries.iter().map(|e| e.pages).sum();
    let total_bonus = entries.iter().map(|e| e.bonus).sum();

    BonusSummary {
        rate_per_page,
        entries,
        total_pages,
        total_bonus,
    }
}
