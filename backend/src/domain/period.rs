//! Reporting windows and the academic-month remap.
//!
//! The [`Period`] value itself lives in `shared` because the report renderer
//! consumes it; construction rules and membership live here.

use chrono::NaiveDate;
use shared::Period;

use crate::domain::calendar::{self, DateParts};
use crate::domain::errors::PeriodError;

pub fn month(year: i32, month0: u32) -> Result<Period, PeriodError> {
    if month0 > 11 {
        return Err(PeriodError::InvalidMonth(month0));
    }
    Ok(Period::Month { year, month0 })
}

pub fn semester(year: i32, semester: u8) -> Result<Period, PeriodError> {
    if semester != 1 && semester != 2 {
        return Err(PeriodError::InvalidSemester(semester));
    }
    Ok(Period::Semester { year, semester })
}

pub fn custom(from: NaiveDate, to: NaiveDate) -> Result<Period, PeriodError> {
    if from > to {
        return Err(PeriodError::InvertedRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }
    Ok(Period::Custom { from, to })
}

/// Operations on a [`Period`]
pub trait PeriodExt {
    /// Whether a parsed record date falls inside the window
    fn contains(&self, date: &DateParts) -> bool;

    /// Day count used for budgets
    fn days(&self) -> u32;

    /// Human label, e.g. "Juli 2025" or "Semester 1 2025"
    fn label(&self) -> String;

    /// Same checks as the constructors, for values built or deserialized
    /// without them
    fn validate(&self) -> Result<(), PeriodError>;
}

impl PeriodExt for Period {
    fn contains(&self, date: &DateParts) -> bool {
        match *self {
            Period::Month { year, month0 } => date.year == year && date.month0 == month0,
            Period::Semester { year, semester } => {
                date.year == year && calendar::month_to_semester(date.month0) == semester
            }
            Period::Custom { from, to } => {
                let from = DateParts::from(from);
                let to = DateParts::from(to);
                *date >= from && *date <= to
            }
        }
    }

    fn days(&self) -> u32 {
        match *self {
            Period::Month { year, month0 } => calendar::days_in_month(year, month0),
            Period::Semester { year, semester } => calendar::days_in_semester(year, semester),
            Period::Custom { from, to } => {
                let span = (to - from).num_days();
                u32::try_from(span + 1).unwrap_or(0)
            }
        }
    }

    fn label(&self) -> String {
        match *self {
            Period::Month { year, month0 } => format!("{} {}", calendar::month_name(month0), year),
            Period::Semester { year, semester } => format!("Semester {} {}", semester, year),
            Period::Custom { from, to } => format!(
                "{} - {}",
                from.format("%d/%m/%Y"),
                to.format("%d/%m/%Y")
            ),
        }
    }

    fn validate(&self) -> Result<(), PeriodError> {
        match *self {
            Period::Month { year, month0 } => month(year, month0),
            Period::Semester { year, semester: n } => semester(year, n),
            Period::Custom { from, to } => custom(from, to),
        }
        .map(|_| ())
    }
}

/// Calendar month for an academic month index (0 = July ... 11 = June)
pub fn calendar_month(academic_index: u32) -> u32 {
    if academic_index < 6 {
        academic_index + 6
    } else {
        academic_index - 6
    }
}

/// Academic month index for a calendar month
pub fn academic_index(month0: u32) -> u32 {
    (month0 + 6) % 12
}

/// Calendar year of an academic month: January–June belong to the year after
/// the academic year starts.
pub fn academic_calendar_year(academic_year: i32, academic_index: u32) -> i32 {
    if calendar_month(academic_index) < 6 {
        academic_year.saturating_add(1)
    } else {
        academic_year
    }
}

/// Month period for an academic month of an academic year
pub fn academic_month(academic_year: i32, academic_index: u32) -> Result<Period, PeriodError> {
    if academic_index > 11 {
        return Err(PeriodError::InvalidAcademicIndex(academic_index));
    }
    month(
        academic_calendar_year(academic_year, academic_index),
        calendar_month(academic_index),
    )
}

/// Academic year (start year) containing a calendar month
pub fn academic_year_of(year: i32, month0: u32) -> i32 {
    if month0 >= 6 {
        year
    } else {
        year.saturating_sub(1)
    }
}
