//! Date bucketing for the reporting engine.
//!
//! Every report component resolves record dates through this module so that
//! "which month does this record belong to" has exactly one answer. Months
//! are 0-based throughout (`0` = January); 1-based and academic orderings
//! exist only at the display edge.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::errors::DateParseError;

/// A parsed calendar date. Field order makes the derived ordering chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DateParts {
    pub year: i32,
    pub month0: u32,
    pub day: u32,
}

impl From<NaiveDate> for DateParts {
    fn from(date: NaiveDate) -> Self {
        use chrono::Datelike;
        DateParts {
            year: date.year(),
            month0: date.month0(),
            day: date.day(),
        }
    }
}

/// Parse a raw record date.
///
/// Accepted shapes, separated by `-`, `/` or `.`:
/// - `YYYY-MM-DD` (first component has four digits)
/// - `DD-MM-YYYY`
/// - `DD/MMYYYY`, a two-component form produced by a broken date input that
///   concatenated month and year. The first two digits of the second
///   component are the month, the rest is the year. Kept for old data only.
pub fn parse_date(raw: &str) -> Result<DateParts, DateParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DateParseError::Empty);
    }

    let tokens: Vec<&str> = trimmed
        .split(|c| c == '-' || c == '/' || c == '.')
        .map(str::trim)
        .collect();

    let (year, month, day) = match tokens.as_slice() {
        [first, second, third] => {
            if first.len() == 4 {
                (parse_year(first)?, parse_number(second)?, parse_number(third)?)
            } else {
                (parse_year(third)?, parse_number(second)?, parse_number(first)?)
            }
        }
        [day, month_year] => {
            let day = parse_number(day)?;
            // Validate digits before slicing so the byte split is always on a char boundary
            parse_number(month_year)?;
            if month_year.len() < 3 {
                return Err(DateParseError::NonNumeric(month_year.to_string()));
            }
            let (month, year) = month_year.split_at(2);
            (parse_year(year)?, parse_number(month)?, day)
        }
        _ => return Err(DateParseError::TokenCount(tokens.len())),
    };

    if !(1..=12).contains(&month) {
        return Err(DateParseError::MonthOutOfRange(month));
    }
    let month0 = month - 1;
    if day < 1 || day > days_in_month(year, month0) {
        return Err(DateParseError::DayOutOfRange { year, month, day });
    }

    Ok(DateParts { year, month0, day })
}

fn parse_number(token: &str) -> Result<u32, DateParseError> {
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_digit()) {
        return Err(DateParseError::NonNumeric(token.to_string()));
    }
    token
        .parse::<u32>()
        .map_err(|_| DateParseError::NonNumeric(token.to_string()))
}

fn parse_year(token: &str) -> Result<i32, DateParseError> {
    let value = parse_number(token)?;
    i32::try_from(value).map_err(|_| DateParseError::NonNumeric(token.to_string()))
}

/// Semester containing a month: July–December is semester 1, January–June semester 2
pub fn month_to_semester(month0: u32) -> u8 {
    if month0 >= 6 {
        1
    } else {
        2
    }
}

/// Check if a year is a leap year
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Number of days in a month. Out-of-range months have no days.
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        1 => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
        3 | 5 | 8 | 10 => 30,
        0 | 2 | 4 | 6 | 7 | 9 | 11 => 31,
        _ => 0,
    }
}

/// Budget day count for a semester.
///
/// Semester 1 is always 184 days. Semester 2 is 182 days when `year` is a
/// leap year, otherwise 181. These figures are fixed by the finance reports
/// and are not the sum of the month lengths.
pub fn days_in_semester(year: i32, semester: u8) -> u32 {
    match semester {
        1 => 184,
        2 => {
            if is_leap_year(year) {
                182
            } else {
                181
            }
        }
        _ => 0,
    }
}

/// Indonesian month name for a 0-based month
pub fn month_name(month0: u32) -> &'static str {
    match month0 {
        0 => "Januari",
        1 => "Februari",
        2 => "Maret",
        3 => "April",
        4 => "Mei",
        5 => "Juni",
        6 => "Juli",
        7 => "Agustus",
        8 => "September",
        9 => "Oktober",
        10 => "November",
        11 => "Desember",
        _ => "Bulan Tidak Valid",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(year: i32, month0: u32, day: u32) -> DateParts {
        DateParts { year, month0, day }
    }

    #[test]
    fn test_parse_day_first_shapes() {
        assert_eq!(parse_date("10/07/2025"), Ok(parts(2025, 6, 10)));
        assert_eq!(parse_date("10-07-2025"), Ok(parts(2025, 6, 10)));
        assert_eq!(parse_date("10.07.2025"), Ok(parts(2025, 6, 10)));
        assert_eq!(parse_date("  1/1/2026 "), Ok(parts(2026, 0, 1)));
    }

    #[test]
    fn test_parse_year_first_shape() {
        assert_eq!(parse_date("2025-07-10"), Ok(parts(2025, 6, 10)));
        assert_eq!(parse_date("2024/02/29"), Ok(parts(2024, 1, 29)));
    }

    #[test]
    fn test_parse_concatenated_month_year() {
        assert_eq!(parse_date("12/112025"), Ok(parts(2025, 10, 12)));
        assert_eq!(parse_date("05-012026"), Ok(parts(2026, 0, 5)));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(parse_date(""), Err(DateParseError::Empty));
        assert_eq!(parse_date("   "), Err(DateParseError::Empty));
        assert_eq!(parse_date("2025"), Err(DateParseError::TokenCount(1)));
        assert_eq!(parse_date("1/2/3/4"), Err(DateParseError::TokenCount(4)));
        assert!(matches!(parse_date("aa/07/2025"), Err(DateParseError::NonNumeric(_))));
        assert!(matches!(parse_date("12/11"), Err(DateParseError::NonNumeric(_))));
        assert_eq!(parse_date("10/13/2025"), Err(DateParseError::MonthOutOfRange(13)));
        assert_eq!(parse_date("10/00/2025"), Err(DateParseError::MonthOutOfRange(0)));
        assert_eq!(
            parse_date("29/02/2025"),
            Err(DateParseError::DayOutOfRange { year: 2025, month: 2, day: 29 })
        );
        assert!(matches!(parse_date("00/02/2025"), Err(DateParseError::DayOutOfRange { .. })));
    }

    #[test]
    fn test_parse_matches_numeric_reconstruction() {
        for year in [1999, 2000, 2024, 2025] {
            for month0 in 0..12 {
                for day in 1..=days_in_month(year, month0) {
                    let raw = format!("{:02}/{:02}/{}", day, month0 + 1, year);
                    assert_eq!(parse_date(&raw), Ok(parts(year, month0, day)), "{}", raw);
                }
            }
        }
    }

    #[test]
    fn test_month_to_semester() {
        for month0 in 0..12 {
            let semester = month_to_semester(month0);
            assert_eq!(semester == 1, month0 >= 6);
            assert!(semester == 1 || semester == 2);
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2025, 0), 31);
        assert_eq!(days_in_month(2025, 3), 30);
        assert_eq!(days_in_month(2025, 1), 28);
        assert_eq!(days_in_month(2024, 1), 29);
        assert_eq!(days_in_month(2025, 12), 0);

        for year in 1890..2110 {
            assert_eq!(days_in_month(year, 1) == 29, is_leap_year(year));
        }
    }

    #[test]
    fn test_is_leap_year() {
        assert!(!is_leap_year(2025));
        assert!(is_leap_year(2024));
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
    }

    #[test]
    fn test_days_in_semester_is_fixed_approximation() {
        assert_eq!(days_in_semester(2025, 1), 184);
        assert_eq!(days_in_semester(2024, 1), 184);
        assert_eq!(days_in_semester(2024, 2), 182);
        assert_eq!(days_in_semester(2025, 2), 181);
        assert_eq!(days_in_semester(2025, 3), 0);
    }

    #[test]
    fn test_date_parts_ordering_is_chronological() {
        assert!(parts(2024, 11, 31) < parts(2025, 0, 1));
        assert!(parts(2025, 0, 31) < parts(2025, 1, 1));
        assert_eq!(
            DateParts::from(NaiveDate::from_ymd_opt(2025, 7, 10).unwrap()),
            parts(2025, 6, 10)
        );
    }
}
