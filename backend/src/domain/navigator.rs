//! Cursor the dashboard pages through reporting periods with.
//!
//! Three configurations exist:
//! - [`NavigatorMode::CalendarMonth`]: month 0–11 of a fixed year; stepping
//!   past December wraps to January of the same year.
//! - [`NavigatorMode::AcademicMonth`]: academic index 0 (July) … 11 (June)
//!   of a fixed academic year, used by the finance monthly view.
//! - [`NavigatorMode::Semester`]: semesters keyed by academic year. Stepping
//!   back from semester 1 lands on semester 2 of the previous academic year,
//!   stepping back from semester 2 lands on semester 1 of the same one.
//!
//! Years only change through the explicit year operations, except in
//! semester mode where the transitions above carry them. Year arithmetic
//! clamps at the `i32` bounds.

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use shared::Period;

use crate::domain::calendar;
use crate::domain::period::{self, PeriodExt};

/// Source of "today" for the initial cursor position
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Wall clock in the local timezone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// Clock pinned to a date, for tests and report re-runs
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavigatorMode {
    CalendarMonth,
    AcademicMonth,
    Semester,
}

/// Current navigator position.
///
/// `year` is the calendar year in [`NavigatorMode::CalendarMonth`] and the
/// academic (start) year otherwise. `unit` is the month index, the academic
/// month index, or the semester number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub year: i32,
    pub unit: u32,
}

#[derive(Debug, Clone)]
pub struct PeriodNavigator {
    mode: NavigatorMode,
    cursor: Cursor,
}

impl PeriodNavigator {
    /// Start at the period containing the clock's current date
    pub fn new(mode: NavigatorMode, clock: &dyn Clock) -> Self {
        let today = clock.today();
        let year = today.year();
        let month0 = today.month0();

        let cursor = match mode {
            NavigatorMode::CalendarMonth => Cursor { year, unit: month0 },
            NavigatorMode::AcademicMonth => Cursor {
                year: period::academic_year_of(year, month0),
                unit: period::academic_index(month0),
            },
            NavigatorMode::Semester => Cursor {
                year: period::academic_year_of(year, month0),
                unit: calendar::month_to_semester(month0) as u32,
            },
        };

        debug!("Navigator {:?} starts at {:?} (today {})", mode, cursor, today);
        Self { mode, cursor }
    }

    pub fn mode(&self) -> NavigatorMode {
        self.mode
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// The reporting window under the cursor
    pub fn period(&self) -> Period {
        let Cursor { year, unit } = self.cursor;
        match self.mode {
            NavigatorMode::CalendarMonth => Period::Month { year, month0: unit },
            NavigatorMode::AcademicMonth => Period::Month {
                year: period::academic_calendar_year(year, unit),
                month0: period::calendar_month(unit),
            },
            NavigatorMode::Semester => {
                let semester = unit as u8;
                // Semester 2 of academic year Y is January–June of Y + 1
                let calendar_year = if semester == 2 { year.saturating_add(1) } else { year };
                Period::Semester { year: calendar_year, semester }
            }
        }
    }

    pub fn label(&self) -> String {
        self.period().label()
    }

    pub fn previous(&mut self) -> Period {
        self.cursor = match self.mode {
            NavigatorMode::CalendarMonth | NavigatorMode::AcademicMonth => Cursor {
                year: self.cursor.year,
                unit: if self.cursor.unit == 0 { 11 } else { self.cursor.unit - 1 },
            },
            NavigatorMode::Semester => {
                if self.cursor.unit == 1 {
                    Cursor { year: self.cursor.year.saturating_sub(1), unit: 2 }
                } else {
                    Cursor { year: self.cursor.year, unit: 1 }
                }
            }
        };
        self.period()
    }

    pub fn next(&mut self) -> Period {
        self.cursor = match self.mode {
            NavigatorMode::CalendarMonth | NavigatorMode::AcademicMonth => Cursor {
                year: self.cursor.year,
                unit: if self.cursor.unit >= 11 { 0 } else { self.cursor.unit + 1 },
            },
            NavigatorMode::Semester => {
                if self.cursor.unit == 2 {
                    Cursor { year: self.cursor.year.saturating_add(1), unit: 1 }
                } else {
                    Cursor { year: self.cursor.year, unit: 2 }
                }
            }
        };
        self.period()
    }

    pub fn set_year(&mut self, year: i32) -> Period {
        self.cursor.year = year;
        self.period()
    }

    pub fn previous_year(&mut self) -> Period {
        self.set_year(self.cursor.year.saturating_sub(1))
    }

    pub fn next_year(&mut self) -> Period {
        self.set_year(self.cursor.year.saturating_add(1))
    }
}
