//! # Domain Module
//!
//! The reporting aggregation engine: everything between raw event records
//! and the numbers a report shows.
//!
//! ## Module Organization
//!
//! - **calendar**: date parsing, month/semester arithmetic, Indonesian names
//! - **period**: `Period` construction, membership, length, labels and the
//!   academic-month remap
//! - **record_filter**: narrows a record collection to one student and period
//! - **aggregation**: per-domain tallies, memorization targets, finance usage,
//!   the academic-year finance view and the bonus summary
//! - **classification**: percentage → status label tables
//! - **navigator**: the period cursor the dashboard pages with
//! - **school_data**: in-memory snapshot of the registry and all records
//! - **student_service**: registry CRUD
//! - **report_service**: assembles student, class and dashboard reports
//!
//! Aggregation never fails on bad data. Records with unparseable dates or
//! ambiguous student names are logged and left out.

pub mod aggregation;
pub mod calendar;
pub mod classification;
pub mod commands;
pub mod errors;
pub mod models;
pub mod navigator;
pub mod period;
pub mod record_filter;
pub mod report_service;
pub mod school_data;
pub mod student_service;

pub use errors::{DateParseError, PeriodError, StudentValidationError};
pub use navigator::{Clock, FixedClock, NavigatorMode, PeriodNavigator, SystemClock};
pub use period::PeriodExt;
pub use record_filter::{filter_by_period, StudentDirectory};
pub use report_service::ReportService;
pub use school_data::SchoolData;
pub use student_service::StudentService;
