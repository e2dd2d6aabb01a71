//! # Storage Module
//!
//! Persistence for the student registry, the raw event records and the
//! reporting configuration. The domain layer only sees the traits in
//! [`traits`]; [`csv`] keeps everything as plain files in one data directory
//! so the data stays readable and easy to back up.

pub mod csv;
pub mod traits;

pub use traits::{ConfigStorage, RecordStorage, StudentStorage};
