//! Percentage → status label lookups.
//!
//! Both tables are evaluated top to bottom and the first matching row wins.
//! Every real number, including NaN, maps to exactly one label.

use shared::{FinanceStatus, MemorizationStatus};

/// Memorization status for a percentage of the level target
pub fn classify_memorization(percentage: f64) -> MemorizationStatus {
    if percentage >= 80.0 {
        MemorizationStatus::BaikSekali
    } else if percentage >= 60.0 {
        MemorizationStatus::Baik
    } else if percentage >= 40.0 {
        MemorizationStatus::Cukup
    } else if percentage >= 20.0 {
        MemorizationStatus::Kurang
    } else {
        MemorizationStatus::SangatKurang
    }
}

/// Finance status for a percentage of the period budget
pub fn classify_finance(percentage: f64) -> FinanceStatus {
    if percentage <= 50.0 {
        FinanceStatus::SangatHemat
    } else if percentage <= 100.0 {
        FinanceStatus::Hemat
    } else if percentage <= 150.0 {
        FinanceStatus::CukupProporsional
    } else if percentage <= 200.0 {
        FinanceStatus::Boros
    } else {
        FinanceStatus::SangatBoros
    }
}
