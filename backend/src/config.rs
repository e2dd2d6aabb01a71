//! # Reporting Configuration
//!
//! Rates and tracked activity keys used by the aggregators. Persisted as
//! `reporting_config.yaml` in the data directory:
//!
//! ```yaml
//! daily_expense_rate: 15000.0
//! bonus_rate_per_page: 1500.0
//! tracked_activities: [tahajud, dhuha, shaum, piket, tilawah, murajaah]
//! data_format_version: "1.0"
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_DAILY_EXPENSE_RATE: f64 = 15000.0;
pub const DEFAULT_BONUS_RATE_PER_PAGE: f64 = 1500.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportingConfig {
    /// Allowed spending per day, in currency minor units
    pub daily_expense_rate: f64,
    /// Bonus paid per memorized page, in currency minor units
    pub bonus_rate_per_page: f64,
    /// Activity keys counted by the activity tally, in display order
    pub tracked_activities: Vec<String>,
    pub data_format_version: String,
}

impl Default for ReportingConfig {
    fn default() -> Self {
        Self {
            daily_expense_rate: DEFAULT_DAILY_EXPENSE_RATE,
            bonus_rate_per_page: DEFAULT_BONUS_RATE_PER_PAGE,
            tracked_activities: ["tahajud", "dhuha", "shaum", "piket", "tilawah", "murajaah"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            data_format_version: "1.0".to_string(),
        }
    }
}
