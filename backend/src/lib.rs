//! # Pesantren Report Backend
//!
//! Period bucketing and report aggregation over a boarding school's student
//! records: attendance, Quran memorization, daily worship activities and
//! pocket-money spending.
//!
//! Data lives in a single directory of YAML and CSV files (see
//! [`storage::csv`]). [`Backend`] wires the services to one such directory:
//!
//! ```no_run
//! use pesantren_report_backend::Backend;
//! use pesantren_report_backend::domain::commands::reports::StudentReportQuery;
//! use shared::Period;
//!
//! let backend = Backend::new("./data")?;
//! let data = backend.load_data()?;
//! let report = backend.report_service.student_report(
//!     &data,
//!     StudentReportQuery {
//!         student_id: "5b0e".to_string(),
//!         period: Period::Month { year: 2025, month0: 6 },
//!     },
//! )?;
//! println!("{}: {}%", report.period_label, report.memorization.percentage);
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use log::info;
use std::path::Path;

pub mod config;
pub mod domain;
pub mod storage;

pub use config::ReportingConfig;
pub use storage::csv::CsvConnection;

use domain::{ReportService, SchoolData, StudentService};
use storage::csv::ConfigRepository;
use storage::traits::ConfigStorage;

/// Services bound to one data directory
pub struct Backend {
    pub connection: CsvConnection,
    pub config_repository: ConfigRepository,
    pub student_service: StudentService,
    pub report_service: ReportService,
}

impl Backend {
    /// Open (or create) the data directory and load the reporting config
    pub fn new<P: AsRef<Path>>(data_directory: P) -> Result<Self> {
        let connection = CsvConnection::new(data_directory)?;
        let config_repository = ConfigRepository::new(connection.clone());
        let config = config_repository.get_config()?;

        info!(
            "Backend ready at {} (format {})",
            connection.base_directory().display(),
            config.data_format_version
        );

        Ok(Self {
            student_service: StudentService::new(connection.clone()),
            report_service: ReportService::new(config),
            config_repository,
            connection,
        })
    }

    /// Fresh snapshot of the registry and all records
    pub fn load_data(&self) -> Result<SchoolData> {
        SchoolData::load(&self.connection)
    }

    /// Persist a new configuration and use it for subsequent reports
    pub fn update_config(&mut self, config: ReportingConfig) -> Result<()> {
        self.config_repository.update_config(&config)?;
        self.report_service = ReportService::new(config);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::commands::reports::StudentReportQuery;
    use crate::domain::commands::students::CreateStudentCommand;
    use crate::domain::models::MemorizationRecord;
    use shared::Period;
    use tempfile::TempDir;

    #[test]
    fn test_backend_end_to_end() -> Result<()> {
        let temp = TempDir::new()?;
        let mut backend = Backend::new(temp.path())?;
        assert!(temp.path().join("reporting_config.yaml").exists());

        let student = backend
            .student_service
            .create_student(CreateStudentCommand {
                name: "Ahmad".to_string(),
                class_name: "7A".to_string(),
                level: "Tahfizh 1".to_string(),
                halaqah: None,
                enrolled_on: None,
            })?
            .student;

        let mut data = backend.load_data()?;
        data.add_memorization(MemorizationRecord {
            student_name: "AHMAD".to_string(),
            date: "15-07-2025".to_string(),
            pages_actual: 3.0,
            status: "lancar".to_string(),
            juz: None,
            surah: None,
        });
        data.save(&backend.connection)?;

        let mut config = backend.report_service.config().clone();
        config.bonus_rate_per_page = 2000.0;
        backend.update_config(config)?;

        let data = backend.load_data()?;
        let report = backend.report_service.student_report(
            &data,
            StudentReportQuery {
                student_id: student.id.clone(),
                period: Period::Month { year: 2025, month0: 6 },
            },
        )?;
        assert_eq!(report.memorization.percentage, 50);

        let bonus = backend.report_service.bonus_summary(&data);
        assert_eq!(bonus.total_bonus, 6000.0);

        let reopened = Backend::new(temp.path())?;
        assert_eq!(reopened.report_service.config().bonus_rate_per_page, 2000.0);
        Ok(())
    }
}
