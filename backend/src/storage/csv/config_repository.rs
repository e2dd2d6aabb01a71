//! # Reporting Config Repository
//!
//! Stores [`ReportingConfig`] as `reporting_config.yaml` at the root of the
//! data directory. A missing file is created with defaults on first read.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::config::ReportingConfig;
use crate::storage::traits::ConfigStorage;

const CONFIG_FILE: &str = "reporting_config.yaml";

#[derive(Debug, Clone)]
pub struct ConfigRepository {
    connection: CsvConnection,
}

impl ConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn config_path(&self) -> PathBuf {
        self.connection.file_path(CONFIG_FILE)
    }

    /// Load config from file, creating the default if it doesn't exist
    fn load_or_create_config(&self) -> Result<ReportingConfig> {
        let config_path = self.config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: ReportingConfig = serde_yaml::from_str(&yaml_content)
                .with_context(|| format!("Failed to parse {}", config_path.display()))?;
            debug!("Loaded reporting config from {:?}", config_path);
            Ok(config)
        } else {
            let config = ReportingConfig::default();
            self.save_config(&config)?;
            info!("Created default reporting config at {:?}", config_path);
            Ok(config)
        }
    }

    fn save_config(&self, config: &ReportingConfig) -> Result<()> {
        let yaml_content = serde_yaml::to_string(config)?;
        self.connection
            .write_atomic(&self.config_path(), yaml_content.as_bytes())?;
        debug!("Saved reporting config to {:?}", self.config_path());
        Ok(())
    }
}

impl ConfigStorage for ConfigRepository {
    fn get_config(&self) -> Result<ReportingConfig> {
        self.load_or_create_config()
    }

    fn update_config(&self, config: &ReportingConfig) -> Result<()> {
        self.save_config(config)?;
        info!(
            "Updated reporting config: daily rate {}, bonus rate {}",
            config.daily_expense_rate, config.bonus_rate_per_page
        );
        Ok(())
    }
}
