//! Configuration handling for ddl_compare

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Load configuration from a YAML file
pub fn load_from_file(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .map_err(|e| Error::ConfigError(format!("Failed to read config file: {}", e)))?;

    let config: Config = serde_yaml::from_str(&config_str)
        .map_err(|e| Error::ConfigError(format!("Failed to parse config file: {}", e)))?;

    Ok(config)
}

/// Represents the complete ddl_compare configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub db1: DatabaseConfig,
    pub db2: DatabaseConfig,
    /// Which database block is the reference side, "db1" or "db2"
    pub primary_db: Option<String>,
    pub report: Option<ReportConfig>,
    pub logging: Option<LoggingConfig>,
}

impl Config {
    /// Resolve the (primary, secondary) database configurations
    ///
    /// An unrecognized `primary_db` value logs a warning and falls back to
    /// `db1`, so a typo in the config degrades a run instead of aborting it.
    pub fn primary_secondary(&self) -> (&DatabaseConfig, &DatabaseConfig) {
        match self.primary_db.as_deref() {
            Some("db2") => (&self.db2, &self.db1),
            Some("db1") | None => (&self.db1, &self.db2),
            Some(other) => {
                tracing::warn!(
                    primary_db = other,
                    "Invalid primary_db in config, defaulting to db1"
                );
                (&self.db1, &self.db2)
            }
        }
    }

    /// Resolve the report output path
    ///
    /// `DEFAULT` or an absent setting resolves to `ddl_compare_result.json`
    /// in the current directory; a `.json` extension is enforced either way.
    pub fn report_path(&self) -> PathBuf {
        let configured = self
            .report
            .as_ref()
            .and_then(|r| r.path.as_deref())
            .filter(|p| !p.is_empty() && *p != "DEFAULT");

        let mut path = match configured {
            Some(p) => PathBuf::from(p),
            None => std::env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("ddl_compare_result.json"),
        };
        if path.extension().map(|e| e.to_ascii_lowercase()) != Some("json".into()) {
            path.set_extension("json");
        }
        path
    }
}

/// Connection details for one database
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub driver: String,
    pub url: String,
    /// Human-readable label used in logs; defaults to the driver name
    pub label: Option<String>,
    /// Single schema name; `schemas` takes precedence when both are set
    pub schema: Option<String>,
    pub schemas: Option<Vec<String>>,
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,
    /// Seconds to wait between connection attempts
    #[serde(default = "default_retry_delay")]
    pub retry_delay: u64,
    pub pool_size: Option<u32>,
    pub timeout_seconds: Option<u64>,
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_delay() -> u64 {
    5
}

impl DatabaseConfig {
    /// Label for log lines
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.driver)
    }

    /// The schema names to capture, uppercased
    pub fn schema_names(&self) -> Vec<String> {
        let names = match (&self.schemas, &self.schema) {
            (Some(list), _) if !list.is_empty() => list.clone(),
            (_, Some(single)) => vec![single.clone()],
            _ => vec!["PUBLIC".to_string()],
        };
        names.into_iter().map(|s| s.to_uppercase()).collect()
    }
}

/// Report output configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReportConfig {
    pub path: Option<String>,
}

/// Logging configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    pub format: String,
    pub stdout: bool,
}
