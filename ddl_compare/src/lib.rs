//! ddl_compare: compares table/column DDL metadata between two databases
//!
//! ddl_compare connects to a primary and a secondary database, captures a
//! snapshot of each schema's column metadata, and classifies every
//! discrepancy: columns whose attributes differ, columns only in the primary
//! schema, and columns only in the secondary schema. The result is written
//! as a JSON report with the conventional DiffColumns / OnlyInDB1 /
//! OnlyInDB2 sections.

pub mod config;
pub mod db;
pub mod error;
pub mod report;
pub mod schema;
pub mod utils;

use std::path::PathBuf;

// Re-export main types for easier access
pub use config::Config;
pub use db::connection::DatabaseConnection;
pub use db::extractor::MetadataExtractor;
pub use error::{Error, Result};
pub use report::writer::ReportWriter;
pub use schema::compare::{compare_columns, AttributeMismatch, ColumnAttribute};
pub use schema::diff::{ColumnDiff, ComparisonResult, ComparisonSummary};
pub use schema::types::{ColumnAttributes, MetadataSnapshot, TableSnapshot};

/// Initialize ddl_compare with the specified configuration file
pub async fn init(config_path: &str) -> Result<DdlCompareClient> {
    let config = config::load_from_file(config_path)?;
    DdlCompareClient::new(config).await
}

/// The main client for running a comparison pipeline
pub struct DdlCompareClient {
    config: Config,
    primary: MetadataExtractor,
    primary_schemas: Vec<String>,
    secondary: MetadataExtractor,
    secondary_schemas: Vec<String>,
}

impl DdlCompareClient {
    /// Connect to both databases, primary first
    pub async fn new(config: Config) -> Result<Self> {
        let (primary_cfg, secondary_cfg) = config.primary_secondary();

        let primary_conn = DatabaseConnection::connect(primary_cfg).await?;
        tracing::info!(label = primary_cfg.label(), "Connected to PRIMARY database");
        let secondary_conn = DatabaseConnection::connect(secondary_cfg).await?;
        tracing::info!(label = secondary_cfg.label(), "Connected to SECONDARY database");

        let primary = MetadataExtractor::new(primary_conn, primary_cfg.label());
        let primary_schemas = primary_cfg.schema_names();
        let secondary = MetadataExtractor::new(secondary_conn, secondary_cfg.label());
        let secondary_schemas = secondary_cfg.schema_names();

        Ok(Self {
            config,
            primary,
            primary_schemas,
            secondary,
            secondary_schemas,
        })
    }

    /// Capture both schema snapshots concurrently
    pub async fn capture_snapshots(&self) -> Result<(MetadataSnapshot, MetadataSnapshot)> {
        tokio::try_join!(
            self.primary.snapshot(&self.primary_schemas),
            self.secondary.snapshot(&self.secondary_schemas),
        )
    }

    /// Capture both snapshots and compare them
    ///
    /// If either capture returns no tables at all the comparison is skipped
    /// with a warning and an empty result comes back, so a misconfigured
    /// schema filter doesn't get reported as hundreds of one-sided columns.
    pub async fn compare(&self) -> Result<ComparisonResult> {
        let (primary_snapshot, secondary_snapshot) = self.capture_snapshots().await?;

        if primary_snapshot.is_empty() {
            tracing::warn!(
                label = self.primary.label(),
                "No column metadata returned from the primary database, skipping comparison"
            );
            return Ok(ComparisonResult::default());
        }
        if secondary_snapshot.is_empty() {
            tracing::warn!(
                label = self.secondary.label(),
                "No column metadata returned from the secondary database, skipping comparison"
            );
            return Ok(ComparisonResult::default());
        }

        let result = ComparisonResult::generate(&primary_snapshot, &secondary_snapshot)?;
        tracing::info!(
            diff_columns = result.summary().diff_columns,
            only_in_primary = result.summary().only_in_primary,
            only_in_secondary = result.summary().only_in_secondary,
            "DDL comparison completed"
        );
        Ok(result)
    }

    /// Write the comparison report to the configured path
    pub fn write_report(&self, result: &ComparisonResult) -> Result<PathBuf> {
        let path = self.config.report_path();
        ReportWriter::write(result, &path)?;
        Ok(path)
    }

    /// Complete workflow: capture, compare, write the report
    pub async fn run(&self) -> Result<(ComparisonResult, PathBuf)> {
        let result = self.compare().await?;
        if result.is_empty() {
            tracing::info!("No schema differences found");
        }
        let path = self.write_report(&result)?;
        Ok((result, path))
    }
}
