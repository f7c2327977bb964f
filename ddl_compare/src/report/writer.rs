//! Comparison report writer
//!
//! Serializes a comparison result to a JSON report with the three
//! conventional sections: DiffColumns, OnlyInDB1, OnlyInDB2.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::{Error, Result};
use crate::schema::diff::{ColumnDiff, ComparisonResult, ComparisonSummary};
use crate::schema::types::ColumnAttributes;

/// The serialized report shape
///
/// Section names follow the reporting convention: DB1 is whichever schema
/// was designated primary for the run.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: ComparisonSummary,
    #[serde(rename = "DiffColumns")]
    pub diff_columns: &'a [ColumnDiff],
    #[serde(rename = "OnlyInDB1")]
    pub only_in_db1: &'a [ColumnAttributes],
    #[serde(rename = "OnlyInDB2")]
    pub only_in_db2: &'a [ColumnAttributes],
}

/// Writes comparison results to disk
pub struct ReportWriter;

impl ReportWriter {
    /// Write the result as pretty-printed JSON at the given path
    pub fn write(result: &ComparisonResult, path: &Path) -> Result<()> {
        let report = Report {
            generated_at: Utc::now(),
            summary: result.summary(),
            diff_columns: &result.diff_columns,
            only_in_db1: &result.only_in_primary,
            only_in_db2: &result.only_in_secondary,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let file = File::create(path).map_err(|e| {
            Error::ReportError(format!("Failed to create report file {}: {}", path.display(), e))
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;

        tracing::info!(path = %path.display(), "Comparison report written");
        Ok(())
    }
}
