//! Error types for ddl_compare

use thiserror::Error;

/// Result type for ddl_compare operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ddl_compare
///
/// Schema divergence is never represented here: every difference between the
/// two databases is ordinary data in a `ComparisonResult`. Errors cover
/// malformed snapshots and plumbing failures only.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Report error: {0}")]
    ReportError(String),

    #[error("Snapshot has a duplicate column '{column}' in table '{table}'")]
    DuplicateColumn { table: String, column: String },

    #[error("Snapshot has a duplicate table '{table}'")]
    DuplicateTable { table: String },

    #[error("Snapshot contains a table with an empty name")]
    EmptyTableName,

    #[error("Table '{table}' contains a column with an empty name")]
    EmptyColumnName { table: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// True for snapshot-invariant violations, which abort a comparison
    /// before any entries are produced.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Error::DuplicateColumn { .. }
                | Error::DuplicateTable { .. }
                | Error::EmptyTableName
                | Error::EmptyColumnName { .. }
        )
    }
}

/// Convert Serde JSON errors to ddl_compare errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert YAML deserialization errors to ddl_compare errors
impl From<serde_yaml::Error> for Error {
    fn from(error: serde_yaml::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
