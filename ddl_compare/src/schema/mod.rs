//! Schema module for ddl_compare
//!
//! This module holds the captured metadata model and the comparison logic.

pub mod compare;
pub mod diff;
pub mod types;

// Re-export key types
pub use compare::{compare_columns, AttributeMismatch, ColumnAttribute};
pub use diff::{ColumnDiff, ComparisonResult, ComparisonSummary};
pub use types::{ColumnAttributes, MetadataSnapshot, TableSnapshot};
