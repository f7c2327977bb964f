//! Database module for ddl_compare
//!
//! This module handles database connections and catalog metadata extraction.

pub mod connection;
pub mod extractor;

// Re-export key types
pub use connection::DatabaseConnection;
pub use extractor::MetadataExtractor;
