//! Report module for ddl_compare

pub mod writer;

pub use writer::{Report, ReportWriter};
