//! Utilities for ddl_compare

pub mod logging;

pub use logging::init_logging;
