//! Logging utilities for ddl_compare

use tracing::Level;
use tracing_subscriber::{fmt, EnvFilter};
use std::fs::File;
use std::path::Path;

use crate::config::LoggingConfig;
use crate::error::{Error, Result};

/// Initialize logging based on configuration
///
/// Without a logging section the subscriber is left to the environment
/// (RUST_LOG or the caller's own setup).
pub fn init_logging(config: &Option<LoggingConfig>) -> Result<()> {
    let config = match config {
        Some(cfg) => cfg,
        None => return Ok(()),
    };

    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let env_filter = EnvFilter::from_default_env()
        .add_directive(format!("ddl_compare={}", level).parse().unwrap());
    let json = config.format.to_lowercase() == "json";

    if let Some(file_path) = &config.file {
        if let Some(parent) = Path::new(file_path).parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = File::create(file_path)?;
        set_subscriber(env_filter, json, std::sync::Arc::new(file))?;
    } else if config.stdout {
        set_subscriber(env_filter, json, std::io::stdout)?;
    }

    Ok(())
}

fn set_subscriber<W>(env_filter: EnvFilter, json: bool, writer: W) -> Result<()>
where
    W: for<'a> fmt::MakeWriter<'a> + Send + Sync + 'static,
{
    let result = if json {
        let subscriber = fmt::Subscriber::builder()
            .json()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    } else {
        let subscriber = fmt::Subscriber::builder()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
    };

    result.map_err(|e| Error::ConfigError(format!("Failed to install logger: {}", e)))
}
