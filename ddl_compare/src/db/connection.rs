//! Database connection handling
//!
//! Establishes sqlx pools with the retry behavior the comparison pipeline
//! relies on: either a usable connection comes back or the error surfaces
//! after the configured number of attempts.

use sqlx::{
    mysql::MySqlPoolOptions, postgres::PgPoolOptions, MySql, Pool, Postgres,
};
use std::time::Duration;

use crate::config::DatabaseConfig;
use crate::error::{Error, Result};

/// Enumeration of supported database types
#[derive(Debug, Clone)]
pub enum DatabaseConnection {
    Postgres(Pool<Postgres>),
    MySql(Pool<MySql>),
}

impl DatabaseConnection {
    /// Connect to the database, retrying on failure
    ///
    /// Attempts up to `retry_count` connections, sleeping `retry_delay`
    /// seconds between tries.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            tracing::info!(
                label = config.label(),
                attempt,
                max_attempts = config.retry_count,
                "Attempting database connection"
            );

            match Self::connect_once(config).await {
                Ok(connection) => {
                    tracing::info!(label = config.label(), "Database connection established");
                    return Ok(connection);
                }
                Err(e) if attempt < config.retry_count => {
                    tracing::error!(label = config.label(), error = %e, "Connection failed");
                    tracing::info!(seconds = config.retry_delay, "Retrying after delay");
                    tokio::time::sleep(Duration::from_secs(config.retry_delay)).await;
                }
                Err(e) => {
                    tracing::error!(
                        label = config.label(),
                        error = %e,
                        "Max retries reached, could not connect"
                    );
                    return Err(e);
                }
            }
        }
    }

    async fn connect_once(config: &DatabaseConfig) -> Result<Self> {
        let pool_size = config.pool_size.unwrap_or(5);
        let timeout_seconds = config.timeout_seconds.unwrap_or(30);

        match config.driver.as_str() {
            "postgres" => {
                let pool = PgPoolOptions::new()
                    .max_connections(pool_size)
                    .acquire_timeout(Duration::from_secs(timeout_seconds))
                    .connect(&config.url)
                    .await?;

                Ok(DatabaseConnection::Postgres(pool))
            }
            "mysql" => {
                let pool = MySqlPoolOptions::new()
                    .max_connections(pool_size)
                    .acquire_timeout(Duration::from_secs(timeout_seconds))
                    .connect(&config.url)
                    .await?;

                Ok(DatabaseConnection::MySql(pool))
            }
            _ => Err(Error::DatabaseError(format!(
                "Unsupported database driver: {}",
                config.driver
            ))),
        }
    }
}
