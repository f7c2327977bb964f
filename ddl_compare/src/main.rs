//! Command line entry point for ddl_compare

use anyhow::Context;
use clap::Parser;

use ddl_compare::{config, utils};

#[derive(Parser, Debug)]
#[command(name = "ddl_compare", about = "Compare DDL metadata between two databases")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cfg = config::load_from_file(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config))?;
    utils::init_logging(&cfg.logging)?;

    let client = ddl_compare::DdlCompareClient::new(cfg)
        .await
        .context("Failed to connect to the configured databases")?;

    let (result, path) = client.run().await.context("DDL comparison failed")?;

    let summary = result.summary();
    tracing::info!(
        diff_columns = summary.diff_columns,
        only_in_db1 = summary.only_in_primary,
        only_in_db2 = summary.only_in_secondary,
        report = %path.display(),
        "Done"
    );

    Ok(())
}
