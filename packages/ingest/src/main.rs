#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI entry point for the daily incident summary ingester.

use clap::Parser;
use normanpd_ingest::IngestConfig;

#[derive(Parser)]
#[command(
    name = "normanpd",
    about = "Ingest a Norman PD daily incident summary and print counts by nature"
)]
struct Cli {
    /// URL of the daily incident summary PDF
    #[arg(long)]
    incidents: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();

    let config = IngestConfig::from_env(&cli.incidents);
    log::debug!("Using database at {}", config.db_path.display());

    let counts = normanpd_ingest::run(&config).await?;
    normanpd_ingest::report(&counts, std::io::stdout().lock())?;

    Ok(())
}
