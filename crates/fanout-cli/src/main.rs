use anyhow::Result;
use clap::Parser;
use std::io;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod reporter;

use cli::Cli;
use reporter::Reporter;

/// Log filter used when `RUST_LOG` is unset; covers every workspace crate.
const DEFAULT_LOG_FILTER: &str =
    "fanout=info,fanout_core=info,fanout_executor=info,fanout_tabular=info,fanout_http=info,fanout_db=info";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing; logs go to stderr so the report stays readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    let config = cli.fetch_config()?;

    let aggregate = fanout_executor::run(&config).await?;

    let stdout = io::stdout();
    Reporter::new(stdout.lock(), cli.preview_rows).report(&aggregate)?;

    Ok(())
}
