//! Nexus CLI - market-intelligence reports from a product description.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

use commands::Cli;

/// Install the tracing subscriber once for the whole process.
///
/// Logs go to stderr so a report written to stdout stays valid JSON.
fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "nexus=debug,nexus_core=debug"
    } else {
        "nexus=info,nexus_core=info"
    };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    cli.execute().await
}
