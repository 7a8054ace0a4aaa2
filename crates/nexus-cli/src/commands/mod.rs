//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use nexus_core::GeneratorConfig;
use std::path::PathBuf;

pub mod check;
pub mod prompt;
pub mod report;

/// Nexus - Market Intelligence Synthesis
#[derive(Parser)]
#[command(name = "nexus")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to a TOML config file
    #[arg(short, long, global = true, env = "NEXUS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a market-intelligence report
    Report(report::ReportArgs),

    /// Print the prompt that would be sent to the model
    Prompt(prompt::PromptArgs),

    /// Check credentials and model connectivity
    Check(check::CheckArgs),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = GeneratorConfig::load(self.config.as_deref()).with_context(|| match &self.config {
            Some(path) => format!("Failed to load config from {}", path.display()),
            None => "Invalid NEXUS_* environment configuration".to_string(),
        })?;

        match self.command {
            Commands::Report(args) => report::execute(args, config).await,
            Commands::Prompt(args) => prompt::execute(args, &config),
            Commands::Check(args) => check::execute(args, config).await,
        }
    }
}
