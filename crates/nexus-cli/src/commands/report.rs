//! Report generation command.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use nexus_core::{GeneratorConfig, ReportGenerator};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::output;

#[derive(Args)]
pub struct ReportArgs {
    /// Free-text product description
    pub description: String,

    /// Write the JSON report to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Gemini model to use
    #[arg(long)]
    pub model: Option<String>,

    /// Deadline for the model call, in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Skip the model and synthesize the report
    #[arg(long)]
    pub offline: bool,

    /// Emit compact JSON
    #[arg(long)]
    pub compact: bool,
}

pub async fn execute(args: ReportArgs, mut config: GeneratorConfig) -> Result<()> {
    if let Some(model) = args.model {
        config.model = model;
    }
    if let Some(timeout) = args.timeout {
        config.timeout_secs = timeout;
    }

    debug!(
        model = %config.model,
        timeout_secs = config.timeout_secs,
        offline = args.offline,
        "Report command configured"
    );

    let generator = if args.offline {
        ReportGenerator::offline(&config)
    } else {
        ReportGenerator::from_env(&config)
    };

    let report = generator.generate_report(&args.description).await;

    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };

    match args.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            info!(path = %path.display(), source = report.data_integrity.source.as_str(), "Report written");
            output::print_report_summary(&report);
            println!("\n{} Report written to {}", "✓".green().bold(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_report_written_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let args = ReportArgs {
            description: "Electric Toothbrush For Sensitive Gums".to_string(),
            output: Some(path.clone()),
            model: None,
            timeout: None,
            offline: true,
            compact: true,
        };

        execute(args, GeneratorConfig::default()).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["top_10_products"].as_array().unwrap().len(), 10);
        assert_eq!(written["data_integrity"]["source"], "FALLBACK");
        assert_eq!(written["data_integrity"]["quantitative"], "ESTIMATED");
    }
}
