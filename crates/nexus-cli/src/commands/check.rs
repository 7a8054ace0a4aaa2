//! Credential and connectivity check.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use nexus_core::model::{ModelClient, ModelSource, CREDENTIAL_VARS};
use nexus_core::GeneratorConfig;

const PROBE_PROMPT: &str = "Hello, this is a connectivity test. Reply with 'OK'.";

#[derive(Args)]
pub struct CheckArgs {
    /// Only check the credential, do not call the model
    #[arg(long)]
    pub no_call: bool,
}

pub async fn execute(args: CheckArgs, config: GeneratorConfig) -> Result<()> {
    let client = ModelClient::from_env(&config);

    let Some((var, key)) = client.credential() else {
        println!(
            "{} No credential found ({}). Reports will use fallback synthesis.",
            "!".yellow(),
            CREDENTIAL_VARS.join(", ")
        );
        return Ok(());
    };
    println!(
        "{} Credential found in {} ({})",
        "✓".green().bold(),
        var.bold(),
        mask(&key).dimmed()
    );

    if args.no_call {
        return Ok(());
    }

    let model = match client.acquire() {
        Ok(model) => model,
        Err(fault) => {
            println!("{} {}", "✗".red().bold(), fault);
            return Ok(());
        }
    };

    println!("{} Probing {} ...", "→".dimmed(), model.name());
    match tokio::time::timeout(config.timeout(), model.generate(PROBE_PROMPT)).await {
        Ok(Ok(answer)) => println!("{} Model answered: {}", "✓".green().bold(), answer.trim()),
        Ok(Err(e)) => println!("{} Model call failed: {:#}", "✗".red().bold(), e),
        Err(_) => println!(
            "{} Model call timed out after {}s",
            "✗".red().bold(),
            config.timeout_secs
        ),
    }
    Ok(())
}

/// Show only the first characters of a secret.
fn mask(key: &str) -> String {
    let visible: String = key.chars().take(5).collect();
    format!("{}…", visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_hides_secret() {
        assert_eq!(mask("AIzaSyExampleKey"), "AIzaS…");
        assert_eq!(mask("ab"), "ab…");
    }
}
