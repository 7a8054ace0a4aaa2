//! Prompt preview command.

use anyhow::Result;
use clap::Args;
use nexus_core::prompt::PromptBuilder;
use nexus_core::GeneratorConfig;

#[derive(Args)]
pub struct PromptArgs {
    /// Free-text product description
    pub description: String,
}

pub fn execute(args: PromptArgs, config: &GeneratorConfig) -> Result<()> {
    let prompt = PromptBuilder::from_config(config).build(&args.description);
    println!("{}", prompt);
    Ok(())
}
