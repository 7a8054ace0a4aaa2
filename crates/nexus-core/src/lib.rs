//! # Nexus Core
//!
//! Market-intelligence report generation for a free-text product
//! description. A hosted generative model produces the report when a
//! credential is available; otherwise, or when anything on that path
//! fails, a structurally identical report is synthesized from the input.
//!
//! Every report carries a provenance block: generated quantitative data is
//! always `ESTIMATED`, never `VERIFIED`.

pub mod config;
pub mod error;
pub mod extract;
pub mod fallback;
pub mod generator;
pub mod model;
pub mod prompt;
pub mod report;
pub mod rules;

pub use config::{GeneratorConfig, SeedPolicy};
pub use error::{ConfigError, GenerationFault, GenerationResult};
pub use generator::ReportGenerator;
pub use report::{MarketIntelligenceReport, Provenance, ReportSource};

/// Generate a report using configuration and credentials from the
/// environment. Never fails.
pub async fn generate_report(description: &str) -> MarketIntelligenceReport {
    let config = GeneratorConfig::load(None).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Invalid environment configuration, using defaults");
        GeneratorConfig::default()
    });
    ReportGenerator::from_env(&config)
        .generate_report(description)
        .await
}
