//! Report generation orchestrator.
//!
//! ```text
//! START → BUILD_PROMPT → ACQUIRE_MODEL ─┬─ unavailable ─────────────→ FALLBACK
//!                                        └─ CALL_MODEL ─┬─ error ────→ FALLBACK
//!                                                       └─ EXTRACT ─┬─ parse fail → FALLBACK
//!                                                                   └─ SUCCESS
//! ```
//!
//! [`ReportGenerator::try_generate`] runs the model path and returns the
//! fault; [`ReportGenerator::generate_report`] reduces any fault to the
//! fallback path.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::config::GeneratorConfig;
use crate::error::{GenerationFault, GenerationResult};
use crate::extract;
use crate::fallback::FallbackSynthesizer;
use crate::model::{ModelClient, ModelSource, Offline};
use crate::prompt::PromptBuilder;
use crate::report::{DataIntegrity, MarketIntelligenceReport};
use crate::rules;

/// Produces one report per product description.
#[derive(Clone)]
pub struct ReportGenerator {
    source: Arc<dyn ModelSource>,
    prompt: PromptBuilder,
    fallback: FallbackSynthesizer,
    timeout: Duration,
}

impl ReportGenerator {
    /// Build a generator around an injected model source.
    pub fn new<S>(source: S, config: &GeneratorConfig) -> Self
    where
        S: ModelSource + 'static,
    {
        Self {
            source: Arc::new(source),
            prompt: PromptBuilder::from_config(config),
            fallback: FallbackSynthesizer::new(config.seed_policy),
            timeout: config.timeout(),
        }
    }

    /// Generator backed by Gemini with the credential from the environment.
    pub fn from_env(config: &GeneratorConfig) -> Self {
        Self::new(ModelClient::from_env(config), config)
    }

    /// Generator that always synthesizes.
    pub fn offline(config: &GeneratorConfig) -> Self {
        Self::new(Offline, config)
    }

    /// Override the deadline for the model call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn prompt_builder(&self) -> &PromptBuilder {
        &self.prompt
    }

    /// Generate a report. Never fails: any fault on the model path is
    /// logged and replaced by a synthesized report.
    pub async fn generate_report(&self, description: &str) -> MarketIntelligenceReport {
        match self.try_generate(description).await {
            Ok(report) => report,
            Err(fault) => {
                log_fault(&fault);
                self.fallback_report(description, Some(&fault))
            }
        }
    }

    /// Run the model path only.
    pub async fn try_generate(&self, description: &str) -> GenerationResult<MarketIntelligenceReport> {
        let prompt = self.prompt.build(description);
        debug!(prompt_chars = prompt.len(), "Prompt built");

        let model = self.source.acquire()?;
        let model_name = model.name().to_string();

        let raw = match tokio::time::timeout(self.timeout, model.generate(&prompt)).await {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => return Err(GenerationFault::call(format!("{:#}", e))),
            Err(_) => {
                return Err(GenerationFault::call(format!(
                    "timed out after {}ms",
                    self.timeout.as_millis()
                )))
            }
        };
        debug!(model = %model_name, chars = raw.len(), "Model answered");

        let mut report = extract::extract_report(&raw)?;

        let violations = report.validate();
        if !violations.is_empty() {
            return Err(GenerationFault::parse(format!(
                "invariant violations: {}",
                violations.join("; ")
            )));
        }

        rules::enforce_competitor_rules(&mut report.top_10_products, description);
        report.data_integrity = DataIntegrity::from_model(&model_name);
        report.mark_estimated();

        info!(model = %model_name, niche = %report.niche_name, "Generated report from model");
        Ok(report)
    }

    /// Synthesize a report directly, recording `cause` as the reason.
    pub fn fallback_report(
        &self,
        description: &str,
        cause: Option<&GenerationFault>,
    ) -> MarketIntelligenceReport {
        self.fallback.synthesize(description, cause)
    }
}

fn log_fault(fault: &GenerationFault) {
    match fault {
        GenerationFault::CredentialMissing { .. } => {
            warn!(fault = fault.kind(), cause = %fault, "Model unavailable, using fallback synthesis")
        }
        _ => error!(fault = fault.kind(), cause = %fault, "Model path failed, using fallback synthesis"),
    }
}
