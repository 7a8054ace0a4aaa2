//! Credential lookup and model acquisition.

use tracing::debug;

use super::{GeminiModel, GenerativeModel, ModelSource};
use crate::config::GeneratorConfig;
use crate::error::{GenerationFault, GenerationResult};

/// Credential variables, in lookup order.
pub const CREDENTIAL_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];

type Lookup = Box<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Builds a [`GeminiModel`] from the credential in the environment.
///
/// Nothing is cached: every [`ModelSource::acquire`] re-reads the credential
/// and builds a fresh handle.
pub struct ModelClient {
    config: GeneratorConfig,
    lookup: Lookup,
}

impl ModelClient {
    /// Read credentials from the process environment.
    pub fn from_env(config: &GeneratorConfig) -> Self {
        Self::with_lookup(config, |key| std::env::var(key).ok())
    }

    /// Read credentials through a custom lookup.
    pub fn with_lookup<F>(config: &GeneratorConfig, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String> + Send + Sync + 'static,
    {
        Self {
            config: config.clone(),
            lookup: Box::new(lookup),
        }
    }

    /// First non-empty credential and the variable it came from.
    pub fn credential(&self) -> Option<(&'static str, String)> {
        CREDENTIAL_VARS.iter().find_map(|var| {
            (self.lookup)(var)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .map(|v| (*var, v))
        })
    }
}

impl ModelSource for ModelClient {
    fn acquire(&self) -> GenerationResult<Box<dyn GenerativeModel>> {
        let Some((var, api_key)) = self.credential() else {
            debug!(checked = ?CREDENTIAL_VARS, "No model credential set");
            return Err(GenerationFault::CredentialMissing {
                checked: CREDENTIAL_VARS.join(", "),
            });
        };

        match GeminiModel::new(&api_key, &self.config) {
            Ok(model) => {
                debug!(credential = var, model = %self.config.model, "Model handle acquired");
                Ok(Box::new(model))
            }
            Err(e) => {
                debug!(credential = var, error = %e, "Failed to initialize model");
                Err(GenerationFault::initialization(format!("{:#}", e)))
            }
        }
    }
}
