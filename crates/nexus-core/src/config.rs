//! Generator configuration.
//!
//! Values come from built-in defaults, an optional TOML file, and
//! `NEXUS_*` environment overrides, in that order. The API credential is
//! never part of the config; see [`crate::model::client`].

use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

/// Default Gemini REST base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default generation model.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default deadline for one model call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Default language for narrative fields.
pub const DEFAULT_LANGUAGE: &str = "español";

/// How the fallback synthesizer seeds its random draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeedPolicy {
    /// Seed from a stable hash of the description: same input, same report.
    #[default]
    FromInput,
    /// Fresh entropy on every call.
    Entropy,
}

impl FromStr for SeedPolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "from_input" | "input" | "seeded" => Ok(Self::FromInput),
            "entropy" | "random" => Ok(Self::Entropy),
            other => Err(ConfigError::InvalidValue {
                key: "seed_policy".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub model: String,
    pub api_url: String,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_output_tokens: u32,
    /// Language the model must use for narrative fields.
    pub language: String,
    /// Median niche price used to anchor financial reasoning in the prompt.
    pub avg_price: Option<f64>,
    pub seed_policy: SeedPolicy,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: 0.7,
            max_output_tokens: 8192,
            language: DEFAULT_LANGUAGE.to_string(),
            avg_price: None,
            seed_policy: SeedPolicy::default(),
        }
    }
}

impl GeneratorConfig {
    /// Load from an optional TOML file, then apply process environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Parse a TOML config file. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        debug!(path = %path.display(), model = %config.model, "Loaded generator config");
        Ok(config)
    }

    /// Apply `NEXUS_*` overrides read through `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(model) = get("NEXUS_MODEL") {
            self.model = model;
        }
        if let Some(url) = get("GEMINI_API_URL") {
            self.api_url = url.trim_end_matches('/').to_string();
        }
        if let Some(raw) = get("NEXUS_TIMEOUT_SECS") {
            self.timeout_secs = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: "NEXUS_TIMEOUT_SECS".to_string(),
                value: raw.clone(),
            })?;
        }
        if let Some(language) = get("NEXUS_LANGUAGE") {
            self.language = language;
        }
        if let Some(raw) = get("NEXUS_SEED_POLICY") {
            self.seed_policy = raw.parse()?;
        }
        Ok(self)
    }

    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.timeout_secs, 60);
        assert_eq!(config.seed_policy, SeedPolicy::FromInput);
    }

    #[test]
    fn test_env_overrides() {
        let config = GeneratorConfig::default()
            .with_overrides(lookup(&[
                ("NEXUS_MODEL", "gemini-1.5-pro"),
                ("NEXUS_TIMEOUT_SECS", "15"),
                ("NEXUS_SEED_POLICY", "entropy"),
                ("GEMINI_API_URL", "http://localhost:8080/"),
                ("NEXUS_LANGUAGE", ""),
            ]))
            .unwrap();
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.seed_policy, SeedPolicy::Entropy);
        assert_eq!(config.api_url, "http://localhost:8080");
        assert_eq!(config.language, DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_invalid_timeout_rejected() {
        let result = GeneratorConfig::default().with_overrides(lookup(&[("NEXUS_TIMEOUT_SECS", "soon")]));
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_from_file_keeps_defaults_for_missing_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = \"gemini-2.5-flash\"\nseed_policy = \"entropy\"\navg_price = 24.99").unwrap();

        let config = GeneratorConfig::from_file(file.path()).unwrap();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.seed_policy, SeedPolicy::Entropy);
        assert_eq!(config.avg_price, Some(24.99));
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }

    #[test]
    fn test_from_file_rejects_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout_secs = \"many\"").unwrap();
        assert!(matches!(GeneratorConfig::from_file(file.path()), Err(ConfigError::Parse(_))));
    }
}
