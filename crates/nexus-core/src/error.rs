//! Error types for report generation.

use thiserror::Error;

/// Why the model path could not produce a report.
///
/// Every variant is recoverable: the generator logs it and routes the
/// request to the fallback synthesizer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationFault {
    #[error("No API credential found (checked {checked})")]
    CredentialMissing { checked: String },

    #[error("Model initialization failed: {cause}")]
    ModelInitialization { cause: String },

    #[error("Model call failed: {cause}")]
    ModelCall { cause: String },

    #[error("Model response could not be parsed: {cause}")]
    ResponseParse { cause: String },
}

impl GenerationFault {
    pub fn initialization(cause: impl Into<String>) -> Self {
        Self::ModelInitialization { cause: cause.into() }
    }

    pub fn call(cause: impl Into<String>) -> Self {
        Self::ModelCall { cause: cause.into() }
    }

    pub fn parse(cause: impl Into<String>) -> Self {
        Self::ResponseParse { cause: cause.into() }
    }

    /// Stable identifier used in logs and in the report provenance block.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::CredentialMissing { .. } => "credential_missing",
            Self::ModelInitialization { .. } => "model_initialization",
            Self::ModelCall { .. } => "model_call",
            Self::ResponseParse { .. } => "response_parse",
        }
    }
}

/// Result type for the model path.
pub type GenerationResult<T> = Result<T, GenerationFault>;

/// Configuration loading errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fault_messages_carry_cause() {
        let fault = GenerationFault::call("HTTP 429: quota exceeded");
        assert_eq!(fault.to_string(), "Model call failed: HTTP 429: quota exceeded");
        assert_eq!(fault.kind(), "model_call");
    }

    #[test]
    fn test_credential_missing_lists_variables() {
        let fault = GenerationFault::CredentialMissing {
            checked: "GEMINI_API_KEY, GOOGLE_API_KEY".to_string(),
        };
        assert!(fault.to_string().contains("GOOGLE_API_KEY"));
        assert_eq!(fault.kind(), "credential_missing");
    }
}
