//! Generative model seam.
//!
//! [`ModelSource`] acquires a handle per request; [`GenerativeModel`] is the
//! handle itself. Both are injected into the generator so callers and tests
//! choose the backend.

pub mod client;
pub mod gemini;

use async_trait::async_trait;

use crate::error::GenerationResult;

pub use client::{ModelClient, CREDENTIAL_VARS};
pub use gemini::GeminiModel;

/// A hosted model that turns a prompt into raw text.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Model identifier, recorded in report provenance.
    fn name(&self) -> &str;

    /// Send one prompt and return the raw answer text.
    async fn generate(&self, prompt: &str) -> anyhow::Result<String>;
}

/// Acquires a model handle for one generation request.
pub trait ModelSource: Send + Sync {
    /// `Err(CredentialMissing)` is the normal "no model configured" state.
    fn acquire(&self) -> GenerationResult<Box<dyn GenerativeModel>>;
}

/// A source that never has a model; forces the fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl ModelSource for Offline {
    fn acquire(&self) -> GenerationResult<Box<dyn GenerativeModel>> {
        Err(crate::error::GenerationFault::CredentialMissing {
            checked: "offline mode".to_string(),
        })
    }
}
