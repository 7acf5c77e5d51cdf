//! AI provider abstraction.
//!
//! Trait-based seam over the text-generation backend so handlers and tests
//! are not tied to a concrete API.

pub mod gemini;

use async_trait::async_trait;
use service_core::error::AppError;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl From<ProviderError> for AppError {
    fn from(err: ProviderError) -> Self {
        match err {
            ProviderError::NotConfigured(msg) => AppError::BadRequest(anyhow::anyhow!(msg)),
            other => AppError::UpstreamError(format!("Content generation failed: {}", other)),
        }
    }
}

/// Trait for single-turn text generation providers.
///
/// The API key travels with each call: it is supplied by the caller of the
/// HTTP endpoint, not by service configuration.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate text for a prompt, returning the raw model output.
    async fn generate(&self, prompt: &str, api_key: &str) -> Result<String, ProviderError>;
}
