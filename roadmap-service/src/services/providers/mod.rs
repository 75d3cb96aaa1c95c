//! AI provider abstractions and implementations.
//!
//! The roadmap pipeline talks to its generative backend only through
//! [`TextProvider`], so the Gemini client and the scripted mock are
//! interchangeable behind an `Arc<dyn TextProvider>`.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited (429)")]
    RateLimited,

    #[error("Network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Whether the backend signalled quota exhaustion.
    ///
    /// Some failures only carry the status inside their message, so a
    /// `429` substring counts as well.
    pub fn is_rate_limited(&self) -> bool {
        match self {
            ProviderError::RateLimited => true,
            other => other.to_string().contains("429"),
        }
    }
}

/// One generation call against a single model.
#[derive(Debug, Clone, Copy)]
pub struct GenerationRequest<'a> {
    pub api_key: &'a str,
    pub model: &'a str,
    pub prompt: &'a str,
}

/// Result of a provider call.
///
/// `raw` is the backend payload as-is; text is pulled out of it by the
/// extractors in [`crate::services::extract`].
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// Model that produced the response.
    pub model: String,

    /// Untouched backend payload.
    pub raw: serde_json::Value,
}

/// Trait for text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate content for one model. No retries happen at this level.
    async fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;
}
