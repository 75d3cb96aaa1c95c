//! Roadmap generation pipeline.
//!
//! prompt -> model fallback chain -> text extraction -> fence stripping
//! -> JSON parse. Each request is independent; nothing is cached.

use crate::error::RoadmapError;
use crate::models::RoadmapDocument;
use crate::services::extract::{extract_text, strip_code_fence};
use crate::services::metrics;
use crate::services::prompt::build_prompt;
use crate::services::providers::{
    GenerationRequest, ProviderError, ProviderResponse, TextProvider,
};
use secrecy::{ExposeSecret, Secret};
use std::sync::Arc;

pub struct RoadmapGenerator {
    provider: Arc<dyn TextProvider>,
    api_key: Option<Secret<String>>,
    models: Vec<String>,
}

impl RoadmapGenerator {
    /// `models` is the ordered fallback list; the first entry is tried first.
    pub fn new(
        provider: Arc<dyn TextProvider>,
        api_key: Option<Secret<String>>,
        models: Vec<String>,
    ) -> Self {
        Self {
            provider,
            api_key,
            models,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn models(&self) -> &[String] {
        &self.models
    }

    /// Generate a roadmap for `goal` and return the parsed JSON unchanged.
    pub async fn generate(&self, goal: &str) -> Result<serde_json::Value, RoadmapError> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            tracing::error!("No API key configured, rejecting request");
            RoadmapError::MissingCredential
        })?;

        let prompt = build_prompt(goal);
        let response = self
            .generate_with_fallback(api_key.expose_secret(), &prompt)
            .await?;

        let text = extract_text(&response.raw).ok_or_else(|| {
            tracing::error!(
                model = %response.model,
                raw = %response.raw,
                "Unexpected response structure"
            );
            RoadmapError::EmptyResponse
        })?;

        let roadmap: serde_json::Value = serde_json::from_str(strip_code_fence(text))?;
        log_summary(&response.model, &roadmap);

        Ok(roadmap)
    }

    /// Try each model once, in order, with no delay between attempts.
    /// The last failure is returned when every model fails.
    async fn generate_with_fallback(
        &self,
        api_key: &str,
        prompt: &str,
    ) -> Result<ProviderResponse, ProviderError> {
        let mut last_error = ProviderError::NotConfigured("no models configured".to_string());
        let provider = self.provider.name();

        for (attempt, model) in self.models.iter().enumerate() {
            tracing::debug!(model = %model, attempt, "Attempting generation");

            let request = GenerationRequest {
                api_key,
                model,
                prompt,
            };

            match self.provider.generate(&request).await {
                Ok(response) => {
                    metrics::record_provider_attempt(provider, model, "success");
                    tracing::info!(model = %model, attempt, "Generation successful");
                    return Ok(response);
                }
                Err(e) => {
                    let outcome = if e.is_rate_limited() {
                        "rate_limited"
                    } else {
                        "error"
                    };
                    metrics::record_provider_attempt(provider, model, outcome);
                    tracing::warn!(model = %model, attempt, error = %e, "Model failed");
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}

fn log_summary(model: &str, roadmap: &serde_json::Value) {
    match serde_json::from_value::<RoadmapDocument>(roadmap.clone()) {
        Ok(doc) => tracing::info!(
            model = %model,
            title = %doc.title,
            nodes = doc.nodes.len(),
            levels = ?doc.level_counts(),
            resources = doc.resource_count(),
            "Roadmap generated"
        ),
        Err(e) => tracing::debug!(
            model = %model,
            error = %e,
            "Roadmap does not match the documented shape"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::{MockOutcome, MockTextProvider};

    fn generator(provider: Arc<MockTextProvider>, models: &[&str]) -> RoadmapGenerator {
        RoadmapGenerator::new(
            provider,
            Some(Secret::new("test-key".to_string())),
            models.iter().map(|m| m.to_string()).collect(),
        )
    }

    #[tokio::test]
    async fn test_first_model_success_stops_chain() {
        let provider = Arc::new(MockTextProvider::scripted([MockOutcome::Text(
            r#"{"title":"t","nodes":[]}"#.to_string(),
        )]));
        let generator = generator(provider.clone(), &["a", "b"]);

        let roadmap = generator.generate("goal").await.unwrap();

        assert_eq!(roadmap["title"], "t");
        assert_eq!(provider.calls(), vec!["a"]);
    }

    #[tokio::test]
    async fn test_last_error_is_returned() {
        let provider = Arc::new(MockTextProvider::scripted([
            MockOutcome::RateLimited,
            MockOutcome::Fail("second failed".to_string()),
        ]));
        let generator = generator(provider.clone(), &["a", "b"]);

        let err = generator.generate("goal").await.unwrap_err();

        assert!(matches!(
            err,
            RoadmapError::Provider(ProviderError::ApiError(ref m)) if m == "second failed"
        ));
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn test_empty_model_list_is_not_configured() {
        let provider = Arc::new(MockTextProvider::new());
        let generator = generator(provider.clone(), &[]);

        let err = generator.generate("goal").await.unwrap_err();

        assert!(matches!(
            err,
            RoadmapError::Provider(ProviderError::NotConfigured(_))
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_makes_no_calls() {
        let provider = Arc::new(MockTextProvider::new());
        let generator = RoadmapGenerator::new(provider.clone(), None, vec!["a".to_string()]);

        let err = generator.generate("goal").await.unwrap_err();

        assert!(matches!(err, RoadmapError::MissingCredential));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_unrecognised_payload_is_extraction_error() {
        let provider = Arc::new(MockTextProvider::scripted([MockOutcome::Raw(
            serde_json::json!({ "candidates": [] }),
        )]));
        let generator = generator(provider, &["a"]);

        let err = generator.generate("goal").await.unwrap_err();

        assert!(matches!(err, RoadmapError::EmptyResponse));
    }
}
