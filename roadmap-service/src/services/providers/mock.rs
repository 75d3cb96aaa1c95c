//! Mock provider implementation for testing and local runs.

use super::{GenerationRequest, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use serde_json::json;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

/// Canned roadmap returned when the script is empty.
const SAMPLE_ROADMAP: &str = r#"{
  "title": "Sample Roadmap",
  "nodes": [
    {
      "id": "main",
      "label": "Main Goal",
      "level": 0,
      "description": "Reach the goal step by step",
      "category": "goal",
      "timeEstimate": "3-6 months",
      "children": ["basics1"],
      "resources": [
        { "title": "MDN Web Docs", "type": "documentation", "url": "https://developer.mozilla.org" }
      ]
    },
    {
      "id": "basics1",
      "label": "Learn the basics",
      "level": 1,
      "description": "Cover the fundamentals first",
      "category": "basics",
      "timeEstimate": "2-4 weeks",
      "children": [],
      "resources": [
        { "title": "freeCodeCamp", "type": "course", "url": "https://www.freecodecamp.org" }
      ]
    }
  ]
}"#;

/// What the mock does on one call.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Succeed with a Gemini-shaped payload carrying this text.
    Text(String),
    /// Succeed with this exact payload.
    Raw(serde_json::Value),
    /// Fail with HTTP 429.
    RateLimited,
    /// Fail with an API error carrying this message.
    Fail(String),
}

/// Mock text provider.
///
/// Outcomes are consumed in order, one per call. Once the script runs out
/// every call returns the sample roadmap. The model of every call is
/// recorded.
#[derive(Default)]
pub struct MockTextProvider {
    script: Mutex<VecDeque<MockOutcome>>,
    calls: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Models requested so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Wrap text the way `generateContent` does.
pub fn candidate_payload(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            {
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }
        ]
    })
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        request: &GenerationRequest<'_>,
    ) -> Result<ProviderResponse, ProviderError> {
        lock(&self.calls).push(request.model.to_string());

        let outcome = lock(&self.script).pop_front();
        let raw = match outcome {
            Some(MockOutcome::Text(text)) => candidate_payload(&text),
            Some(MockOutcome::Raw(raw)) => raw,
            Some(MockOutcome::RateLimited) => return Err(ProviderError::RateLimited),
            Some(MockOutcome::Fail(message)) => return Err(ProviderError::ApiError(message)),
            None => candidate_payload(SAMPLE_ROADMAP),
        };

        Ok(ProviderResponse {
            model: request.model.to_string(),
            raw,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request<'a>(model: &'a str) -> GenerationRequest<'a> {
        GenerationRequest {
            api_key: "test-key",
            model,
            prompt: "prompt",
        }
    }

    #[tokio::test]
    async fn test_script_is_consumed_in_order() {
        let provider = MockTextProvider::scripted([
            MockOutcome::Fail("boom".to_string()),
            MockOutcome::Text("{}".to_string()),
        ]);

        assert!(provider.generate(&request("a")).await.is_err());
        let response = provider.generate(&request("b")).await.unwrap();

        assert_eq!(response.model, "b");
        assert_eq!(provider.calls(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_empty_script_returns_sample_roadmap() {
        let provider = MockTextProvider::new();
        let response = provider.generate(&request("m")).await.unwrap();

        let text = response.raw["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .unwrap();
        let parsed: serde_json::Value = serde_json::from_str(text).unwrap();
        assert_eq!(parsed["title"], "Sample Roadmap");
    }
}
