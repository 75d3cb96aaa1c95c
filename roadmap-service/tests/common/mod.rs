//! Test helpers for roadmap-service integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use roadmap_service::services::providers::mock::{MockOutcome, MockTextProvider};
use roadmap_service::services::RoadmapGenerator;
use roadmap_service::{build_router, AppState};
use secrecy::Secret;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_MODELS: &[&str] = &["model-a", "model-b", "model-c"];

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<MockTextProvider>,
}

impl TestApp {
    /// Router with a credential and the given backend script.
    pub fn with_script(outcomes: Vec<MockOutcome>) -> Self {
        Self::build(outcomes, Some("test-api-key"))
    }

    /// Router with no credential configured.
    pub fn without_credential() -> Self {
        Self::build(Vec::new(), None)
    }

    fn build(outcomes: Vec<MockOutcome>, api_key: Option<&str>) -> Self {
        let provider = Arc::new(MockTextProvider::scripted(outcomes));
        let generator = RoadmapGenerator::new(
            provider.clone(),
            api_key.map(|k| Secret::new(k.to_string())),
            TEST_MODELS.iter().map(|m| m.to_string()).collect(),
        );

        Self {
            router: build_router(AppState::new(generator)),
            provider,
        }
    }

    pub async fn request(&self, method: Method, body: Body) -> Response {
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri("/api/roadmap")
                    .header("content-type", "application/json")
                    .body(body)
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub async fn post_goal(&self, goal: &str) -> Response {
        let body = serde_json::json!({ "goal": goal }).to_string();
        self.request(Method::POST, Body::from(body)).await
    }
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub fn assert_cors_headers(response: &Response) {
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-credentials"], "true");
    assert_eq!(headers["access-control-allow-origin"], "*");
    assert_eq!(
        headers["access-control-allow-methods"],
        "GET,OPTIONS,PATCH,DELETE,POST,PUT"
    );
    assert_eq!(
        headers["access-control-allow-headers"],
        "X-CSRF-Token, X-Requested-With, Accept, Accept-Version, Content-Length, Content-MD5, Content-Type, Date, X-Api-Version"
    );
}

pub fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status);
}

/// A roadmap as the backend would produce it. Keys are deliberately not in
/// alphabetical order.
pub const SAMPLE_ROADMAP: &str = r#"{
  "title": "Learn Rust",
  "nodes": [
    {
      "id": "main",
      "label": "Learn Rust",
      "level": 0,
      "description": "Become productive in Rust",
      "category": "goal",
      "timeEstimate": "6-12 months",
      "children": ["basics", "ownership"],
      "resources": [
        { "title": "The Rust Book", "type": "book", "url": "https://doc.rust-lang.org/book/" },
        { "title": "Rust by Example", "type": "documentation", "url": "https://doc.rust-lang.org/rust-by-example/" }
      ]
    },
    {
      "id": "basics",
      "label": "Syntax basics",
      "level": 1,
      "description": "Variables, functions, control flow",
      "category": "basics",
      "timeEstimate": "2 weeks",
      "children": ["ghost"],
      "resources": [
        { "title": "Rustlings", "type": "course", "url": "https://rustlings.cool/" }
      ],
      "extra": { "weight": 1.5, "tags": ["x", "y"] }
    }
  ]
}"#;
