use crate::services::providers::ProviderError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Seconds a rate-limited caller is told to wait.
pub const RATE_LIMIT_RETRY_AFTER_SECS: u64 = 30;

pub const MISSING_CREDENTIAL_DETAILS: &str =
    "API key not configured. Please set GEMINI_API_KEY or API_KEY environment variable.";

#[derive(Debug, Error)]
pub enum RoadmapError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Goal is required")]
    MissingGoal,

    #[error("Request body too large")]
    BodyTooLarge,

    #[error("API key not configured")]
    MissingCredential,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Could not extract text from AI response")]
    EmptyResponse,

    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

impl RoadmapError {
    /// Failure kind reported in the `type` field of 500 bodies.
    fn kind(&self) -> &'static str {
        match self {
            RoadmapError::MethodNotAllowed
            | RoadmapError::MissingGoal
            | RoadmapError::BodyTooLarge => "ValidationError",
            RoadmapError::MissingCredential => "ConfigurationError",
            RoadmapError::Provider(_) => "BackendError",
            RoadmapError::EmptyResponse => "ExtractionError",
            RoadmapError::Parse(_) => "ParseError",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            RoadmapError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            RoadmapError::MissingGoal => StatusCode::BAD_REQUEST,
            RoadmapError::BodyTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            RoadmapError::Provider(err) if err.is_rate_limited() => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
}

impl IntoResponse for RoadmapError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            RoadmapError::MethodNotAllowed
            | RoadmapError::MissingGoal
            | RoadmapError::BodyTooLarge => ErrorResponse {
                error: self.to_string(),
                details: None,
                kind: None,
            },
            RoadmapError::MissingCredential => ErrorResponse {
                error: "Server configuration error".to_string(),
                details: Some(MISSING_CREDENTIAL_DETAILS.to_string()),
                kind: None,
            },
            RoadmapError::Provider(err) if err.is_rate_limited() => ErrorResponse {
                error: "AI Service is busy. Please try again in 30 seconds.".to_string(),
                details: Some("Quota limit reached for the free tier.".to_string()),
                kind: None,
            },
            RoadmapError::EmptyResponse => ErrorResponse {
                error: "Internal Server Error".to_string(),
                details: Some("Failed to generate roadmap - empty response".to_string()),
                kind: Some(self.kind()),
            },
            RoadmapError::Provider(_) | RoadmapError::Parse(_) => ErrorResponse {
                error: "Internal Server Error".to_string(),
                details: Some(self.to_string()),
                kind: Some(self.kind()),
            },
        };

        let mut res = (status, Json(body)).into_response();

        if status == StatusCode::TOO_MANY_REQUESTS {
            res.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(RATE_LIMIT_RETRY_AFTER_SECS),
            );
        }

        res
    }
}
