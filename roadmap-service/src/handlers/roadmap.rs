use crate::dtos::RoadmapRequest;
use crate::error::RoadmapError;
use crate::services::metrics;
use crate::startup::AppState;
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

/// `POST /api/roadmap`
///
/// Responds with the backend's roadmap JSON exactly as parsed.
pub async fn generate_roadmap(
    State(state): State<AppState>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<serde_json::Value>, RoadmapError> {
    let body = body.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejecting roadmap request body");
        metrics::record_request("rejected");
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            RoadmapError::BodyTooLarge
        } else {
            RoadmapError::MissingGoal
        }
    })?;

    let request: RoadmapRequest = serde_json::from_slice(&body).map_err(|e| {
        tracing::debug!(error = %e, "Rejecting unreadable roadmap request body");
        metrics::record_request("rejected");
        RoadmapError::MissingGoal
    })?;

    request.validate().map_err(|_| {
        metrics::record_request("rejected");
        RoadmapError::MissingGoal
    })?;

    tracing::info!(goal_len = request.goal.len(), "Generating roadmap");

    match state.generator.generate(&request.goal).await {
        Ok(roadmap) => {
            metrics::record_request("success");
            Ok(Json(roadmap))
        }
        Err(e) => {
            let outcome = if e.status() == StatusCode::TOO_MANY_REQUESTS {
                "rate_limited"
            } else {
                "error"
            };
            metrics::record_request(outcome);
            tracing::error!(error = %e, status = %e.status(), "Roadmap generation failed");
            Err(e)
        }
    }
}

/// `OPTIONS /api/roadmap` preflight. CORS headers come from the middleware.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// Any other method on the roadmap route.
pub async fn method_not_allowed() -> RoadmapError {
    RoadmapError::MethodNotAllowed
}
