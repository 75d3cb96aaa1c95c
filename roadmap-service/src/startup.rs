//! Application startup and lifecycle management.

use crate::config::{ProviderKind, RoadmapConfig};
use crate::handlers::{
    generate_roadmap, health_check, method_not_allowed, metrics_endpoint, not_found, preflight,
    readiness_check,
};
use crate::middleware::cors_headers_middleware;
use crate::services::providers::gemini::GeminiTextProvider;
use crate::services::providers::mock::MockTextProvider;
use crate::services::providers::TextProvider;
use crate::services::RoadmapGenerator;
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use secrecy::Secret;
use service_core::error::AppError;
use service_core::middleware::{
    metrics::metrics_middleware,
    tracing::{request_id_middleware, RequestId},
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::trace::TraceLayer;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<RoadmapGenerator>,
}

impl AppState {
    pub fn new(generator: RoadmapGenerator) -> Self {
        Self {
            generator: Arc::new(generator),
        }
    }

    /// Build the state from configuration, choosing the provider it names.
    pub fn from_config(config: &RoadmapConfig) -> Result<Self, AppError> {
        let mut api_key = config.google.api_key.clone();

        let provider: Arc<dyn TextProvider> = match config.provider {
            ProviderKind::Gemini => Arc::new(
                GeminiTextProvider::new(config.gemini())
                    .map_err(|e| AppError::ConfigError(anyhow::anyhow!(e)))?,
            ),
            ProviderKind::Mock => {
                tracing::warn!("Using mock provider, responses are canned");
                // the mock never sends the key anywhere
                api_key.get_or_insert_with(|| Secret::new("mock".to_string()));
                Arc::new(MockTextProvider::new())
            }
        };

        if api_key.is_none() {
            tracing::warn!("No GEMINI_API_KEY or API_KEY set, roadmap requests will fail");
        }

        tracing::info!(
            provider = provider.name(),
            models = ?config.models.fallback,
            "Initialized roadmap generator"
        );

        Ok(Self::new(RoadmapGenerator::new(
            provider,
            api_key,
            config.models.fallback.clone(),
        )))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        .route("/metrics", get(metrics_endpoint))
        .route(
            "/api/roadmap",
            post(generate_roadmap)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .fallback(not_found)
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .extensions()
                    .get::<RequestId>()
                    .map(|id| id.0.as_str())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(from_fn(cors_headers_middleware))
        .with_state(state)
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: RoadmapConfig) -> Result<Self, AppError> {
        let state = AppState::from_config(&config)?;
        Self::with_state(&config, state).await
    }

    /// Build around an existing state, e.g. one holding a test double.
    pub async fn with_state(config: &RoadmapConfig, state: AppState) -> Result<Self, AppError> {
        let host: std::net::IpAddr = config.common.host.parse().map_err(|e| {
            AppError::ConfigError(anyhow::anyhow!(
                "Invalid host '{}': {}",
                config.common.host,
                e
            ))
        })?;

        // port 0 = random port for testing
        let addr = SocketAddr::new(host, config.common.port);
        let listener = TcpListener::bind(addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("Roadmap service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                std::io::Error::other(format!("HTTP server error: {}", e))
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
