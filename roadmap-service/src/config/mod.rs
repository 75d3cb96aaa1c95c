use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;
use std::time::Duration;

use crate::services::providers::gemini::{GeminiConfig, GEMINI_API_BASE};

/// Fallback chain used when `GEMINI_MODELS` is not set.
pub const DEFAULT_MODELS: &[&str] = &[
    "gemini-2.0-flash",
    "gemini-1.5-flash-latest",
    "gemini-1.5-pro-latest",
    "gemini-pro",
];

const DEFAULT_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct RoadmapConfig {
    pub common: core_config::Config,
    pub google: GoogleConfig,
    pub models: ModelConfig,
    pub provider: ProviderKind,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// `None` when neither `GEMINI_API_KEY` nor `API_KEY` is set.
    pub api_key: Option<Secret<String>>,
    pub base_url: String,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Ordered fallback list.
    pub fallback: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Gemini,
    Mock,
}

#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
}

impl RoadmapConfig {
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Resolve service settings through `lookup` instead of the process
    /// environment.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let api_key = get("GEMINI_API_KEY")
            .or_else(|| get("API_KEY"))
            .map(Secret::new);

        let fallback = match get("GEMINI_MODELS") {
            Some(list) => parse_model_list(&list),
            None => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };
        if fallback.is_empty() {
            return Err(AppError::ConfigError(anyhow::anyhow!(
                "GEMINI_MODELS must name at least one model"
            )));
        }

        let timeout_secs = match get("GEMINI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|e| {
                AppError::ConfigError(anyhow::anyhow!("GEMINI_TIMEOUT_SECS is invalid: {}", e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let provider = match get("ROADMAP_PROVIDER").as_deref() {
            None | Some("gemini") => ProviderKind::Gemini,
            Some("mock") => ProviderKind::Mock,
            Some(other) => {
                return Err(AppError::ConfigError(anyhow::anyhow!(
                    "Unknown ROADMAP_PROVIDER '{}', expected 'gemini' or 'mock'",
                    other
                )))
            }
        };

        Ok(RoadmapConfig {
            common,
            google: GoogleConfig {
                api_key,
                base_url: get("GEMINI_API_BASE").unwrap_or_else(|| GEMINI_API_BASE.to_string()),
                timeout: Duration::from_secs(timeout_secs),
            },
            models: ModelConfig { fallback },
            provider,
            observability: ObservabilityConfig {
                log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
                otlp_endpoint: get("OTLP_ENDPOINT"),
            },
        })
    }

    pub fn gemini(&self) -> GeminiConfig {
        GeminiConfig {
            base_url: self.google.base_url.clone(),
            timeout: self.google.timeout,
        }
    }
}

fn parse_model_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
