//! HTTP handlers for the roadmap service.

pub mod health;
pub mod roadmap;

pub use health::{health_check, metrics_endpoint, not_found, readiness_check};
pub use roadmap::{generate_roadmap, method_not_allowed, preflight};
