//! HTTP API handlers.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use metrics_exporter_prometheus::PrometheusHandle;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::{Config, Environment};
use crate::error::ApiError;
use crate::info::{APP_NAME, FEATURES, FRAMEWORK, RUST_VERSION, VERSION};

/// Liveness value reported by `/health`.
pub const HEALTHY: &str = "healthy";

static HOME_PAGE: Lazy<String> = Lazy::new(|| {
    include_str!("home.html")
        .replace("{{version}}", VERSION)
        .replace("{{framework}}", FRAMEWORK)
        .replace("{{rust_version}}", RUST_VERSION)
});

/// Application state shared with handlers.
#[derive(Clone)]
pub struct AppState {
    /// Process start, for uptime.
    pub started_at: Instant,
    /// Deployment environment.
    pub environment: Environment,
    /// Build label.
    pub build: Arc<str>,
    /// Prometheus handle; `/metrics` is only mounted when set.
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create new app state with default deployment metadata.
    pub fn new() -> Self {
        Self::from_config(&Config::default())
    }

    /// Create app state from the loaded configuration.
    pub fn from_config(config: &Config) -> Self {
        Self {
            started_at: Instant::now(),
            environment: config.app_env,
            build: Arc::from(config.app_build.as_str()),
            metrics: None,
        }
    }

    /// Attach a Prometheus handle.
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Seconds since the state was created.
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests.
    pub status: String,
    /// Human-readable message.
    pub message: String,
    /// RFC 3339 timestamp of the check.
    pub timestamp: String,
}

/// Application status response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    /// Application name.
    pub application: String,
    /// Service status: "running".
    pub status: String,
    /// Application version.
    pub version: String,
    /// Deployment environment.
    pub environment: String,
    /// Supported features.
    pub features: Vec<String>,
    /// Seconds since the process started.
    pub uptime_seconds: u64,
}

/// Version response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    /// Application version.
    pub version: String,
    /// Build label.
    pub build: String,
    /// Supported Rust toolchain.
    pub rust_version: String,
    /// Web framework.
    pub framework: String,
}

/// Serve the landing page.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Landing page with links to every endpoint", content_type = "text/html", body = String)
    ),
    tag = "Frontend"
)]
pub async fn home() -> Html<&'static str> {
    Html(HOME_PAGE.as_str())
}

/// Health check handler - always returns 200.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health() -> impl IntoResponse {
    let body = HealthResponse {
        status: HEALTHY.to_string(),
        message: format!("{FRAMEWORK} application is running smoothly!"),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    ([(header::CACHE_CONTROL, "no-store")], Json(body))
}

/// Status handler - returns application metadata and uptime.
#[utoipa::path(
    get,
    path = "/api/status",
    responses(
        (status = 200, description = "Application status", body = StatusResponse)
    ),
    tag = "API"
)]
pub async fn status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        application: APP_NAME.to_string(),
        status: "running".to_string(),
        version: VERSION.to_string(),
        environment: state.environment.to_string(),
        features: FEATURES.iter().map(|f| f.to_string()).collect(),
        uptime_seconds: state.uptime_seconds(),
    })
}

/// Version handler - returns version and build information.
#[utoipa::path(
    get,
    path = "/api/version",
    responses(
        (status = 200, description = "Version information", body = VersionResponse)
    ),
    tag = "API"
)]
pub async fn version(State(state): State<AppState>) -> Json<VersionResponse> {
    Json(VersionResponse {
        version: VERSION.to_string(),
        build: state.build.to_string(),
        rust_version: RUST_VERSION.to_string(),
        framework: FRAMEWORK.to_string(),
    })
}

/// Prometheus scrape handler.
pub async fn metrics(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        handle.render(),
    )
}

/// Fallback for unmatched routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_state_uses_config_metadata() {
        let config = Config {
            app_env: Environment::Production,
            app_build: "sha-1234".to_string(),
            ..Config::default()
        };
        let state = AppState::from_config(&config);

        assert_eq!(state.environment, Environment::Production);
        assert_eq!(&*state.build, "sha-1234");
        assert!(state.metrics.is_none());
        assert_eq!(state.uptime_seconds(), 0);
    }

    #[test]
    fn home_page_is_rendered() {
        assert!(HOME_PAGE.contains("CI/CD Practice Application"));
        assert!(HOME_PAGE.contains(VERSION));
        assert!(!HOME_PAGE.contains("{{"));
    }

    #[tokio::test]
    async fn version_is_stable_across_calls() {
        let state = AppState::new();
        let Json(first) = version(State(state.clone())).await;
        let Json(second) = version(State(state)).await;

        assert_eq!(first, second);
        assert_eq!(first.version, "1.0.0");
        assert_eq!(first.build, "initial");
    }

    #[tokio::test]
    async fn status_reports_environment_and_features() {
        let Json(body) = status(State(AppState::new())).await;

        assert_eq!(body.application, "CI/CD Practice App");
        assert_eq!(body.status, "running");
        assert_eq!(body.environment, "development");
        assert!(!body.features.is_empty());
    }
}
