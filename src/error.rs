//! Unified error types for the service.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Unified error type for the service.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration loading error.
    #[error("configuration error: {0}")]
    Config(#[from] envy::Error),

    /// Configuration loaded but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Health probe error.
    #[error("health probe error: {0}")]
    Probe(#[from] ProbeError),

    /// Prometheus recorder could not be installed.
    #[error("metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Health probe errors.
#[derive(Error, Debug)]
pub enum ProbeError {
    /// The request could not be sent or the body could not be decoded.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The endpoint answered with something other than 200.
    #[error("unexpected status code {0}")]
    UnexpectedStatus(u16),

    /// The endpoint answered 200 but reported a non-healthy status.
    #[error("service reported status {0:?}")]
    NotHealthy(String),

    /// Retries exhausted.
    #[error("{url} still unhealthy after {attempts} attempts: {reason}")]
    Unhealthy {
        /// Probed URL.
        url: String,
        /// Total attempts made, including those inside the start period.
        attempts: u32,
        /// Last failure.
        reason: String,
    },
}

/// Errors returned to HTTP clients.
#[derive(Debug)]
pub enum ApiError {
    /// No route matched the request.
    NotFound,
}

/// JSON body for error responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable reason.
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
        };

        let body = ErrorResponse {
            detail: detail.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Convenient Result type alias.
pub type Result<T> = std::result::Result<T, AppError>;
