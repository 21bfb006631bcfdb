//! CI/CD practice web service.
//!
//! A small axum application with a landing page, a health check, status and
//! version endpoints, and generated OpenAPI documentation. It exists to be
//! built, tested, containerized and deployed by the pipelines in
//! `.github/workflows`.
//!
//! # Endpoints
//!
//! ```text
//! GET /              landing page (text/html)
//! GET /health        {"status":"healthy", ...}
//! GET /api/status    application status
//! GET /api/version   version and build
//! GET /docs          Swagger UI
//! GET /redoc         ReDoc
//! GET /openapi.json  OpenAPI schema
//! GET /metrics       Prometheus exposition (when enabled)
//! ```
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`info`]: Static application metadata
//! - [`api`]: HTTP handlers, router and OpenAPI document
//! - [`metrics`]: HTTP request metrics
//! - [`probe`]: Health probe client used by the container and deploy checks
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod info;
pub mod metrics;
pub mod probe;
pub mod utils;

pub use config::Config;
pub use error::{AppError, Result};
