//! Static application metadata shared by handlers and the OpenAPI document.

use serde::Serialize;

/// Human-readable application name.
pub const APP_NAME: &str = "CI/CD Practice App";

/// Title of the generated API documentation.
pub const API_TITLE: &str = "CI/CD Practice API";

/// Application version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Web framework serving the API.
pub const FRAMEWORK: &str = "axum";

/// Minimum supported Rust toolchain.
pub const RUST_VERSION: &str = "1.80+";

/// One-line description used in the docs and `app_info`.
pub const DESCRIPTION: &str =
    "axum application for practicing CI/CD pipelines with GitHub Actions";

/// Feature list reported by `/api/status`.
pub const FEATURES: [&str; 5] = [
    "Health Check",
    "Auto-generated API docs",
    "Type validation",
    "Async support",
    "CI/CD Ready",
];

/// Application metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppInfo {
    /// Application name.
    pub name: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Web framework serving the API.
    pub framework: &'static str,
}

/// Returns the application metadata.
pub fn app_info() -> AppInfo {
    AppInfo {
        name: APP_NAME,
        version: VERSION,
        description: DESCRIPTION,
        framework: FRAMEWORK,
    }
}
