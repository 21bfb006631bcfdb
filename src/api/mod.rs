//! HTTP API module: landing page, health, status, version and docs.

pub mod doc;
pub mod handlers;
pub mod routes;

pub use doc::ApiDoc;
pub use handlers::{AppState, HealthResponse, StatusResponse, VersionResponse};
pub use routes::create_router;
