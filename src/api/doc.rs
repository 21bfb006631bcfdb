//! OpenAPI document served at `/openapi.json`.

use utoipa::{Modify, OpenApi};

use super::handlers;
use crate::info::{API_TITLE, DESCRIPTION, VERSION};

/// Fills the document metadata from the crate constants.
struct InfoAddon;

impl Modify for InfoAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = API_TITLE.to_string();
        openapi.info.version = VERSION.to_string();
        openapi.info.description = Some(DESCRIPTION.to_string());
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::home,
        handlers::health,
        handlers::status,
        handlers::version
    ),
    modifiers(&InfoAddon),
    tags(
        (name = "Frontend", description = "Landing page"),
        (name = "Health", description = "Liveness probe used by container orchestration"),
        (name = "API", description = "Application status and version"),
    ),
    info(
        contact(
            name = "CI/CD Practice",
            url = "https://github.com/brightalot/cicd",
        ),
        license(
            name = "MIT",
        )
    )
)]
pub struct ApiDoc;
