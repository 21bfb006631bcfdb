//! HTTP API route definitions.

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use super::doc::ApiDoc;
use super::handlers::{health, home, metrics, not_found, status, version, AppState};
use crate::metrics::track_http;

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    let metrics_handle = state.metrics.clone();

    let mut router = Router::new()
        // Frontend
        .route("/", get(home))
        // Health endpoint
        .route("/health", get(health))
        // API endpoints
        .route("/api/status", get(status))
        .route("/api/version", get(version))
        .with_state(state)
        // Documentation
        .merge(SwaggerUi::new("/docs").url("/openapi.json", ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()));

    if let Some(handle) = metrics_handle {
        router = router.merge(Router::new().route("/metrics", get(metrics)).with_state(handle));
    }

    router
        .fallback(not_found)
        .layer(middleware::from_fn(track_http))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use axum::response::Response;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    async fn get_path(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn home_page_is_html() {
        let response = get_path(create_router(AppState::new()), "/").await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));

        let text = body_text(response).await;
        assert!(text.contains("CI/CD Practice Application"));
        assert!(text.contains("/api/status"));
    }

    #[tokio::test]
    async fn health_endpoint_returns_ok() {
        let app = create_router(AppState::new());

        for _ in 0..3 {
            let response = get_path(app.clone(), "/health").await;
            assert_eq!(response.status(), StatusCode::OK);
            assert_eq!(response.headers()[header::CACHE_CONTROL], "no-store");

            let json = body_json(response).await;
            assert_eq!(json["status"], "healthy");
            assert!(json["message"].as_str().unwrap().contains("axum"));
            assert!(json["timestamp"].is_string());
        }
    }

    #[tokio::test]
    async fn status_endpoint_returns_application_status() {
        let response = get_path(create_router(AppState::new()), "/api/status").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["application"], "CI/CD Practice App");
        assert_eq!(json["status"], "running");
        assert_eq!(json["version"], "1.0.0");
        assert_eq!(json["environment"], "development");
        assert!(!json["features"].as_array().unwrap().is_empty());
        assert!(json["uptime_seconds"].is_u64());
    }

    #[tokio::test]
    async fn version_endpoint_is_stable() {
        let app = create_router(AppState::new());

        let first = body_json(get_path(app.clone(), "/api/version").await).await;
        let second = body_json(get_path(app, "/api/version").await).await;

        assert_eq!(first, second);
        assert_eq!(first["version"], "1.0.0");
        assert_eq!(first["build"], "initial");
        assert_eq!(first["framework"], "axum");
    }

    #[tokio::test]
    async fn unknown_path_returns_404_json() {
        let response = get_path(create_router(AppState::new()), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert_eq!(json["detail"], "Not Found");
    }

    #[tokio::test]
    async fn wrong_method_returns_405() {
        let response = create_router(AppState::new())
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }

    #[tokio::test]
    async fn openapi_schema_is_served() {
        let response = get_path(create_router(AppState::new()), "/openapi.json").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(json["openapi"].is_string());
        assert_eq!(json["info"]["title"], "CI/CD Practice API");
        assert!(json["paths"]["/health"].is_object());
    }

    #[tokio::test]
    async fn swagger_ui_is_served() {
        let app = create_router(AppState::new());

        let entry = get_path(app.clone(), "/docs").await;
        assert!(entry.status() == StatusCode::OK || entry.status().is_redirection());

        let response = get_path(app, "/docs/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.to_lowercase().contains("swagger"));
    }

    #[tokio::test]
    async fn redoc_is_served() {
        let response = get_path(create_router(AppState::new()), "/redoc").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.to_lowercase().contains("redoc"));
    }

    #[test]
    fn middleware_labels_matched_and_unmatched_routes() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();

        ::metrics::with_local_recorder(&recorder, || {
            runtime.block_on(async {
                let app = create_router(AppState::new());
                assert_eq!(get_path(app.clone(), "/health").await.status(), StatusCode::OK);
                assert_eq!(get_path(app, "/nope").await.status(), StatusCode::NOT_FOUND);
            });
        });

        let rendered = handle.render();
        assert!(rendered.contains("path=\"/health\",status=\"200\""));
        assert!(rendered.contains("path=\"unmatched\",status=\"404\""));
    }

    #[tokio::test]
    async fn metrics_route_requires_handle() {
        let response = get_path(create_router(AppState::new()), "/metrics").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let handle = PrometheusBuilder::new().build_recorder().handle();
        let app = create_router(AppState::new().with_metrics(handle));
        let response = get_path(app, "/metrics").await;

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
        assert!(content_type.starts_with("text/plain"));
    }
}
