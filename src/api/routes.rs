//! API Routes
//!
//! Configures the Axum router with all chat server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    files_handler, health_handler, paths_handler, pdf_handler, query_handler, root_handler,
    session_handler, summaries_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - CORS: Allows any origin (the frontend may be deployed on any domain)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router with all endpoints
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/api/files", get(files_handler))
        .route("/api/summaries", get(summaries_handler))
        .route("/api/session", post(session_handler))
        .route("/api/query", post(query_handler))
        .route("/api/pdf/:filename", get(pdf_handler))
        .route("/debug/paths", get(paths_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::PathResolver;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tempfile::TempDir;
    use tower::util::ServiceExt;

    fn create_test_app() -> (TempDir, Router) {
        let tmp = TempDir::new().unwrap();
        let state = AppState::new(PathResolver::with_root(tmp.path()));
        (tmp, create_router(state))
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let (_tmp, app) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_root_endpoint() {
        let (_tmp, app) = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_files_endpoint_with_empty_project() {
        let (_tmp, app) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/files")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_pdf_endpoint_not_found() {
        let (_tmp, app) = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/pdf/ghost.pdf")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
