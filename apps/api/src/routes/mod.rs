pub mod health;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::resumes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/resumes",
            get(handlers::handle_list).post(handlers::handle_upload),
        )
        .route(
            "/api/v1/resumes/:id",
            get(handlers::handle_get).delete(handlers::handle_delete),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::HeuristicAnalyzer;
    use crate::config::Config;
    use crate::store::memory::MemoryResumeStore;

    #[tokio::test]
    async fn test_health_reports_analyzer() {
        let app = build_router(AppState {
            store: Arc::new(MemoryResumeStore::default()),
            analyzer: Arc::new(HeuristicAnalyzer),
            config: Config::for_tests(None),
        });

        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["analyzer"], "heuristic");
    }
}
