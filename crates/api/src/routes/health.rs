//! Service info endpoints.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use crate::AppState;

/// Service info response.
#[derive(Serialize)]
pub struct InfoResponse {
    /// Human-readable message.
    pub message: &'static str,
}

/// GET `/` - Welcome message.
async fn welcome() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "Welcome to Ledger Master API",
    })
}

/// GET `/api/test` - Connectivity check.
async fn api_test() -> Json<InfoResponse> {
    Json(InfoResponse {
        message: "API is working!",
    })
}

/// Creates the service info routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(welcome))
        .route("/api/test", get(api_test))
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use sea_orm::{DatabaseBackend, MockDatabase};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::{AppState, create_router};

    fn test_app() -> axum::Router {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        create_router(AppState { db: Arc::new(db) })
    }

    #[tokio::test]
    async fn test_welcome() {
        let response = test_app()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "Welcome to Ledger Master API");
    }

    #[tokio::test]
    async fn test_api_test() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/api/test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "API is working!");
    }
}
