//! API router.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{catalog, health, speech};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(health::service_info))
        .route("/v1/health", get(health::health_check))
        .route("/v1/models", get(catalog::list_models))
        .route("/v1/voices", get(catalog::list_voices))
        .route("/v1/voice-agent-completions", post(speech::create_completion))
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use crate::config::ServerConfig;

    fn test_app() -> Router {
        let state = Arc::new(AppState::new(ServerConfig::default()).unwrap());
        create_api_router().with_state(state)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_check() {
        let response = test_app()
            .oneshot(Request::get("/v1/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_service_info_lists_endpoints() {
        let response = test_app()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["endpoints"]["health"], "/v1/health");
    }

    #[tokio::test]
    async fn test_list_models() {
        let response = test_app()
            .oneshot(Request::get("/v1/models").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["models"].as_array().unwrap().len() > 3);
    }

    #[tokio::test]
    async fn test_list_voices() {
        let response = test_app()
            .oneshot(Request::get("/v1/voices").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let voices = body["voices"].as_array().unwrap();
        assert!(voices.iter().any(|v| v["name"] == "alloy"));
        assert!(voices.iter().any(|v| v["name"] == "rachel"));
    }

    #[tokio::test]
    async fn test_completion_with_unspeakable_text_is_bad_request() {
        let request = Request::post("/v1/voice-agent-completions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "   "}"#))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("text"));
    }

    #[tokio::test]
    async fn test_completion_without_credentials_is_bad_request() {
        // Configuration errors (missing API key) map to 400, raised before
        // any network I/O.
        let request = Request::post("/v1/voice-agent-completions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"text": "Say something pleasant."}"#))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("OPENAI_API_KEY"));
    }

    #[tokio::test]
    async fn test_completion_with_invalid_tuning_is_bad_request() {
        let request = Request::post("/v1/voice-agent-completions")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                r#"{"text": "Hello there.", "stability": 2.0}"#,
            ))
            .unwrap();
        let response = test_app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
