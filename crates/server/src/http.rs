//! Routes and handlers

use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use trip_planner_core::ChatSession;
use trip_planner_engine::ChatTurnResponse;

use crate::state::AppState;
use crate::ServerError;

pub fn create_router(state: AppState) -> Router {
    let server = state.get_config().server;

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat/reset", post(reset))
        .route("/api/sessions/:id", get(get_session))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(server.timeout_seconds)))
        .layer(build_cors_layer(&server.cors_origins, server.cors_enabled))
        .with_state(state)
}

/// Disabled CORS means allow-any, the development default. With CORS on,
/// only the configured origins are allowed; none configured (or none
/// parseable) falls back to the local frontend.
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let mut parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%origin, %error, "skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    if parsed.is_empty() {
        parsed = vec![HeaderValue::from_static("http://localhost:3000")];
    }

    CorsLayer::new()
        .allow_origin(parsed)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChatRequest {
    #[serde(default)]
    session_id: String,
    #[serde(default)]
    message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResetRequest {
    #[serde(default)]
    session_id: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::InvalidRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            ServerError::SessionNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::Engine(error) => {
                tracing::error!(%error, "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatTurnResponse>, ServerError> {
    let session_id = request.session_id.trim();
    if session_id.is_empty() {
        return Err(ServerError::InvalidRequest(
            "sessionId must not be blank".to_string(),
        ));
    }
    let message = request.message.trim();
    if message.is_empty() {
        return Err(ServerError::InvalidRequest(
            "message must not be blank".to_string(),
        ));
    }

    tracing::info!(session_id, chars = message.len(), "chat turn");
    Ok(Json(state.engine.process_turn(session_id, message).await))
}

async fn reset(
    State(state): State<AppState>,
    Json(request): Json<ResetRequest>,
) -> Result<Json<ChatSession>, ServerError> {
    let session_id = request.session_id.trim();
    if session_id.is_empty() {
        return Err(ServerError::InvalidRequest(
            "sessionId must not be blank".to_string(),
        ));
    }

    tracing::info!(session_id, "session reset");
    Ok(Json(state.engine.reset(session_id).await?))
}

async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<ChatSession>, ServerError> {
    state
        .engine
        .get_session(&session_id)
        .await?
        .map(Json)
        .ok_or(ServerError::SessionNotFound(session_id))
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;
    use trip_planner_config::Settings;

    fn test_router() -> Router {
        create_router(AppState::new(Settings::default()))
    }

    fn json_request(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_endpoint_responds() {
        let response = test_router()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn blank_session_id_is_rejected() {
        let response = test_router()
            .oneshot(json_request("/api/chat", r#"{"sessionId": "  ", "message": "hi"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn blank_message_is_rejected() {
        let response = test_router()
            .oneshot(json_request("/api/chat", r#"{"sessionId": "s-1"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_turn_round_trip() {
        let response = test_router()
            .oneshot(json_request(
                "/api/chat",
                r#"{"sessionId": "s-1", "message": "trip from Goa with friends"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["sessionId"], "s-1");
        assert_eq!(body["checklist"]["startingCity"], "goa");
        assert!(body["nextQuestion"].is_string());
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/sessions/nope")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn reset_returns_a_cleared_session() {
        let router = test_router();

        let response = router
            .clone()
            .oneshot(json_request(
                "/api/chat",
                r#"{"sessionId": "s-2", "message": "starting from Manali"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(json_request("/api/chat/reset", r#"{"sessionId": "s-2"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["completeness"], 0);
    }

    #[test]
    fn cors_layer_variants_build() {
        build_cors_layer(&[], false);
        build_cors_layer(&[], true);
        build_cors_layer(&["http://localhost:3000".to_string()], true);
        build_cors_layer(&["not a header\u{0}".to_string()], true);
    }
}
