//! HTTP boundary for the trip planner
//!
//! A thin axum layer over the conversation engine: request validation,
//! JSON shapes, CORS, and request tracing live here. Everything
//! stateful sits behind [`AppState`].

pub mod http;
pub mod state;

use thiserror::Error;

pub use http::create_router;
pub use state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error(transparent)]
    Engine(#[from] trip_planner_engine::EngineError),
}
