//! Model-backed reply generation
//!
//! The backend is optional at every level: no API key means no backend,
//! and a backend failure of any kind degrades to the deterministic
//! responder fallback. Callers never see an error from this crate's
//! responder, only from direct backend use.

pub mod backend;
pub mod responder;

use thiserror::Error;

pub use backend::{LlmBackend, LlmConfig, OpenAiBackend};
pub use responder::{AiReply, NextAction, ResponderContext, TripResponder};

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API error: {0}")]
    Api(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("request timed out")]
    Timeout,

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Timeout
        } else {
            LlmError::Network(err.to_string())
        }
    }
}
