//! OpenAI-compatible chat backend
//!
//! A thin, non-streaming client for `/v1/chat/completions`. The request
//! timeout is short on purpose: the conversation engine waits on this
//! call, and a slow provider must degrade to the deterministic fallback
//! rather than stall the chat turn.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::LlmError;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model name sent in the request body.
    pub model: String,
    /// Provider base URL, without the `/v1/...` path.
    pub endpoint: String,
    /// Absent key means the backend is not constructed at all.
    pub api_key: Option<String>,
    pub max_tokens: usize,
    pub temperature: f32,
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            endpoint: "https://api.openai.com".to_string(),
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            max_tokens: 512,
            temperature: 0.7,
            timeout: Duration::from_secs(4),
        }
    }
}

/// One completion round-trip against a chat model.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    /// Run a single system + user exchange and return the raw reply text.
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}

/// Backend for OpenAI and OpenAI-compatible servers (vLLM, local proxies).
pub struct OpenAiBackend {
    config: LlmConfig,
    client: Client,
}

impl OpenAiBackend {
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        if config.api_key.as_deref().map_or(true, str::is_empty) {
            return Err(LlmError::Configuration(
                "API key not set, running without a model".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    fn chat_url(&self) -> String {
        format!(
            "{}/v1/chat/completions",
            self.config.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl LlmBackend for OpenAiBackend {
    async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(self.config.api_key.as_deref().unwrap_or_default())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api(format!("HTTP {status}: {body}")));
        }

        let response: ChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| LlmError::InvalidResponse("no choices in response".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: usize,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keyed_config() -> LlmConfig {
        LlmConfig {
            api_key: Some("sk-test".to_string()),
            ..LlmConfig::default()
        }
    }

    #[test]
    fn missing_key_refuses_construction() {
        let config = LlmConfig {
            api_key: None,
            ..LlmConfig::default()
        };
        assert!(matches!(
            OpenAiBackend::new(config),
            Err(LlmError::Configuration(_))
        ));
    }

    #[test]
    fn chat_url_tolerates_trailing_slash() {
        let backend = OpenAiBackend::new(LlmConfig {
            endpoint: "http://localhost:8000/".to_string(),
            ..keyed_config()
        })
        .unwrap();
        assert_eq!(backend.chat_url(), "http://localhost:8000/v1/chat/completions");
    }

    #[test]
    fn response_parsing() {
        let json = r#"{
            "choices": [
                {"message": {"role": "assistant", "content": "hello"}}
            ]
        }"#;
        let response: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.choices[0].message.content, "hello");
    }
}
