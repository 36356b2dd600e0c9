//! Settings model and loader

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    #[default]
    Development,
    Staging,
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub llm: LlmSettings,

    #[serde(default)]
    pub engine: EngineSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                field: "server.port".to_string(),
                message: "port cannot be 0".to_string(),
            });
        }

        if self.engine.generation_threshold > 100 {
            return Err(ConfigError::InvalidValue {
                field: "engine.generation_threshold".to_string(),
                message: format!(
                    "must be a percentage 0..=100, got {}",
                    self.engine.generation_threshold
                ),
            });
        }

        if self.engine.history_window == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.history_window".to_string(),
                message: "must be at least 1".to_string(),
            });
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature".to_string(),
                message: format!("must be between 0.0 and 2.0, got {}", self.llm.temperature),
            });
        }

        if self.environment.is_production() && self.server.cors_enabled && self.server.cors_origins.is_empty() {
            tracing::warn!("CORS enabled in production with no configured origins");
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_true")]
    pub cors_enabled: bool,

    /// Allowed origins; empty in development means allow-any.
    #[serde(default)]
    pub cors_origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_timeout() -> u64 {
    30
}
fn default_true() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            timeout_seconds: default_timeout(),
            cors_enabled: default_true(),
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmSettings {
    /// Disabled means replies come from the deterministic responder only.
    #[serde(default)]
    pub enabled: bool,

    #[serde(default = "default_llm_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_llm_model")]
    pub model: String,

    /// Usually set via `TRIP_PLANNER__LLM__API_KEY` or `OPENAI_API_KEY`,
    /// never in config files.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: usize,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_llm_timeout")]
    pub timeout_seconds: u64,
}

fn default_llm_endpoint() -> String {
    "https://api.openai.com".to_string()
}
fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}
fn default_max_tokens() -> usize {
    512
}
fn default_temperature() -> f32 {
    0.7
}
fn default_llm_timeout() -> u64 {
    4
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: default_llm_endpoint(),
            model: default_llm_model(),
            api_key: None,
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            timeout_seconds: default_llm_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Completeness percentage at which itinerary generation unlocks.
    #[serde(default = "default_generation_threshold")]
    pub generation_threshold: u8,

    /// Conversation turns carried into the model prompt.
    #[serde(default = "default_history_window")]
    pub history_window: usize,
}

fn default_generation_threshold() -> u8 {
    70
}
fn default_history_window() -> usize {
    6
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            generation_threshold: default_generation_threshold(),
            history_window: default_history_window(),
        }
    }
}

/// Load settings from files and environment.
///
/// Priority, highest first: `TRIP_PLANNER__*` environment variables,
/// `config/{env}.yaml`, `config/default.yaml`, struct defaults.
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{env_name}")).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("TRIP_PLANNER")
            .separator("__")
            .try_parsing(true),
    );

    let settings: Settings = builder.build()?.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
}
