//! Application configuration
//!
//! Settings are layered: `config/default.yaml`, then `config/{env}.yaml`,
//! then environment variables with the `TRIP_PLANNER` prefix
//! (`TRIP_PLANNER__SERVER__PORT=9000`). Every field has a default so the
//! server starts with no config files at all.

pub mod settings;

use thiserror::Error;

pub use settings::{
    load_settings, EngineSettings, LlmSettings, RuntimeEnvironment, ServerSettings, Settings,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("configuration load error: {0}")]
    Load(#[from] config::ConfigError),

    #[error("invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}
