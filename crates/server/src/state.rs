//! Shared application state

use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use trip_planner_config::{LlmSettings, Settings};
use trip_planner_engine::{ConversationEngine, EngineConfig};
use trip_planner_extraction::FieldExtractor;
use trip_planner_llm::{LlmBackend, LlmConfig, OpenAiBackend, TripResponder};
use trip_planner_persistence::{InMemorySessionStore, LayeredSessionStore, SessionStore};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<RwLock<Settings>>,
    pub engine: Arc<ConversationEngine>,
}

impl AppState {
    /// State with a single in-memory store, the development setup.
    pub fn new(config: Settings) -> Self {
        Self::with_store(config, Arc::new(InMemorySessionStore::new()))
    }

    /// State with an in-memory cache tier in front of a durable store.
    pub fn with_durable_store(config: Settings, durable: Arc<dyn SessionStore>) -> Self {
        let store = LayeredSessionStore::new(Arc::new(InMemorySessionStore::new()), durable);
        Self::with_store(config, Arc::new(store))
    }

    pub fn with_store(config: Settings, store: Arc<dyn SessionStore>) -> Self {
        let backend = build_backend(&config.llm);
        let engine_config = EngineConfig {
            generation_threshold: config.engine.generation_threshold,
            history_window: config.engine.history_window,
        };
        let responder = TripResponder::new(backend, engine_config.generation_threshold);
        let engine =
            ConversationEngine::new(store, responder, FieldExtractor::new(), engine_config);

        Self {
            config: Arc::new(RwLock::new(config)),
            engine: Arc::new(engine),
        }
    }

    pub fn get_config(&self) -> Settings {
        self.config.read().clone()
    }
}

/// A missing or empty key is not an error here: the responder simply runs
/// without a model.
fn build_backend(settings: &LlmSettings) -> Option<Arc<dyn LlmBackend>> {
    if !settings.enabled {
        return None;
    }

    let config = LlmConfig {
        model: settings.model.clone(),
        endpoint: settings.endpoint.clone(),
        api_key: settings
            .api_key
            .clone()
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .filter(|k| !k.is_empty()),
        max_tokens: settings.max_tokens,
        temperature: settings.temperature,
        timeout: Duration::from_secs(settings.timeout_seconds),
    };

    match OpenAiBackend::new(config) {
        Ok(backend) => {
            tracing::info!(model = %backend.model_name(), "model backend configured");
            Some(Arc::new(backend))
        }
        Err(error) => {
            tracing::warn!(%error, "model backend unavailable, replies use the deterministic fallback");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_llm_builds_no_backend() {
        let settings = LlmSettings::default();
        assert!(build_backend(&settings).is_none());
    }

    #[test]
    fn enabled_llm_with_key_builds_a_backend() {
        let settings = LlmSettings {
            enabled: true,
            api_key: Some("sk-test".to_string()),
            ..LlmSettings::default()
        };
        assert!(build_backend(&settings).is_some());
    }

    #[test]
    fn state_construction_from_defaults() {
        let state = AppState::new(Settings::default());
        assert_eq!(state.get_config().server.port, 8080);
    }
}
