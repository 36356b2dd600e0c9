//! Session store trait and implementations

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use trip_planner_core::ChatSession;

use crate::PersistenceError;

/// Whole-session storage keyed by session id.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, session_id: &str) -> Result<Option<ChatSession>, PersistenceError>;

    async fn put(&self, session: &ChatSession) -> Result<(), PersistenceError>;

    async fn delete(&self, session_id: &str) -> Result<(), PersistenceError>;
}

/// Process-local store on a concurrent map. The default cache tier, and the
/// only tier in development.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<String, ChatSession>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<ChatSession>, PersistenceError> {
        Ok(self.sessions.get(session_id).map(|s| s.clone()))
    }

    async fn put(&self, session: &ChatSession) -> Result<(), PersistenceError> {
        self.sessions
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<(), PersistenceError> {
        self.sessions.remove(session_id);
        Ok(())
    }
}

/// Cache tier over a durable tier.
///
/// Reads are cache-first with durable backfill. Writes go to both tiers and
/// never short-circuit: a tier that fails is logged and skipped, and the
/// write only errors when every tier rejected it.
pub struct LayeredSessionStore {
    cache: Arc<dyn SessionStore>,
    durable: Arc<dyn SessionStore>,
}

impl LayeredSessionStore {
    pub fn new(cache: Arc<dyn SessionStore>, durable: Arc<dyn SessionStore>) -> Self {
        Self { cache, durable }
    }
}

#[async_trait]
impl SessionStore for LayeredSessionStore {
    async fn get(&self, session_id: &str) -> Result<Option<ChatSession>, PersistenceError> {
        match self.cache.get(session_id).await {
            Ok(Some(session)) => return Ok(Some(session)),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(session_id, %error, "cache tier read failed");
            }
        }

        let session = self.durable.get(session_id).await?;
        if let Some(ref found) = session {
            if let Err(error) = self.cache.put(found).await {
                tracing::warn!(session_id, %error, "cache backfill failed");
            }
        }
        Ok(session)
    }

    async fn put(&self, session: &ChatSession) -> Result<(), PersistenceError> {
        let (cache_result, durable_result) =
            futures::join!(self.cache.put(session), self.durable.put(session));

        if let Err(ref error) = cache_result {
            tracing::warn!(session_id = %session.session_id, %error, "cache tier write failed");
        }
        if let Err(ref error) = durable_result {
            tracing::warn!(session_id = %session.session_id, %error, "durable tier write failed");
        }

        match (cache_result, durable_result) {
            (Err(_), Err(error)) => Err(error),
            _ => Ok(()),
        }
    }

    async fn delete(&self, session_id: &str) -> Result<(), PersistenceError> {
        let (cache_result, durable_result) =
            futures::join!(self.cache.delete(session_id), self.durable.delete(session_id));
        cache_result.and(durable_result)
    }
}
