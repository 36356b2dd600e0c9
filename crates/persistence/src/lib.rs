//! Session storage
//!
//! Stores are deliberately dumb: they hold whole [`ChatSession`] values by
//! id and know nothing about turns or merging. The layered store combines
//! a fast cache tier with a durable tier and treats per-tier failures as
//! degradation, not turn failure.
//!
//! [`ChatSession`]: trip_planner_core::ChatSession

pub mod store;

use thiserror::Error;

pub use store::{InMemorySessionStore, LayeredSessionStore, SessionStore};

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("store error: {0}")]
    Store(String),
}
