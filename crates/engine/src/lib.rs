//! Conversation engine
//!
//! Orchestrates one chat turn: extraction, AI reply, merge, checklist
//! application, optional itinerary synthesis, history bookkeeping and
//! fire-and-forget persistence. The engine's contract is that a turn
//! produces a reply whenever the session could be processed at all;
//! collaborator failures degrade the turn instead of failing it.

pub mod engine;
pub mod itinerary;
pub mod merge;

use thiserror::Error;

pub use engine::{ChatStatus, ChatTurnResponse, ConversationEngine, EngineConfig};
pub use merge::{merge_extractions, MERGE_CONFIDENCE, REFINE_CONFIDENCE};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error(transparent)]
    Store(#[from] trip_planner_persistence::PersistenceError),

    #[error("itinerary synthesis failed: {0}")]
    Synthesis(String),
}
