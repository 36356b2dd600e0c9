//! Core types for the trip planner
//!
//! This crate provides foundational types used across all other crates:
//! - The trip checklist record and its categorical enums
//! - Field registry (priority order, critical subset) and completeness
//! - Chat session and conversation message types
//! - Itinerary output types

pub mod checklist;
pub mod itinerary;
pub mod session;

pub use checklist::{
    AdventureLevel, ChecklistField, ComfortLevel, FoodPreference, GroupType, SchedulePreference,
    StayPreference, TransportMode, TripChecklist, TripTheme, WeatherPreference, CRITICAL_FIELDS,
    PRIORITY_ORDER,
};
pub use itinerary::{ActivityBlock, BudgetBreakdown, DayPlan, Itinerary};
pub use session::{ChatSession, ConversationMessage, MessageRole};
