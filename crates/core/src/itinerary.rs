//! Itinerary output types
//!
//! Derived output only: the engine hands a generated itinerary to the
//! caller but never persists it as part of the session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One time-boxed activity within a day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityBlock {
    /// Wall-clock label, e.g. "10:00 AM"
    pub time: String,
    pub activity: String,
    pub location: String,
    /// Human-readable duration, e.g. "2 hours"
    pub duration: String,
    /// Placeholder estimate in rupees
    pub estimated_cost: u64,
}

/// One day of the plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    pub date: NaiveDate,
    /// Zero-based index into the trip
    pub day_index: u32,
    pub title: String,
    pub blocks: Vec<ActivityBlock>,
    pub daily_budget: u64,
}

/// Fixed percentage split of the total budget. The four rounded categories
/// may sum to slightly less than the total; that slack is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetBreakdown {
    pub accommodation: u64,
    pub food: u64,
    pub activities: u64,
    pub transport: u64,
}

/// The complete generated plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Itinerary {
    pub destination: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: Vec<DayPlan>,
    pub budget_breakdown: BudgetBreakdown,
}
