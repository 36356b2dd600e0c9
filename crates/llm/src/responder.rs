//! AI responder with a deterministic fallback
//!
//! `respond` is infallible by contract. When a backend is configured it is
//! asked for a strict-JSON reply; anything that goes wrong (no backend,
//! network failure, bad status, unparseable output) falls through to a
//! deterministic scripted reply, so the conversation always moves forward.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use trip_planner_core::{ChecklistField, ConversationMessage, TripChecklist};

use crate::LlmBackend;

/// What the engine should do with the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextAction {
    #[default]
    AskQuestion,
    GenerateItinerary,
    RefinePreferences,
    Clarify,
}

/// A reply, either model-produced or scripted. `extracted_fields` is a
/// partial checklist; typed deserialization rejects malformed field values
/// at the boundary.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiReply {
    pub message: String,
    pub extracted_fields: TripChecklist,
    pub next_action: NextAction,
    pub confidence: f32,
    pub reasoning: Option<String>,
}

/// Read-only view of the session the responder replies within.
pub struct ResponderContext<'a> {
    pub history: &'a [ConversationMessage],
    pub checklist: &'a TripChecklist,
    pub completeness: u8,
    /// Unfilled fields, already in question priority order.
    pub missing: &'a [ChecklistField],
}

const ACKS: [&str; 4] = ["Got it!", "Noted.", "Perfect.", "Great choice!"];

/// How many conversation turns the prompt carries.
const PROMPT_HISTORY_TURNS: usize = 6;

pub struct TripResponder {
    backend: Option<Arc<dyn LlmBackend>>,
    generation_threshold: u8,
}

impl TripResponder {
    pub fn new(backend: Option<Arc<dyn LlmBackend>>, generation_threshold: u8) -> Self {
        Self {
            backend,
            generation_threshold,
        }
    }

    /// Produce a reply for one user message. Never fails.
    pub async fn respond(&self, message: &str, ctx: &ResponderContext<'_>) -> AiReply {
        if let Some(backend) = &self.backend {
            match backend.complete(SYSTEM_PROMPT, &build_prompt(message, ctx)).await {
                Ok(raw) => {
                    if let Some(reply) = extract_json(&raw) {
                        return reply;
                    }
                    tracing::warn!(model = backend.model_name(), "unparseable model reply, using fallback");
                }
                Err(error) => {
                    tracing::warn!(model = backend.model_name(), %error, "model call failed, using fallback");
                }
            }
        }
        self.fallback(ctx)
    }

    /// Deterministic scripted reply: either declare readiness or ask about
    /// the highest-priority missing field.
    fn fallback(&self, ctx: &ResponderContext<'_>) -> AiReply {
        if ctx.completeness >= self.generation_threshold {
            return AiReply {
                message: "I have everything I need to plan your trip. Let me put an itinerary together!".to_string(),
                next_action: NextAction::GenerateItinerary,
                confidence: 0.9,
                ..Default::default()
            };
        }

        let Some(field) = ctx.missing.first() else {
            return AiReply {
                message: "Anything else I should keep in mind while planning, like places to skip or special requirements?".to_string(),
                next_action: NextAction::RefinePreferences,
                confidence: 0.5,
                ..Default::default()
            };
        };

        let ack = ACKS[ctx.history.len() % ACKS.len()];
        AiReply {
            message: format!("{ack} {}", question_for(*field)),
            next_action: NextAction::AskQuestion,
            confidence: 0.6,
            ..Default::default()
        }
    }
}

const SYSTEM_PROMPT: &str = "\
You are a friendly trip-planning assistant for travel within India. \
You collect trip details one question at a time and reply ONLY with a JSON \
object of this exact shape: {\"message\": string, \"extractedFields\": object, \
\"nextAction\": \"ask_question\" | \"generate_itinerary\" | \"refine_preferences\" | \"clarify\", \
\"confidence\": number 0..1, \"reasoning\": string}. \
extractedFields uses camelCase checklist field names and holds only values \
stated by the user in their latest message. No text outside the JSON object.";

fn build_prompt(message: &str, ctx: &ResponderContext<'_>) -> String {
    let mut prompt = String::new();

    let recent = ctx
        .history
        .iter()
        .rev()
        .take(PROMPT_HISTORY_TURNS)
        .collect::<Vec<_>>();
    if !recent.is_empty() {
        prompt.push_str("Recent conversation:\n");
        for turn in recent.into_iter().rev() {
            prompt.push_str(&format!("{}: {}\n", turn.role.as_str(), turn.content));
        }
        prompt.push('\n');
    }

    let known = serde_json::to_string(ctx.checklist).unwrap_or_else(|_| "{}".to_string());
    prompt.push_str(&format!("Known trip details: {known}\n"));
    prompt.push_str(&format!("Completeness: {}%\n", ctx.completeness));

    let missing = ctx
        .missing
        .iter()
        .map(|f| f.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    prompt.push_str(&format!("Missing fields, in priority order: {missing}\n\n"));
    prompt.push_str(&format!("User message: {message}"));
    prompt
}

/// Scan from the first `{` to the last `}` and parse. Models wrap JSON in
/// prose and code fences often enough that a strict parse of the whole
/// reply is useless.
fn extract_json(raw: &str) -> Option<AiReply> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end < start {
        return None;
    }
    let mut reply: AiReply = serde_json::from_str(&raw[start..=end]).ok()?;
    if reply.message.trim().is_empty() {
        return None;
    }
    reply.confidence = reply.confidence.clamp(0.0, 1.0);
    Some(reply)
}

fn question_for(field: ChecklistField) -> &'static str {
    match field {
        ChecklistField::StartingCity => "Which city are you starting from?",
        ChecklistField::TotalBudget => "What's your total budget for the trip?",
        ChecklistField::GroupType => "Who's travelling - going solo, as a couple, with family, or with friends?",
        ChecklistField::TripTheme => "What kind of trip are you in the mood for - adventure, relaxation, culture, something else?",
        ChecklistField::StartDate => "When would you like to start the trip?",
        ChecklistField::EndDate => "When does the trip end?",
        ChecklistField::TravelDays => "How many days are you planning for?",
        ChecklistField::TransportMode => "How do you prefer to travel - flight, train, bus, or a road trip?",
        ChecklistField::StayPreference => "Where would you like to stay - hotel, hostel, resort, homestay?",
        ChecklistField::AdventureLevel => "How adventurous should the activities be?",
        ChecklistField::FoodPreference => "Any food preferences I should plan around?",
        ChecklistField::SchedulePreference => "Do you want the days packed with activities, or a relaxed pace?",
        ChecklistField::ComfortLevel => "Are you after budget friendly, standard, or luxury comfort?",
        ChecklistField::WeatherPreference => "Do you prefer cold, warm, or moderate weather?",
        ChecklistField::SafetyNeeds => "Any safety considerations I should know about?",
        ChecklistField::SpecialRequirements => "Any special requirements, like accessibility or dietary needs?",
        ChecklistField::AvoidPlaces => "Any places you'd rather avoid?",
        ChecklistField::VisitedPlaces => "Which places have you already visited?",
    }
}
