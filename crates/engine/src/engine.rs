//! The per-turn orchestrator

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use trip_planner_core::{
    ChatSession, ChecklistField, ConversationMessage, Itinerary, TripChecklist,
};
use trip_planner_extraction::FieldExtractor;
use trip_planner_llm::{NextAction, ResponderContext, TripResponder};
use trip_planner_persistence::SessionStore;

use crate::itinerary::synthesize;
use crate::merge::merge_extractions;
use crate::EngineError;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Completeness percentage at which generation becomes possible.
    pub generation_threshold: u8,
    /// Conversation turns shown to the responder.
    pub history_window: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            generation_threshold: 70,
            history_window: 6,
        }
    }
}

/// Where the conversation currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatStatus {
    /// Still gathering checklist fields.
    Collecting,
    /// An itinerary was generated on this turn.
    Ready,
    /// An itinerary already exists; further input refines it.
    Refining,
}

/// Everything the chat frontend needs to render one turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurnResponse {
    pub session_id: String,
    pub completeness: u8,
    pub status: ChatStatus,
    pub checklist: TripChecklist,
    pub history: Vec<ConversationMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_question: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub itinerary: Option<Itinerary>,
    pub suggestions: Vec<String>,
    pub confidence: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
    pub processing_time_ms: u64,
}

pub struct ConversationEngine {
    store: Arc<dyn SessionStore>,
    responder: TripResponder,
    extractor: FieldExtractor,
    config: EngineConfig,
}

impl ConversationEngine {
    pub fn new(
        store: Arc<dyn SessionStore>,
        responder: TripResponder,
        extractor: FieldExtractor,
        config: EngineConfig,
    ) -> Self {
        Self {
            store,
            responder,
            extractor,
            config,
        }
    }

    /// Process one user message. Works on a cloned session and commits only
    /// the fully updated state, so a failure mid-turn leaves the stored
    /// session untouched. This method never fails: collaborator errors
    /// degrade the reply instead.
    pub async fn process_turn(&self, session_id: &str, message: &str) -> ChatTurnResponse {
        let started = Instant::now();

        let mut session = match self.store.get(session_id).await {
            Ok(Some(session)) => session,
            Ok(None) => ChatSession::new(session_id),
            Err(error) => {
                tracing::warn!(session_id, %error, "session load failed, starting fresh");
                ChatSession::new(session_id)
            }
        };

        let missing = session.checklist.missing_fields();
        let window_start = session.history.len().saturating_sub(self.config.history_window);
        let ctx = ResponderContext {
            history: &session.history[window_start..],
            checklist: &session.checklist,
            completeness: session.checklist.completeness(),
            missing: &missing,
        };

        let reply = self.responder.respond(message, &ctx).await;

        let rule_update = self.extractor.extract(message);
        let merged = merge_extractions(
            rule_update,
            &reply.extracted_fields,
            reply.confidence,
            session.itinerary_generated,
        );

        let applied = session.checklist.apply(&merged);
        session.completeness = session.checklist.completeness();

        // Audit only this turn's delta; re-stated fields are not recorded.
        let audit = (!applied.is_empty()).then(|| session.checklist.subset(&applied));
        session
            .history
            .push(ConversationMessage::user(message, audit));

        let wants_generation = reply.next_action == NextAction::GenerateItinerary
            && session.completeness >= self.config.generation_threshold
            && !session.itinerary_generated;

        let mut itinerary = None;
        let mut assistant_message = reply.message.clone();
        if wants_generation {
            match synthesize(&session.checklist, Utc::now().date_naive()) {
                Ok(plan) => {
                    assistant_message =
                        format!("Here's your day-by-day plan for {}! {}", plan.destination, reply.message);
                    itinerary = Some(plan);
                    session.itinerary_generated = true;
                }
                Err(error) => {
                    tracing::warn!(session_id, %error, "itinerary synthesis failed");
                }
            }
        }

        session
            .history
            .push(ConversationMessage::assistant(assistant_message.clone()));
        session.touch();

        let status = if itinerary.is_some() {
            ChatStatus::Ready
        } else if session.itinerary_generated {
            ChatStatus::Refining
        } else {
            ChatStatus::Collecting
        };

        let suggestions = session
            .checklist
            .missing_fields()
            .into_iter()
            .take(3)
            .map(suggestion_for)
            .map(str::to_string)
            .collect();

        let response = ChatTurnResponse {
            session_id: session.session_id.clone(),
            completeness: session.completeness,
            status,
            checklist: session.checklist.clone(),
            history: session.history.clone(),
            next_question: itinerary.is_none().then_some(assistant_message),
            itinerary,
            suggestions,
            confidence: reply.confidence,
            reasoning: reply.reasoning,
            processing_time_ms: started.elapsed().as_millis() as u64,
        };

        // Fire-and-forget: the reply does not wait on storage.
        let store = Arc::clone(&self.store);
        tokio::spawn(async move {
            if let Err(error) = store.put(&session).await {
                tracing::warn!(session_id = %session.session_id, %error, "session persist failed");
            }
        });

        response
    }

    /// Clear the session's checklist and history. The only sanctioned
    /// override of first-write-wins.
    pub async fn reset(&self, session_id: &str) -> Result<ChatSession, EngineError> {
        let mut session = self
            .store
            .get(session_id)
            .await?
            .unwrap_or_else(|| ChatSession::new(session_id));
        session.reset();

        if let Err(error) = self.store.put(&session).await {
            tracing::warn!(session_id, %error, "reset persist failed");
        }
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str) -> Result<Option<ChatSession>, EngineError> {
        Ok(self.store.get(session_id).await?)
    }
}

fn suggestion_for(field: ChecklistField) -> &'static str {
    match field {
        ChecklistField::StartingCity => "Tell me which city you're starting from",
        ChecklistField::TotalBudget => "Share your total budget",
        ChecklistField::GroupType => "Mention who's travelling with you",
        ChecklistField::TripTheme => "Describe the kind of trip you want",
        ChecklistField::StartDate => "Give me a start date",
        ChecklistField::EndDate => "Give me an end date",
        ChecklistField::TravelDays => "Tell me how many days you have",
        ChecklistField::TransportMode => "Pick how you'd like to travel",
        ChecklistField::StayPreference => "Tell me where you'd like to stay",
        ChecklistField::AdventureLevel => "Say how adventurous you're feeling",
        ChecklistField::FoodPreference => "Mention any food preferences",
        ChecklistField::SchedulePreference => "Packed days or a relaxed pace?",
        ChecklistField::ComfortLevel => "Budget friendly, standard, or luxury?",
        ChecklistField::WeatherPreference => "Cold, warm, or moderate weather?",
        ChecklistField::SafetyNeeds => "Flag any safety considerations",
        ChecklistField::SpecialRequirements => "Flag any special requirements",
        ChecklistField::AvoidPlaces => "Name places you'd rather avoid",
        ChecklistField::VisitedPlaces => "Name places you've already seen",
    }
}
