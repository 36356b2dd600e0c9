//! End-to-end conversation flows against the in-memory store, with no
//! model backend configured (the deterministic fallback drives replies).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use trip_planner_core::{GroupType, MessageRole};
use trip_planner_engine::{ChatStatus, ConversationEngine, EngineConfig};
use trip_planner_extraction::FieldExtractor;
use trip_planner_llm::{LlmBackend, LlmError, TripResponder};
use trip_planner_persistence::{InMemorySessionStore, SessionStore};

fn engine_without_backend() -> (ConversationEngine, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let config = EngineConfig::default();
    let responder = TripResponder::new(None, config.generation_threshold);
    let engine = ConversationEngine::new(
        store.clone(),
        responder,
        FieldExtractor::new(),
        config,
    );
    (engine, store)
}

/// Let the fire-and-forget persist tasks land.
async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn first_turn_extracts_and_asks_a_question() {
    let (engine, _) = engine_without_backend();

    let response = engine
        .process_turn("s-1", "Planning a trip to Goa with friends, budget is 15k")
        .await;

    assert_eq!(response.session_id, "s-1");
    assert_eq!(response.status, ChatStatus::Collecting);
    assert_eq!(response.checklist.starting_city.as_deref(), Some("goa"));
    assert_eq!(response.checklist.group_type, Some(GroupType::Team));
    assert_eq!(response.checklist.total_budget, Some(15_000));
    assert!(response.completeness > 0);
    assert!(response.next_question.is_some());
    assert!(response.itinerary.is_none());
    // One user turn, one assistant turn.
    assert_eq!(response.history.len(), 2);
    assert!(!response.suggestions.is_empty() && response.suggestions.len() <= 3);
}

#[tokio::test]
async fn filling_the_critical_fields_generates_an_itinerary() {
    let (engine, _) = engine_without_backend();

    engine.process_turn("s-2", "Starting from Mumbai with friends").await;
    settle().await;
    engine.process_turn("s-2", "Budget is 40k").await;
    settle().await;
    engine.process_turn("s-2", "20th to 23rd December").await;
    settle().await;

    let response = engine
        .process_turn("s-2", "We'd like a hostel stay at a relaxed pace")
        .await;

    assert_eq!(response.completeness, 100);
    assert_eq!(response.status, ChatStatus::Ready);
    let itinerary = response.itinerary.expect("itinerary should be generated");
    // One plan day per travel day.
    assert_eq!(
        itinerary.days.len() as u32,
        response.checklist.travel_days.unwrap()
    );
    assert_eq!(itinerary.destination, "mumbai");
    assert!(response.next_question.is_none());
    // The plan announcement leads the reply text.
    let reply = response.history.last().unwrap();
    assert!(reply
        .content
        .starts_with("Here's your day-by-day plan for mumbai!"));
    settle().await;

    // Further turns refine rather than regenerate.
    let response = engine.process_turn("s-2", "also we love street food").await;
    assert_eq!(response.status, ChatStatus::Refining);
    assert!(response.itinerary.is_none());
}

#[tokio::test]
async fn first_write_wins_across_turns() {
    let (engine, _) = engine_without_backend();

    engine.process_turn("s-3", "starting from Goa").await;
    settle().await;
    let response = engine.process_turn("s-3", "actually make that Manali").await;

    assert_eq!(response.checklist.starting_city.as_deref(), Some("goa"));
}

#[tokio::test]
async fn audit_trail_records_only_newly_set_fields() {
    let (engine, _) = engine_without_backend();

    engine.process_turn("s-7", "starting from Goa").await;
    settle().await;
    // Re-states the city, adds the group.
    let response = engine.process_turn("s-7", "Goa with friends").await;

    let user_turn = response
        .history
        .iter()
        .rev()
        .find(|m| m.role == MessageRole::User)
        .unwrap();
    let delta = user_turn.extracted_fields.as_ref().unwrap();
    assert_eq!(delta.group_type, Some(GroupType::Team));
    assert!(delta.starting_city.is_none());
}

#[tokio::test]
async fn reset_clears_everything_and_allows_new_values() {
    let (engine, _) = engine_without_backend();

    engine.process_turn("s-4", "from Goa with my family, 2 lakh budget").await;
    settle().await;

    let session = engine.reset("s-4").await.unwrap();
    assert!(session.checklist.is_empty());
    assert!(session.history.is_empty());
    assert_eq!(session.completeness, 0);

    let response = engine.process_turn("s-4", "from Manali this time").await;
    assert_eq!(response.checklist.starting_city.as_deref(), Some("manali"));
}

struct FailingBackend;

#[async_trait]
impl LlmBackend for FailingBackend {
    async fn complete(&self, _system: &str, _user: &str) -> Result<String, LlmError> {
        Err(LlmError::Network("provider down".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing-test-model"
    }
}

#[tokio::test]
async fn hundred_turns_with_a_failing_provider_still_reply() {
    let store = Arc::new(InMemorySessionStore::new());
    let config = EngineConfig::default();
    let responder = TripResponder::new(Some(Arc::new(FailingBackend)), config.generation_threshold);
    let engine = ConversationEngine::new(store, responder, FieldExtractor::new(), config);

    let messages = [
        "hello there",
        "starting from Jaipur",
        "with my partner",
        "around 50k total",
        "we like quiet places",
    ];

    let mut last_completeness = 0;
    for turn in 0..100 {
        let response = engine
            .process_turn("s-5", messages[turn % messages.len()])
            .await;
        assert!(
            response.next_question.is_some() || response.itinerary.is_some(),
            "turn {turn} produced no reply"
        );
        assert!(
            response.completeness >= last_completeness,
            "completeness regressed on turn {turn}"
        );
        last_completeness = response.completeness;
        settle().await;
    }
}

/// Two concurrent turns on the same session id race: each clones the same
/// stored state and the later persist overwrites the earlier one, so one
/// turn's fields can be lost. Sessions are expected to be driven by a
/// single client; this records the accepted behavior.
#[tokio::test]
async fn concurrent_turns_on_one_session_are_last_writer_wins() {
    let (engine, store) = engine_without_backend();

    let (a, b) = tokio::join!(
        engine.process_turn("s-6", "starting from Goa"),
        engine.process_turn("s-6", "budget is 15k"),
    );
    assert!(a.next_question.is_some());
    assert!(b.next_question.is_some());
    settle().await;

    let stored = store.get("s-6").await.unwrap().expect("session stored");
    let has_city = stored.checklist.starting_city.is_some();
    let has_budget = stored.checklist.total_budget.is_some();
    // At least one write survives; both only if the turns happened to
    // serialize.
    assert!(has_city || has_budget);
}
