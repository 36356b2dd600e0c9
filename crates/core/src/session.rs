//! Chat session aggregate and conversation history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::checklist::TripChecklist;

/// Role of a conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    User,
    Assistant,
}

impl MessageRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }
}

/// One turn of the conversation.
///
/// User turns carry the extraction delta that the turn produced, kept for
/// audit and debugging; assistant turns never do.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationMessage {
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_fields: Option<TripChecklist>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>, extracted: Option<TripChecklist>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
            timestamp: Utc::now(),
            extracted_fields: extracted,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
            extracted_fields: None,
        }
    }
}

/// Per-session aggregate: the checklist plus the full message history.
///
/// Created on the first message for a session id, mutated once per turn by
/// the conversation engine, never destroyed by the engine itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub session_id: String,
    pub checklist: TripChecklist,
    pub history: Vec<ConversationMessage>,
    /// Most recently computed completeness, stored for quick inspection.
    pub completeness: u8,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub itinerary_generated: bool,
}

impl ChatSession {
    pub fn new(session_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            session_id: session_id.into(),
            checklist: TripChecklist::default(),
            history: Vec::new(),
            completeness: 0,
            created_at: now,
            updated_at: now,
            itinerary_generated: false,
        }
    }

    /// Update the last-modified timestamp.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Clear checklist and history. This is the single sanctioned override
    /// of first-write-wins; `created_at` is preserved.
    pub fn reset(&mut self) {
        self.checklist = TripChecklist::default();
        self.history.clear();
        self.completeness = 0;
        self.itinerary_generated = false;
        self.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checklist::GroupType;

    #[test]
    fn new_session_is_empty() {
        let session = ChatSession::new("s-1");
        assert_eq!(session.session_id, "s-1");
        assert!(session.checklist.is_empty());
        assert!(session.history.is_empty());
        assert_eq!(session.completeness, 0);
        assert!(!session.itinerary_generated);
    }

    #[test]
    fn reset_clears_state_but_keeps_identity() {
        let mut session = ChatSession::new("s-2");
        session.checklist.group_type = Some(GroupType::Family);
        session.history.push(ConversationMessage::user("hello", None));
        session.completeness = 40;
        session.itinerary_generated = true;
        let created = session.created_at;

        session.reset();

        assert_eq!(session.session_id, "s-2");
        assert_eq!(session.completeness, 0);
        assert!(session.checklist.is_empty());
        assert!(session.history.is_empty());
        assert!(!session.itinerary_generated);
        assert_eq!(session.created_at, created);
    }
}
