//! Conversation turn and transcript view types for Chatdesk.
//!
//! These types model the transcript of a conversation between an end user
//! and the dialogue agent: individual turns, and the summary/detail views
//! returned to callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Speaker of a single turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TurnRole {
    /// The end user.
    Human,
    /// A reply produced by the dialogue engine.
    Agent,
    /// A notice generated by the service itself (e.g. relay failure).
    System,
}

/// A single entry in a transcript.
///
/// Turns are immutable once appended; the transcript's insertion order is
/// the authoritative order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: TurnRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(role: TurnRole, text: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp,
        }
    }

    /// A human turn stamped with the current time.
    pub fn human(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Human, text, Utc::now())
    }

    /// An agent turn stamped with the current time.
    pub fn agent(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Agent, text, Utc::now())
    }

    /// A system notice stamped with the current time.
    pub fn system(text: impl Into<String>) -> Self {
        Self::new(TurnRole::System, text, Utc::now())
    }
}

/// List-view projection of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub turn_count: usize,
}

/// Immutable snapshot of a conversation, including its full transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationDetail {
    pub id: Uuid,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub turns: Vec<Turn>,
}
