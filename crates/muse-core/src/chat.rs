//! Suggestion chat types.
//!
//! This module contains types for the conversation attached to the
//! currently active suggestion: roles, turns, and the session itself.

use serde::{Deserialize, Serialize};

/// Represents the role of a turn in a suggestion conversation.
///
/// Roles serialize lowercase to match the backend protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// Turn from the user.
    User,
    /// Turn from the AI assistant.
    Assistant,
}

impl ChatRole {
    /// The lowercase wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

/// A single turn in a suggestion conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    /// The role of the turn's author.
    pub role: ChatRole,
    /// The content of the turn.
    pub content: String,
    /// Timestamp when the turn was created (ISO 8601 format).
    pub timestamp: String,
}

impl ChatTurn {
    /// Creates a turn stamped with the current time.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// The conversation attached to the currently active suggestion.
///
/// At most one session exists at a time. It is discarded when the dialog
/// closes, a different suggestion is activated, or the owning suggestion
/// is dismissed; transcripts are never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    /// Id of the suggestion this conversation belongs to.
    pub suggestion_id: String,
    /// Ordered transcript, oldest first.
    pub turns: Vec<ChatTurn>,
    /// Timestamp when the session was opened (ISO 8601 format).
    pub started_at: String,
}

impl ChatSession {
    /// Opens an empty session for the given suggestion.
    pub fn new(suggestion_id: impl Into<String>) -> Self {
        Self {
            suggestion_id: suggestion_id.into(),
            turns: Vec::new(),
            started_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}
