//! Conversation history types.

use serde::{Deserialize, Serialize};

/// The author of a conversation turn.
///
/// These three values are the only roles the service accepts; the transport
/// layer rejects anything else before the pipeline runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    /// The fixed label used when rendering history into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Role::System => "System",
            Role::User => "Human",
            Role::Assistant => "AI",
        }
    }
}

/// One immutable turn of the conversation.
///
/// A slice of turns in insertion order forms the history; the order must be
/// preserved for prompt fidelity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    /// Who produced this turn.
    pub role: Role,
    /// The turn's text content.
    pub content: String,
}

impl ConversationTurn {
    /// Create a turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self { role, content: content.into() }
    }
}
