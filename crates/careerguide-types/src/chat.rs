//! Chat session and message types for CareerGuide.
//!
//! These types model the conversations between a user and the career
//! advisor: sessions with their denormalized recency caches, and the
//! immutable messages inside them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Chat and LLM layers share one role vocabulary.
pub use crate::llm::MessageRole;

/// A chat session owned by a single user.
///
/// `last_message` mirrors the content of the most recently appended message
/// and `message_count` the number of messages; both are maintained inside
/// the append transaction. `updated_at` orders the session list (most
/// recently active first).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: Uuid,
    pub user_id: String,
    pub title: String,
    pub last_message: String,
    pub message_count: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ChatSession {
    /// Title given to sessions created without one.
    pub const DEFAULT_TITLE: &'static str = "New Chat";
}

/// A single message within a chat session.
///
/// Messages are immutable once written. Conversation order is `seq`
/// ascending; `seq` is a per-session sequence assigned at append time,
/// so two messages created in the same instant cannot swap places.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub session_id: Uuid,
    pub seq: u32,
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// A session together with its full ordered message list.
///
/// This is the shape the session endpoints return; the list endpoint
/// returns a page of these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionWithMessages {
    pub session: ChatSession,
    pub messages: Vec<ChatMessage>,
}
