//! ChatRepository trait definition.
//!
//! Provides CRUD operations for chat sessions and messages. Every
//! session-scoped operation takes the owning user's id and implementations
//! filter by it, so a session owned by someone else is indistinguishable
//! from a missing one.

use careerguide_types::chat::{ChatMessage, ChatSession, MessageRole};
use careerguide_types::error::RepositoryError;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Repository trait for chat session and message persistence.
///
/// Implementations live in careerguide-infra (e.g., `SqliteChatRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait ChatRepository: Send + Sync {
    /// Create a new chat session.
    fn create_session(
        &self,
        session: &ChatSession,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a session by id, scoped to its owner.
    fn get_session_for_user(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// List a user's sessions, ordered by updated_at DESC.
    fn list_sessions(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Count a user's sessions.
    fn count_sessions(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Append a message and update its session in a single transaction.
    ///
    /// Implementations assign the next per-session sequence number, insert
    /// the message, and set the session's `last_message`, `message_count`,
    /// and `updated_at` before committing. Returns the updated session and
    /// the stored message. `NotFound` when the user owns no such session;
    /// in that case nothing is written.
    fn append_message(
        &self,
        user_id: &str,
        session_id: &Uuid,
        message_id: Uuid,
        role: MessageRole,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(ChatSession, ChatMessage), RepositoryError>> + Send;

    /// Rename a session, bumping `updated_at`.
    ///
    /// `NotFound` when the user owns no such session.
    fn update_session_title(
        &self,
        user_id: &str,
        session_id: &Uuid,
        title: &str,
        updated_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Delete a session and, via cascade, its messages.
    ///
    /// `NotFound` when the user owns no such session.
    fn delete_session(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Get all messages for a session, ordered by seq ASC.
    fn get_messages(
        &self,
        session_id: &Uuid,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Count total sessions across all users.
    fn count_all_sessions(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;

    /// Count total messages across all sessions.
    fn count_all_messages(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
