//! SQLite chat repository implementation.
//!
//! Implements `ChatRepository` from `careerguide-core` using sqlx with split
//! read/write pools. Follows the same patterns as `SqliteUserRepository`:
//! raw queries, private Row structs, split reader/writer pool usage.
//!
//! Every session query is scoped by owner: lookups filter on both the
//! session id and the requesting user's id, so a foreign session is
//! indistinguishable from a missing one.

use careerguide_core::chat::repository::ChatRepository;
use careerguide_types::chat::{ChatMessage, ChatSession};
use careerguide_types::error::RepositoryError;
use careerguide_types::llm::MessageRole;
use chrono::{DateTime, Utc};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;
use uuid::Uuid;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ChatRepository`.
pub struct SqliteChatRepository {
    pool: DatabasePool,
}

impl SqliteChatRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

// ---------------------------------------------------------------------------
// Private Row types for SQLite-to-domain mapping
// ---------------------------------------------------------------------------

struct ChatSessionRow {
    id: String,
    user_id: String,
    title: String,
    last_message: String,
    message_count: i64,
    created_at: String,
    updated_at: String,
}

impl ChatSessionRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            user_id: row.try_get("user_id")?,
            title: row.try_get("title")?,
            last_message: row.try_get("last_message")?,
            message_count: row.try_get("message_count")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }

    fn into_session(self) -> Result<ChatSession, RepositoryError> {
        Ok(ChatSession {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| RepositoryError::Query(format!("invalid uuid: {e}")))?,
            user_id: self.user_id,
            title: self.title,
            last_message: self.last_message,
            message_count: self.message_count as u32,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

struct ChatMessageRow {
    id: String,
    session_id: String,
    seq: i64,
    role: String,
    content: String,
    created_at: String,
}

impl ChatMessageRow {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            session_id: row.try_get("session_id")?,
            seq: row.try_get("seq")?,
            role: row.try_get("role")?,
            content: row.try_get("content")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_message(self) -> Result<ChatMessage, RepositoryError> {
        Ok(ChatMessage {
            id: Uuid::parse_str(&self.id)
                .map_err(|e| RepositoryError::Query(format!("invalid uuid: {e}")))?,
            session_id: Uuid::parse_str(&self.session_id)
                .map_err(|e| RepositoryError::Query(format!("invalid uuid: {e}")))?,
            seq: self.seq as u32,
            role: self.role.parse::<MessageRole>().map_err(RepositoryError::Query)?,
            content: self.content,
            created_at: parse_datetime(&self.created_at)?,
        })
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Format a DateTime for SQLite storage (RFC3339).
fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339()
}

/// Parse an RFC3339 datetime from SQLite.
fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

// ---------------------------------------------------------------------------
// ChatRepository implementation
// ---------------------------------------------------------------------------

impl ChatRepository for SqliteChatRepository {
    async fn create_session(&self, session: &ChatSession) -> Result<ChatSession, RepositoryError> {
        sqlx::query(
            r#"
            INSERT INTO chat_sessions (id, user_id, title, last_message, message_count, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.id.to_string())
        .bind(&session.user_id)
        .bind(&session.title)
        .bind(&session.last_message)
        .bind(session.message_count as i64)
        .bind(format_datetime(&session.created_at))
        .bind(format_datetime(&session.updated_at))
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(session.clone())
    }

    async fn get_session_for_user(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, last_message, message_count, created_at, updated_at
            FROM chat_sessions
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(session_id.to_string())
        .bind(user_id)
        .fetch_optional(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let session_row = ChatSessionRow::from_row(&row)
                    .map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(session_row.into_session()?))
            }
            None => Ok(None),
        }
    }

    async fn list_sessions(
        &self,
        user_id: &str,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<ChatSession>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, user_id, title, last_message, message_count, created_at, updated_at
            FROM chat_sessions
            WHERE user_id = ?
            ORDER BY updated_at DESC
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut sessions = Vec::with_capacity(rows.len());
        for row in &rows {
            let session_row =
                ChatSessionRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            sessions.push(session_row.into_session()?);
        }
        Ok(sessions)
    }

    async fn count_sessions(&self, user_id: &str) -> Result<u64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_sessions WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.0 as u64)
    }

    async fn append_message(
        &self,
        user_id: &str,
        session_id: &Uuid,
        message_id: Uuid,
        role: MessageRole,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<(ChatSession, ChatMessage), RepositoryError> {
        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        // Ownership check inside the transaction; dropping the tx on the
        // error path rolls back without writing anything
        let row = sqlx::query(
            r#"
            SELECT id, user_id, title, last_message, message_count, created_at, updated_at
            FROM chat_sessions
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(session_id.to_string())
        .bind(user_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let Some(row) = row else {
            return Err(RepositoryError::NotFound);
        };

        let mut session = ChatSessionRow::from_row(&row)
            .map_err(|e| RepositoryError::Query(e.to_string()))?
            .into_session()?;

        let seq = session.message_count + 1;

        sqlx::query(
            r#"
            INSERT INTO messages (id, session_id, seq, role, content, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(message_id.to_string())
        .bind(session_id.to_string())
        .bind(seq as i64)
        .bind(role.to_string())
        .bind(content)
        .bind(format_datetime(&created_at))
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e {
                if db_err.message().contains("UNIQUE") {
                    return RepositoryError::Conflict(format!(
                        "message seq {seq} already exists in session {session_id}"
                    ));
                }
            }
            RepositoryError::Query(e.to_string())
        })?;

        sqlx::query(
            r#"
            UPDATE chat_sessions
            SET last_message = ?, message_count = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(content)
        .bind(seq as i64)
        .bind(format_datetime(&created_at))
        .bind(session_id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        session.last_message = content.to_string();
        session.message_count = seq;
        session.updated_at = created_at;

        let message = ChatMessage {
            id: message_id,
            session_id: *session_id,
            seq,
            role,
            content: content.to_string(),
            created_at,
        };

        Ok((session, message))
    }

    async fn update_session_title(
        &self,
        user_id: &str,
        session_id: &Uuid,
        title: &str,
        updated_at: DateTime<Utc>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE chat_sessions
            SET title = ?, updated_at = ?
            WHERE id = ? AND user_id = ?
            "#,
        )
        .bind(title)
        .bind(format_datetime(&updated_at))
        .bind(session_id.to_string())
        .bind(user_id)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_session(&self, user_id: &str, session_id: &Uuid) -> Result<(), RepositoryError> {
        // Messages go with the session via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM chat_sessions WHERE id = ? AND user_id = ?")
            .bind(session_id.to_string())
            .bind(user_id)
            .execute(&self.pool.writer)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn get_messages(&self, session_id: &Uuid) -> Result<Vec<ChatMessage>, RepositoryError> {
        let rows = sqlx::query(
            r#"
            SELECT id, session_id, seq, role, content, created_at
            FROM messages
            WHERE session_id = ?
            ORDER BY seq ASC
            "#,
        )
        .bind(session_id.to_string())
        .fetch_all(&self.pool.reader)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut messages = Vec::with_capacity(rows.len());
        for row in &rows {
            let message_row =
                ChatMessageRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            messages.push(message_row.into_message()?);
        }
        Ok(messages)
    }

    async fn count_all_sessions(&self) -> Result<u64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM chat_sessions")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.0 as u64)
    }

    async fn count_all_messages(&self) -> Result<u64, RepositoryError> {
        let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM messages")
            .fetch_one(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(row.0 as u64)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    async fn test_pool() -> DatabasePool {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let url = format!("sqlite://{}?mode=rwc", path.display());
        // Keep tempdir alive for the duration of the test
        std::mem::forget(dir);
        DatabasePool::new(&url).await.unwrap()
    }

    /// Insert a user row directly so session FKs resolve.
    async fn seed_user(pool: &DatabasePool, user_id: &str) {
        sqlx::query("INSERT INTO users (id, name, email, created_at) VALUES (?, ?, ?, ?)")
            .bind(user_id)
            .bind("Test User")
            .bind(format!("{user_id}@example.com"))
            .bind(Utc::now().to_rfc3339())
            .execute(&pool.writer)
            .await
            .unwrap();
    }

    fn make_session(user_id: &str, title: &str, created_at: DateTime<Utc>) -> ChatSession {
        ChatSession {
            id: Uuid::now_v7(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            last_message: String::new(),
            message_count: 0,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_session() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("user_1", "Resume review", Utc::now());
        let created = repo.create_session(&session).await.unwrap();
        assert_eq!(created.id, session.id);

        let fetched = repo
            .get_session_for_user("user_1", &session.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.title, "Resume review");
        assert_eq!(fetched.message_count, 0);
    }

    #[tokio::test]
    async fn test_get_session_scoped_to_owner() {
        let pool = test_pool().await;
        seed_user(&pool, "owner").await;
        seed_user(&pool, "intruder").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("owner", "Private", Utc::now());
        repo.create_session(&session).await.unwrap();

        let fetched = repo
            .get_session_for_user("intruder", &session.id)
            .await
            .unwrap();
        assert!(fetched.is_none());
    }

    #[tokio::test]
    async fn test_append_message_assigns_seq_and_updates_caches() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("user_1", "New Chat", Utc::now());
        repo.create_session(&session).await.unwrap();

        let t1 = Utc::now();
        let (after_first, first) = repo
            .append_message(
                "user_1",
                &session.id,
                Uuid::now_v7(),
                MessageRole::User,
                "What careers fit a biology degree?",
                t1,
            )
            .await
            .unwrap();
        assert_eq!(first.seq, 1);
        assert_eq!(after_first.message_count, 1);

        let t2 = t1 + Duration::seconds(1);
        let (after_second, second) = repo
            .append_message(
                "user_1",
                &session.id,
                Uuid::now_v7(),
                MessageRole::Assistant,
                "Biotech, research, and healthcare are strong fits.",
                t2,
            )
            .await
            .unwrap();
        assert_eq!(second.seq, 2);
        assert_eq!(after_second.message_count, 2);
        assert_eq!(
            after_second.last_message,
            "Biotech, research, and healthcare are strong fits."
        );
        assert_eq!(after_second.updated_at, t2);

        let messages = repo.get_messages(&session.id).await.unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].seq, 1);
        assert_eq!(messages[0].role, MessageRole::User);
        assert_eq!(messages[1].seq, 2);
        assert_eq!(messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_append_message_to_foreign_session_writes_nothing() {
        let pool = test_pool().await;
        seed_user(&pool, "owner").await;
        seed_user(&pool, "intruder").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("owner", "Private", Utc::now());
        repo.create_session(&session).await.unwrap();

        let result = repo
            .append_message(
                "intruder",
                &session.id,
                Uuid::now_v7(),
                MessageRole::User,
                "hello?",
                Utc::now(),
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));

        assert_eq!(repo.count_all_messages().await.unwrap(), 0);
        let fetched = repo
            .get_session_for_user("owner", &session.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.message_count, 0);
    }

    #[tokio::test]
    async fn test_append_message_to_missing_session() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        let repo = SqliteChatRepository::new(pool);

        let result = repo
            .append_message(
                "user_1",
                &Uuid::now_v7(),
                Uuid::now_v7(),
                MessageRole::User,
                "hello?",
                Utc::now(),
            )
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_list_sessions_orders_by_recency_and_paginates() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        let repo = SqliteChatRepository::new(pool);

        let base = Utc::now();
        let mut ids = Vec::new();
        for i in 0..7 {
            let mut session = make_session("user_1", &format!("Session {i}"), base);
            session.updated_at = base + Duration::seconds(i);
            repo.create_session(&session).await.unwrap();
            ids.push(session.id);
        }

        let first_page = repo.list_sessions("user_1", 5, 0).await.unwrap();
        assert_eq!(first_page.len(), 5);
        // Most recently updated first
        assert_eq!(first_page[0].id, ids[6]);
        assert_eq!(first_page[4].id, ids[2]);

        let second_page = repo.list_sessions("user_1", 5, 5).await.unwrap();
        assert_eq!(second_page.len(), 2);
        assert_eq!(second_page[0].id, ids[1]);
        assert_eq!(second_page[1].id, ids[0]);

        let past_the_end = repo.list_sessions("user_1", 5, 10).await.unwrap();
        assert!(past_the_end.is_empty());

        assert_eq!(repo.count_sessions("user_1").await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_list_sessions_excludes_other_users() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        seed_user(&pool, "user_2").await;
        let repo = SqliteChatRepository::new(pool);

        repo.create_session(&make_session("user_1", "Mine", Utc::now()))
            .await
            .unwrap();
        repo.create_session(&make_session("user_2", "Theirs", Utc::now()))
            .await
            .unwrap();

        let sessions = repo.list_sessions("user_1", 10, 0).await.unwrap();
        assert_eq!(sessions.len(), 1);
        assert_eq!(sessions[0].title, "Mine");
        assert_eq!(repo.count_sessions("user_1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_update_session_title() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("user_1", "New Chat", Utc::now());
        repo.create_session(&session).await.unwrap();

        let later = session.updated_at + Duration::seconds(5);
        repo.update_session_title("user_1", &session.id, "Interview prep", later)
            .await
            .unwrap();

        let fetched = repo
            .get_session_for_user("user_1", &session.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.title, "Interview prep");
        assert_eq!(fetched.updated_at, later);
    }

    #[tokio::test]
    async fn test_update_title_foreign_session_not_found() {
        let pool = test_pool().await;
        seed_user(&pool, "owner").await;
        seed_user(&pool, "intruder").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("owner", "Private", Utc::now());
        repo.create_session(&session).await.unwrap();

        let result = repo
            .update_session_title("intruder", &session.id, "Hijacked", Utc::now())
            .await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_session_cascades_messages() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("user_1", "Doomed", Utc::now());
        repo.create_session(&session).await.unwrap();
        repo.append_message(
            "user_1",
            &session.id,
            Uuid::now_v7(),
            MessageRole::User,
            "first",
            Utc::now(),
        )
        .await
        .unwrap();

        assert_eq!(repo.count_all_messages().await.unwrap(), 1);

        repo.delete_session("user_1", &session.id).await.unwrap();

        assert!(
            repo.get_session_for_user("user_1", &session.id)
                .await
                .unwrap()
                .is_none()
        );
        assert_eq!(repo.count_all_messages().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_delete_foreign_session_not_found() {
        let pool = test_pool().await;
        seed_user(&pool, "owner").await;
        seed_user(&pool, "intruder").await;
        let repo = SqliteChatRepository::new(pool);

        let session = make_session("owner", "Private", Utc::now());
        repo.create_session(&session).await.unwrap();

        let result = repo.delete_session("intruder", &session.id).await;
        assert!(matches!(result, Err(RepositoryError::NotFound)));

        // Still there for the owner
        assert!(
            repo.get_session_for_user("owner", &session.id)
                .await
                .unwrap()
                .is_some()
        );
    }

    #[tokio::test]
    async fn test_counts_across_users() {
        let pool = test_pool().await;
        seed_user(&pool, "user_1").await;
        seed_user(&pool, "user_2").await;
        let repo = SqliteChatRepository::new(pool);

        let a = make_session("user_1", "A", Utc::now());
        let b = make_session("user_2", "B", Utc::now());
        repo.create_session(&a).await.unwrap();
        repo.create_session(&b).await.unwrap();
        repo.append_message(
            "user_1",
            &a.id,
            Uuid::now_v7(),
            MessageRole::User,
            "hi",
            Utc::now(),
        )
        .await
        .unwrap();

        assert_eq!(repo.count_all_sessions().await.unwrap(), 2);
        assert_eq!(repo.count_all_messages().await.unwrap(), 1);
    }
}
