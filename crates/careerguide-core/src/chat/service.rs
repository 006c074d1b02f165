//! Chat service orchestrating users, sessions, and message persistence.
//!
//! ChatService coordinates the ChatRepository and UserRepository to manage
//! the full conversation lifecycle: materializing users from identity
//! claims, creating sessions, appending messages, renaming, deleting, and
//! paginating session history.

use careerguide_types::chat::{ChatSession, MessageRole, SessionWithMessages};
use careerguide_types::error::RepositoryError;
use careerguide_types::page::{Page, PageMeta, PageRequest};
use careerguide_types::user::{User, UserProfile};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::chat::repository::ChatRepository;
use crate::user::repository::UserRepository;

/// Orchestrates user materialization, session lifecycle, and message
/// persistence.
///
/// Generic over `ChatRepository` and `UserRepository` to maintain clean
/// architecture (careerguide-core never depends on careerguide-infra).
/// Every session operation is scoped to the calling user; a session owned
/// by someone else surfaces as `NotFound`.
pub struct ChatService<C: ChatRepository, U: UserRepository> {
    chat_repo: C,
    user_repo: U,
}

impl<C: ChatRepository, U: UserRepository> ChatService<C, U> {
    /// Create a new chat service with the given repositories.
    pub fn new(chat_repo: C, user_repo: U) -> Self {
        Self {
            chat_repo,
            user_repo,
        }
    }

    /// Access the chat repository.
    pub fn chat_repo(&self) -> &C {
        &self.chat_repo
    }

    /// Access the user repository.
    pub fn user_repo(&self) -> &U {
        &self.user_repo
    }

    // --- User materialization ---

    /// Idempotently materialize the user row for verified identity claims.
    ///
    /// Inserts on first sight; refreshes name/email on later calls so a
    /// changed provider profile converges. Never runs as a hidden side
    /// effect of a read.
    pub async fn ensure_user(&self, profile: &UserProfile) -> Result<User, RepositoryError> {
        self.user_repo.upsert_user(profile, Utc::now()).await
    }

    // --- Session lifecycle ---

    /// Create a new chat session for the given user.
    ///
    /// Ensures the user row exists first. A missing or blank title falls
    /// back to the default. The new session starts with an empty
    /// `last_message` and no messages.
    pub async fn create_session(
        &self,
        profile: &UserProfile,
        title: Option<String>,
    ) -> Result<SessionWithMessages, RepositoryError> {
        let user = self.ensure_user(profile).await?;

        let now = Utc::now();
        let title = title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| ChatSession::DEFAULT_TITLE.to_string());
        let session = ChatSession {
            id: Uuid::now_v7(),
            user_id: user.id,
            title,
            last_message: String::new(),
            message_count: 0,
            created_at: now,
            updated_at: now,
        };

        let session = self.chat_repo.create_session(&session).await?;
        info!(session_id = %session.id, "Chat session created");

        Ok(SessionWithMessages {
            session,
            messages: Vec::new(),
        })
    }

    /// Get one of the user's sessions with its full ordered message list.
    pub async fn get_session(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> Result<Option<SessionWithMessages>, RepositoryError> {
        let Some(session) = self
            .chat_repo
            .get_session_for_user(user_id, session_id)
            .await?
        else {
            return Ok(None);
        };
        let messages = self.chat_repo.get_messages(session_id).await?;
        Ok(Some(SessionWithMessages { session, messages }))
    }

    /// List the user's sessions, most recently active first, with messages.
    ///
    /// A page past the end yields an empty item list; the metadata still
    /// describes the real boundaries.
    pub async fn list_sessions(
        &self,
        user_id: &str,
        request: PageRequest,
    ) -> Result<Page<SessionWithMessages>, RepositoryError> {
        let total_count = self.chat_repo.count_sessions(user_id).await?;

        let limit = i64::from(request.limit);
        let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
        let sessions = self.chat_repo.list_sessions(user_id, limit, offset).await?;

        let mut items = Vec::with_capacity(sessions.len());
        for session in sessions {
            let messages = self.chat_repo.get_messages(&session.id).await?;
            items.push(SessionWithMessages { session, messages });
        }

        Ok(Page {
            items,
            meta: PageMeta::compute(request, total_count),
        })
    }

    /// Rename one of the user's sessions.
    ///
    /// Bumps `updated_at` so the session moves to the front of the list.
    /// `NotFound` when the user owns no such session.
    pub async fn update_session_title(
        &self,
        user_id: &str,
        session_id: &Uuid,
        title: &str,
    ) -> Result<SessionWithMessages, RepositoryError> {
        self.chat_repo
            .update_session_title(user_id, session_id, title, Utc::now())
            .await?;
        info!(session_id = %session_id, "Session title updated");

        let session = self
            .chat_repo
            .get_session_for_user(user_id, session_id)
            .await?
            .ok_or(RepositoryError::NotFound)?;
        let messages = self.chat_repo.get_messages(session_id).await?;
        Ok(SessionWithMessages { session, messages })
    }

    /// Delete one of the user's sessions and all of its messages.
    ///
    /// `NotFound` when the user owns no such session.
    pub async fn delete_session(
        &self,
        user_id: &str,
        session_id: &Uuid,
    ) -> Result<(), RepositoryError> {
        self.chat_repo.delete_session(user_id, session_id).await?;
        info!(session_id = %session_id, "Chat session deleted");
        Ok(())
    }

    // --- Message persistence ---

    /// Append a message to one of the user's sessions.
    ///
    /// The insert and the session's `last_message`/`message_count`/
    /// `updated_at` update commit in one repository transaction. Returns
    /// the updated session with its full message list. `NotFound` when the
    /// user owns no such session; nothing is written in that case.
    pub async fn append_message(
        &self,
        user_id: &str,
        session_id: &Uuid,
        role: MessageRole,
        content: &str,
    ) -> Result<SessionWithMessages, RepositoryError> {
        let (session, message) = self
            .chat_repo
            .append_message(
                user_id,
                session_id,
                Uuid::now_v7(),
                role,
                content,
                Utc::now(),
            )
            .await?;
        info!(session_id = %session.id, seq = message.seq, role = %role, "Message appended");

        let messages = self.chat_repo.get_messages(session_id).await?;
        Ok(SessionWithMessages { session, messages })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use careerguide_types::chat::ChatMessage;
    use chrono::{DateTime, Utc};
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // --- Mock repositories for testing ---

    #[derive(Default)]
    struct MockState {
        users: HashMap<String, User>,
        sessions: HashMap<Uuid, ChatSession>,
        messages: HashMap<Uuid, Vec<ChatMessage>>,
    }

    /// In-memory repository backing both traits, shared via Arc so the
    /// service's two repo handles see the same state.
    #[derive(Clone, Default)]
    struct MockRepo {
        state: Arc<Mutex<MockState>>,
    }

    impl MockRepo {
        fn session(&self, id: &Uuid) -> Option<ChatSession> {
            self.state.lock().unwrap().sessions.get(id).cloned()
        }

        fn user_count(&self) -> usize {
            self.state.lock().unwrap().users.len()
        }

        fn message_rows(&self, session_id: &Uuid) -> usize {
            self.state
                .lock()
                .unwrap()
                .messages
                .get(session_id)
                .map_or(0, Vec::len)
        }
    }

    impl UserRepository for MockRepo {
        async fn upsert_user(
            &self,
            profile: &UserProfile,
            created_at: DateTime<Utc>,
        ) -> Result<User, RepositoryError> {
            let mut state = self.state.lock().unwrap();
            let user = state
                .users
                .entry(profile.id.clone())
                .and_modify(|u| {
                    u.name = profile.name.clone();
                    u.email = profile.email.clone();
                })
                .or_insert(User {
                    id: profile.id.clone(),
                    name: profile.name.clone(),
                    email: profile.email.clone(),
                    created_at,
                });
            Ok(user.clone())
        }

        async fn get_user(&self, user_id: &str) -> Result<Option<User>, RepositoryError> {
            Ok(self.state.lock().unwrap().users.get(user_id).cloned())
        }

        async fn count_users(&self) -> Result<u64, RepositoryError> {
            Ok(self.state.lock().unwrap().users.len() as u64)
        }
    }

    impl ChatRepository for MockRepo {
        async fn create_session(
            &self,
            session: &ChatSession,
        ) -> Result<ChatSession, RepositoryError> {
            let mut state = self.state.lock().unwrap();
            state.sessions.insert(session.id, session.clone());
            state.messages.insert(session.id, Vec::new());
            Ok(session.clone())
        }

        async fn get_session_for_user(
            &self,
            user_id: &str,
            session_id: &Uuid,
        ) -> Result<Option<ChatSession>, RepositoryError> {
            Ok(self
                .state
                .lock()
                .unwrap()
                .sessions
                .get(session_id)
                .filter(|s| s.user_id == user_id)
                .cloned())
        }

        async fn list_sessions(
            &self,
            user_id: &str,
            limit: i64,
            offset: i64,
        ) -> Result<Vec<ChatSession>, RepositoryError> {
            let state = self.state.lock().unwrap();
            let mut sessions: Vec<ChatSession> = state
                .sessions
                .values()
                .filter(|s| s.user_id == user_id)
                .cloned()
                .collect();
            sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
            Ok(sessions
                .into_iter()
                .skip(offset as usize)
                .take(limit as usize)
                .collect())
        }

        async fn count_sessions(&self, user_id: &str) -> Result<u64, RepositoryError> {
            let state = self.state.lock().unwrap();
            Ok(state
                .sessions
                .values()
                .filter(|s| s.user_id == user_id)
                .count() as u64)
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
            let mut state = self.state.lock().unwrap();
            let session = state
                .sessions
                .get_mut(session_id)
                .filter(|s| s.user_id == user_id)
                .ok_or(RepositoryError::NotFound)?;

            session.message_count += 1;
            session.last_message = content.to_string();
            session.updated_at = created_at;
            let session = session.clone();

            let message = ChatMessage {
                id: message_id,
                session_id: *session_id,
                seq: session.message_count,
                role,
                content: content.to_string(),
                created_at,
            };
            state
                .messages
                .entry(*session_id)
                .or_default()
                .push(message.clone());

            Ok((session, message))
        }

        async fn update_session_title(
            &self,
            user_id: &str,
            session_id: &Uuid,
            title: &str,
            updated_at: DateTime<Utc>,
        ) -> Result<(), RepositoryError> {
            let mut state = self.state.lock().unwrap();
            let session = state
                .sessions
                .get_mut(session_id)
                .filter(|s| s.user_id == user_id)
                .ok_or(RepositoryError::NotFound)?;
            session.title = title.to_string();
            session.updated_at = updated_at;
            Ok(())
        }

        async fn delete_session(
            &self,
            user_id: &str,
            session_id: &Uuid,
        ) -> Result<(), RepositoryError> {
            let mut state = self.state.lock().unwrap();
            let owned = state
                .sessions
                .get(session_id)
                .is_some_and(|s| s.user_id == user_id);
            if !owned {
                return Err(RepositoryError::NotFound);
            }
            state.sessions.remove(session_id);
            state.messages.remove(session_id);
            Ok(())
        }

        async fn get_messages(
            &self,
            session_id: &Uuid,
        ) -> Result<Vec<ChatMessage>, RepositoryError> {
            let state = self.state.lock().unwrap();
            let mut messages = state.messages.get(session_id).cloned().unwrap_or_default();
            messages.sort_by_key(|m| m.seq);
            Ok(messages)
        }

        async fn count_all_sessions(&self) -> Result<u64, RepositoryError> {
            Ok(self.state.lock().unwrap().sessions.len() as u64)
        }

        async fn count_all_messages(&self) -> Result<u64, RepositoryError> {
            let state = self.state.lock().unwrap();
            Ok(state.messages.values().map(Vec::len).sum::<usize>() as u64)
        }
    }

    fn service() -> (ChatService<MockRepo, MockRepo>, MockRepo) {
        let repo = MockRepo::default();
        (ChatService::new(repo.clone(), repo.clone()), repo)
    }

    fn alice() -> UserProfile {
        UserProfile::new(
            "user_alice".to_string(),
            Some("Alice Johnson".to_string()),
            Some("alice@example.com".to_string()),
        )
    }

    // --- Tests ---

    #[tokio::test]
    async fn test_create_session_defaults_title_and_materializes_user() {
        let (service, repo) = service();

        let created = service.create_session(&alice(), None).await.unwrap();

        assert_eq!(created.session.title, "New Chat");
        assert_eq!(created.session.last_message, "");
        assert_eq!(created.session.message_count, 0);
        assert!(created.messages.is_empty());
        assert_eq!(repo.user_count(), 1);
    }

    #[tokio::test]
    async fn test_create_session_keeps_provided_title() {
        let (service, _repo) = service();

        let created = service
            .create_session(&alice(), Some("Resume review".to_string()))
            .await
            .unwrap();

        assert_eq!(created.session.title, "Resume review");
    }

    #[tokio::test]
    async fn test_create_session_treats_blank_title_as_missing() {
        let (service, _repo) = service();

        let created = service
            .create_session(&alice(), Some("   ".to_string()))
            .await
            .unwrap();

        assert_eq!(created.session.title, "New Chat");
    }

    #[tokio::test]
    async fn test_ensure_user_is_idempotent_and_refreshes_profile() {
        let (service, repo) = service();

        service.ensure_user(&alice()).await.unwrap();
        let renamed = UserProfile::new(
            "user_alice".to_string(),
            Some("Alice J.".to_string()),
            Some("alice@example.com".to_string()),
        );
        let user = service.ensure_user(&renamed).await.unwrap();

        assert_eq!(repo.user_count(), 1);
        assert_eq!(user.name, "Alice J.");
    }

    #[tokio::test]
    async fn test_append_updates_session_caches() {
        let (service, _repo) = service();
        let created = service.create_session(&alice(), None).await.unwrap();
        let session_id = created.session.id;

        service
            .append_message(
                "user_alice",
                &session_id,
                MessageRole::User,
                "What careers fit a biology degree?",
            )
            .await
            .unwrap();
        let after = service
            .append_message(
                "user_alice",
                &session_id,
                MessageRole::Assistant,
                "Lab research, biotech sales, or science writing are good fits.",
            )
            .await
            .unwrap();

        assert_eq!(after.session.message_count, 2);
        assert_eq!(
            after.session.last_message,
            "Lab research, biotech sales, or science writing are good fits."
        );
        assert!(after.session.updated_at >= created.session.updated_at);
        assert_eq!(after.messages.len(), 2);
        assert_eq!(
            after.messages.iter().map(|m| m.seq).collect::<Vec<_>>(),
            vec![1, 2]
        );
        assert_eq!(after.messages[0].role, MessageRole::User);
        assert_eq!(after.messages[1].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_append_to_foreign_session_is_not_found() {
        let (service, repo) = service();
        let created = service.create_session(&alice(), None).await.unwrap();

        let result = service
            .append_message(
                "user_bob",
                &created.session.id,
                MessageRole::User,
                "hello",
            )
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        // Nothing was written for the failed append.
        assert_eq!(repo.message_rows(&created.session.id), 0);
        assert_eq!(repo.session(&created.session.id).unwrap().message_count, 0);
    }

    #[tokio::test]
    async fn test_get_session_scopes_by_owner() {
        let (service, _repo) = service();
        let created = service.create_session(&alice(), None).await.unwrap();

        let mine = service
            .get_session("user_alice", &created.session.id)
            .await
            .unwrap();
        let theirs = service
            .get_session("user_bob", &created.session.id)
            .await
            .unwrap();

        assert!(mine.is_some());
        assert!(theirs.is_none());
    }

    #[tokio::test]
    async fn test_list_sessions_pages_and_orders_by_recency() {
        let (service, _repo) = service();
        let mut ids = Vec::new();
        for i in 0..7 {
            let created = service
                .create_session(&alice(), Some(format!("Session {i}")))
                .await
                .unwrap();
            ids.push(created.session.id);
            // Touch each session so updated_at strictly increases.
            service
                .append_message(
                    "user_alice",
                    &created.session.id,
                    MessageRole::User,
                    &format!("message {i}"),
                )
                .await
                .unwrap();
        }

        let page_one = service
            .list_sessions("user_alice", PageRequest::new(1, 5, 50))
            .await
            .unwrap();
        let page_two = service
            .list_sessions("user_alice", PageRequest::new(2, 5, 50))
            .await
            .unwrap();

        assert_eq!(page_one.items.len(), 5);
        assert_eq!(page_two.items.len(), 2);
        assert_eq!(page_one.meta.total_pages, 2);
        assert_eq!(page_one.meta.total_count, 7);
        assert!(page_one.meta.has_next_page);
        assert!(!page_one.meta.has_previous_page);
        assert!(!page_two.meta.has_next_page);
        assert!(page_two.meta.has_previous_page);

        // Most recently touched session comes first.
        assert_eq!(page_one.items[0].session.id, ids[6]);
        assert_eq!(page_two.items[1].session.id, ids[0]);
        // Each listed session carries its messages.
        assert_eq!(page_one.items[0].messages.len(), 1);
    }

    #[tokio::test]
    async fn test_list_sessions_does_not_leak_other_users() {
        let (service, _repo) = service();
        service.create_session(&alice(), None).await.unwrap();
        let bob = UserProfile::new("user_bob".to_string(), None, None);
        service.create_session(&bob, None).await.unwrap();

        let page = service
            .list_sessions("user_alice", PageRequest::new(1, 7, 50))
            .await
            .unwrap();

        assert_eq!(page.meta.total_count, 1);
        assert!(page.items.iter().all(|s| s.session.user_id == "user_alice"));
    }

    #[tokio::test]
    async fn test_update_title_moves_session_forward() {
        let (service, _repo) = service();
        let created = service.create_session(&alice(), None).await.unwrap();

        let updated = service
            .update_session_title("user_alice", &created.session.id, "Interview prep")
            .await
            .unwrap();

        assert_eq!(updated.session.title, "Interview prep");
        assert!(updated.session.updated_at >= created.session.updated_at);
    }

    #[tokio::test]
    async fn test_update_title_foreign_session_is_not_found() {
        let (service, repo) = service();
        let created = service.create_session(&alice(), None).await.unwrap();

        let result = service
            .update_session_title("user_bob", &created.session.id, "stolen")
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert_eq!(repo.session(&created.session.id).unwrap().title, "New Chat");
    }

    #[tokio::test]
    async fn test_delete_session_removes_messages() {
        let (service, repo) = service();
        let created = service.create_session(&alice(), None).await.unwrap();
        let session_id = created.session.id;
        for i in 0..3 {
            service
                .append_message(
                    "user_alice",
                    &session_id,
                    MessageRole::User,
                    &format!("message {i}"),
                )
                .await
                .unwrap();
        }

        service
            .delete_session("user_alice", &session_id)
            .await
            .unwrap();

        assert!(repo.session(&session_id).is_none());
        assert_eq!(repo.message_rows(&session_id), 0);
        let page = service
            .list_sessions("user_alice", PageRequest::new(1, 7, 50))
            .await
            .unwrap();
        assert_eq!(page.meta.total_count, 0);
    }

    #[tokio::test]
    async fn test_delete_foreign_session_is_not_found() {
        let (service, repo) = service();
        let created = service.create_session(&alice(), None).await.unwrap();

        let result = service
            .delete_session("user_bob", &created.session.id)
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert!(repo.session(&created.session.id).is_some());
    }
}
