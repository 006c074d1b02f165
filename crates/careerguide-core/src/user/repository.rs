//! UserRepository trait definition.
//!
//! Follows the same RPITIT pattern as ChatRepository.

use careerguide_types::error::RepositoryError;
use careerguide_types::user::{User, UserProfile};
use chrono::{DateTime, Utc};

/// Repository trait for user persistence.
///
/// Implementations live in careerguide-infra (e.g., `SqliteUserRepository`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait UserRepository: Send + Sync {
    /// Insert the user, or refresh name/email when the id already exists.
    ///
    /// `created_at` applies only to a newly inserted row; an existing row
    /// keeps its original creation time. Returns the stored user.
    fn upsert_user(
        &self,
        profile: &UserProfile,
        created_at: DateTime<Utc>,
    ) -> impl std::future::Future<Output = Result<User, RepositoryError>> + Send;

    /// Get a user by external identity id.
    fn get_user(
        &self,
        user_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<User>, RepositoryError>> + Send;

    /// Count all users.
    fn count_users(
        &self,
    ) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
