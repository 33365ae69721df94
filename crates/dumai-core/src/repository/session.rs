//! SessionRepository trait definition.

use dumai_types::chat::{ChatSession, SessionTitle};
use dumai_types::error::RepositoryError;
use dumai_types::identity::UserId;

/// Repository trait for chat session persistence.
///
/// Implementations live in dumai-infra (e.g., `InMemorySessionStore`).
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
pub trait SessionRepository: Send + Sync {
    /// Create a session with a fresh id; `created_at == updated_at == now`.
    fn create(
        &self,
        owner_id: UserId,
        title: SessionTitle,
        personality: &str,
    ) -> impl std::future::Future<Output = Result<ChatSession, RepositoryError>> + Send;

    /// Get a session by its id.
    fn get_by_id(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// List sessions owned by `owner_id`, most recently updated first.
    ///
    /// Sessions with equal `updated_at` keep their creation order.
    fn list_by_owner(
        &self,
        owner_id: UserId,
    ) -> impl std::future::Future<Output = Result<Vec<ChatSession>, RepositoryError>> + Send;

    /// Overwrite the title, clear `title_is_default` and refresh `updated_at`.
    ///
    /// Does not enforce rename-once; that policy belongs to the orchestrator.
    fn rename_title(
        &self,
        session_id: &str,
        title: &str,
    ) -> impl std::future::Future<Output = Result<Option<ChatSession>, RepositoryError>> + Send;

    /// Refresh `updated_at` without touching anything else.
    ///
    /// Unknown ids are ignored.
    fn touch(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Number of stored sessions.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
