//! MessageRepository trait definition.

use dumai_types::chat::{ChatMessage, Language, MessageRole};
use dumai_types::error::RepositoryError;

/// Repository trait for the message log.
///
/// Implementations live in dumai-infra (e.g., `InMemoryMessageLog`).
pub trait MessageRepository: Send + Sync {
    /// Append a message with the next id and the current time.
    ///
    /// Also refreshes the owning session's `updated_at` so that session
    /// recency follows conversational activity.
    fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: String,
        language: Language,
    ) -> impl std::future::Future<Output = Result<ChatMessage, RepositoryError>> + Send;

    /// Messages of one session, ascending by timestamp then id.
    fn list_by_session(
        &self,
        session_id: &str,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Every message in the log, ascending by id.
    fn list_all(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<ChatMessage>, RepositoryError>> + Send;

    /// Number of stored messages.
    fn count(&self) -> impl std::future::Future<Output = Result<u64, RepositoryError>> + Send;
}
