//! ReplyGenerator trait definition.
//!
//! The remote text-generation call is an external collaborator: the
//! orchestrator hands it the raw user text, the initial-handshake flag and the
//! session personality, and gets back the assistant's reply or an error.

use dumai_types::error::ReplyError;

/// Trait for reply generator backends (Groq, scripted test doubles, ...).
///
/// Implementations live in dumai-infra (e.g., `GroqReplyGenerator`).
pub trait ReplyGenerator: Send + Sync {
    /// Human-readable backend name (e.g., "groq").
    fn name(&self) -> &str;

    /// Produce the assistant reply for one turn.
    ///
    /// `is_initial` marks the synthetic welcome handshake, in which case
    /// `text` is empty and the backend greets the user instead.
    fn generate_reply(
        &self,
        text: &str,
        is_initial: bool,
        personality: Option<&str>,
    ) -> impl std::future::Future<Output = Result<String, ReplyError>> + Send;
}
