use std::fmt;

use thiserror::Error;

use crate::identity::UserId;

/// Errors from repository operations (used by trait definitions in dumai-core).
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage unavailable")]
    Connection,

    #[error("query error: {0}")]
    Query(String),

    #[error("conflict: {0}")]
    Conflict(String),
}

/// Errors from the external reply generator.
#[derive(Debug, Error)]
pub enum ReplyError {
    #[error("reply generator unavailable: {0}")]
    Unavailable(String),

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ReplyError {
    /// Message suitable for showing to the person chatting.
    pub fn user_message(&self) -> &'static str {
        match self {
            ReplyError::AuthenticationFailed => {
                "DumAI could not log in to its brain. Check the API key and try again."
            }
            ReplyError::RateLimited => {
                "DumAI is being confidently wrong for too many people right now. Please try again in a moment."
            }
            _ => {
                "Failed to get a response from DumAI. Even my errors are wrong! Please try again later."
            }
        }
    }
}

/// A single rejected field of an inbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors surfaced by the chat orchestrator.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("invalid request: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    #[error("session '{0}' not found")]
    SessionNotFound(String),

    #[error("user {0} not found")]
    UserNotFound(UserId),

    #[error(transparent)]
    Upstream(#[from] ReplyError),

    #[error("no session or identity could be resolved for this turn")]
    Unresolved,

    #[error(transparent)]
    Storage(#[from] RepositoryError),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_display() {
        let err = RepositoryError::Query("syntax error".to_string());
        assert_eq!(err.to_string(), "query error: syntax error");
    }

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = ChatError::Validation(vec![
            FieldViolation::new("username", "must not be blank"),
            FieldViolation::new("message", "too long"),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid request: username: must not be blank; message: too long"
        );
    }

    #[test]
    fn test_upstream_error_is_transparent() {
        let err: ChatError = ReplyError::AuthenticationFailed.into();
        assert_eq!(err.to_string(), "authentication failed");
    }

    #[test]
    fn test_reply_error_user_message() {
        let msg = ReplyError::Unavailable("timeout".into()).user_message();
        assert!(msg.contains("Even my errors are wrong"));
        assert!(ReplyError::AuthenticationFailed.user_message().contains("API key"));
    }
}
