//! Inbound turn request and its outcome.

use serde::{Deserialize, Serialize};

use dumai_types::chat::Language;
use dumai_types::error::{ChatError, FieldViolation};
use dumai_types::identity::UserId;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_CHARS: usize = 64;

/// One inbound chat turn, as handed over by the transport layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub initial: bool,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub user_id: Option<UserId>,
    #[serde(default)]
    pub username: Option<String>,
}

impl TurnRequest {
    /// A regular user turn carrying `message`.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::default()
        }
    }

    /// The synthetic welcome handshake.
    pub fn initial() -> Self {
        Self {
            initial: true,
            ..Self::default()
        }
    }

    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn with_user_id(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Message text, empty when absent.
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }

    /// Check every field and report all violations at once.
    pub fn validate(&self, max_message_chars: usize) -> Result<(), ChatError> {
        let mut violations = Vec::new();

        if self.text().chars().count() > max_message_chars {
            violations.push(FieldViolation::new(
                "message",
                format!("must be at most {max_message_chars} characters"),
            ));
        }

        if let Some(username) = &self.username {
            if let Err(violation) = validate_username(username) {
                violations.push(violation);
            }
        }

        if let Some(session_id) = &self.session_id {
            if session_id.trim().is_empty() {
                violations.push(FieldViolation::new("sessionId", "must not be blank"));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ChatError::Validation(violations))
        }
    }
}

/// Username rules shared by chat turns and explicit registration.
pub fn validate_username(username: &str) -> Result<(), FieldViolation> {
    if username.trim().is_empty() {
        return Err(FieldViolation::new("username", "must not be blank"));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(FieldViolation::new(
            "username",
            format!("must be at most {MAX_USERNAME_CHARS} characters"),
        ));
    }
    Ok(())
}

/// Result of a successful turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Generated assistant reply.
    pub message: String,
    /// Session the turn was recorded under; clients send it back next turn.
    pub session_id: String,
    pub language: Language,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_request() {
        let json = r#"{"message":"Hi","sessionId":"s-1","userId":4,"username":"ada"}"#;
        let req: TurnRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.text(), "Hi");
        assert_eq!(req.session_id.as_deref(), Some("s-1"));
        assert_eq!(req.user_id, Some(4));
        assert!(!req.initial);
    }

    #[test]
    fn test_deserialize_empty_object() {
        let req: TurnRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req, TurnRequest::default());
        assert_eq!(req.text(), "");
    }

    #[test]
    fn test_validate_accepts_plain_message() {
        assert!(TurnRequest::message("hello").validate(100).is_ok());
        assert!(TurnRequest::initial().validate(100).is_ok());
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let req = TurnRequest::message("x".repeat(11))
            .with_username("   ")
            .with_session("");
        match req.validate(10) {
            Err(ChatError::Validation(violations)) => {
                let fields: Vec<_> = violations.iter().map(|v| v.field).collect();
                assert_eq!(fields, vec!["message", "username", "sessionId"]);
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_username_length() {
        assert!(validate_username(&"u".repeat(MAX_USERNAME_CHARS)).is_ok());
        let err = validate_username(&"u".repeat(MAX_USERNAME_CHARS + 1)).unwrap_err();
        assert_eq!(err.field, "username");
    }

    #[test]
    fn test_outcome_serializes_camel_case() {
        let outcome = TurnOutcome {
            message: "Paris is in Texas".into(),
            session_id: "abc".into(),
            language: Language::new("en"),
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert_eq!(
            json,
            r#"{"message":"Paris is in Texas","sessionId":"abc","language":"en"}"#
        );
    }
}
