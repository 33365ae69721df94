//! Chat session and message types for DumAI.
//!
//! These types model conversations between a visitor and the assistant:
//! sessions (one per conversation thread), the messages inside them, and the
//! language tag attached to every stored message.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use std::fmt;
use std::str::FromStr;

use crate::identity::UserId;

/// Numeric message id. Defines a total order across the whole log.
pub type MessageId = u64;

/// Role of a stored chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl fmt::Display for MessageRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

impl FromStr for MessageRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(MessageRole::User),
            "assistant" => Ok(MessageRole::Assistant),
            other => Err(format!("invalid message role: '{other}'")),
        }
    }
}

/// Language tag detected for a message (ISO 639-1, or `und`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Language(String);

impl Language {
    /// Tag used when no language could be determined (empty input).
    pub const UNDETERMINED: &'static str = "und";

    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn undetermined() -> Self {
        Self(Self::UNDETERMINED.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_undetermined(&self) -> bool {
        self.0 == Self::UNDETERMINED
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::undetermined()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Title supplied when creating a session.
///
/// Keeps the "still a placeholder" bit next to the text so stores never have
/// to compare against a sentinel string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTitle {
    Placeholder(String),
    Derived(String),
}

impl SessionTitle {
    pub fn as_str(&self) -> &str {
        match self {
            SessionTitle::Placeholder(t) | SessionTitle::Derived(t) => t,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, SessionTitle::Placeholder(_))
    }

    pub fn into_string(self) -> String {
        match self {
            SessionTitle::Placeholder(t) | SessionTitle::Derived(t) => t,
        }
    }
}

/// One persisted conversation thread, owned by exactly one identity.
///
/// `title_is_default` stays `true` until the first derived title is applied;
/// it is the only signal the orchestrator uses to decide whether a rename is
/// still allowed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSession {
    pub id: String,
    pub owner_id: UserId,
    pub title: String,
    pub title_is_default: bool,
    pub personality: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single message in the log.
///
/// `session_id` is a non-owning back-reference. Messages written for
/// anonymous turns carry a transient id that no stored session matches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub language: Language,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_role_roundtrip() {
        for role in [MessageRole::User, MessageRole::Assistant] {
            let parsed: MessageRole = role.to_string().parse().unwrap();
            assert_eq!(role, parsed);
        }
    }

    #[test]
    fn test_message_role_rejects_system() {
        let err = "system".parse::<MessageRole>().unwrap_err();
        assert!(err.contains("system"));
    }

    #[test]
    fn test_message_role_serde() {
        let json = serde_json::to_string(&MessageRole::Assistant).unwrap();
        assert_eq!(json, "\"assistant\"");
    }

    #[test]
    fn test_language_default_is_undetermined() {
        let lang = Language::default();
        assert!(lang.is_undetermined());
        assert_eq!(lang.as_str(), "und");
    }

    #[test]
    fn test_language_serializes_as_plain_string() {
        let json = serde_json::to_string(&Language::new("fr")).unwrap();
        assert_eq!(json, "\"fr\"");
    }

    #[test]
    fn test_chat_message_serialize() {
        let message = ChatMessage {
            id: 1,
            session_id: "abc".to_string(),
            role: MessageRole::User,
            content: "Hi".to_string(),
            language: Language::new("en"),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&message).unwrap();
        assert!(json.contains("\"role\":\"user\""));
        assert!(json.contains("\"language\":\"en\""));
    }
}
