//! Wire shapes of the JSON API (camelCase field names).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dumai_types::chat::{ChatMessage, ChatSession, Language, MessageId, MessageRole};
use dumai_types::identity::{Identity, UserId};

#[derive(Debug, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UserDto {
    pub id: UserId,
    pub username: String,
}

impl From<Identity> for UserDto {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    pub user: UserDto,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ChatSession> for SessionSummary {
    fn from(session: ChatSession) -> Self {
        Self {
            id: session.id,
            title: session.title,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionSummary>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDto {
    pub id: MessageId,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub language: Language,
}

impl From<ChatMessage> for MessageDto {
    fn from(message: ChatMessage) -> Self {
        Self {
            id: message.id,
            session_id: message.session_id,
            role: message.role,
            content: message.content,
            timestamp: message.timestamp,
            language: message.language,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessagesResponse {
    pub messages: Vec<MessageDto>,
}

impl MessagesResponse {
    pub fn from_messages(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages: messages.into_iter().map(MessageDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub users: u64,
    pub sessions: u64,
    pub messages: u64,
}
