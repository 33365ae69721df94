//! In-memory message log.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use dumai_core::repository::{MessageRepository, SessionRepository};
use dumai_types::chat::{ChatMessage, Language, MessageId, MessageRole};
use dumai_types::error::RepositoryError;

/// Append-only message log keyed by message id.
///
/// Holds a handle to the session store so every append refreshes the owning
/// session's `updated_at`. Appends for transient session ids are stored like
/// any other message; the touch is then a no-op.
///
/// Ids and timestamps come out of one lock, so a larger id never carries an
/// earlier timestamp, even if the wall clock steps backwards.
#[derive(Debug, Clone)]
pub struct InMemoryMessageLog<S> {
    inner: Arc<DashMap<MessageId, ChatMessage>>,
    clock: Arc<Mutex<Stamp>>,
    sessions: S,
}

/// Last id handed out and the timestamp that went with it.
#[derive(Debug)]
struct Stamp {
    id: MessageId,
    at: DateTime<Utc>,
}

impl<S: SessionRepository> InMemoryMessageLog<S> {
    pub fn new(sessions: S) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            clock: Arc::new(Mutex::new(Stamp {
                id: 0,
                at: DateTime::<Utc>::MIN_UTC,
            })),
            sessions,
        }
    }

    /// Allocate the next id together with a timestamp no earlier than the last one.
    fn next_stamp(&self) -> Result<(MessageId, DateTime<Utc>), RepositoryError> {
        let mut last = self
            .clock
            .lock()
            .map_err(|_| RepositoryError::Query("message clock lock poisoned".into()))?;
        last.id += 1;
        last.at = Utc::now().max(last.at);
        Ok((last.id, last.at))
    }
}

impl<S: SessionRepository> MessageRepository for InMemoryMessageLog<S> {
    async fn append(
        &self,
        session_id: &str,
        role: MessageRole,
        content: String,
        language: Language,
    ) -> Result<ChatMessage, RepositoryError> {
        let (id, timestamp) = self.next_stamp()?;
        let message = ChatMessage {
            id,
            session_id: session_id.to_string(),
            role,
            content,
            language,
            timestamp,
        };
        self.inner.insert(id, message.clone());

        self.sessions.touch(session_id).await?;
        tracing::debug!(session_id, message_id = id, %role, "Message appended");
        Ok(message)
    }

    async fn list_by_session(&self, session_id: &str) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut messages: Vec<ChatMessage> = self
            .inner
            .iter()
            .filter(|r| r.value().session_id == session_id)
            .map(|r| r.value().clone())
            .collect();
        messages.sort_by(|a, b| a.timestamp.cmp(&b.timestamp).then(a.id.cmp(&b.id)));
        Ok(messages)
    }

    async fn list_all(&self) -> Result<Vec<ChatMessage>, RepositoryError> {
        let mut messages: Vec<ChatMessage> = self.inner.iter().map(|r| r.value().clone()).collect();
        messages.sort_by_key(|m| m.id);
        Ok(messages)
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.inner.len() as u64)
    }
}
