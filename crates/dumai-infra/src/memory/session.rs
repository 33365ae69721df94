//! In-memory session store.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use uuid::Uuid;

use dumai_core::repository::SessionRepository;
use dumai_types::chat::{ChatSession, SessionTitle};
use dumai_types::error::RepositoryError;
use dumai_types::identity::UserId;

#[derive(Debug, Clone)]
struct StoredSession {
    session: ChatSession,
    /// Creation sequence, used to break `updated_at` ties.
    seq: u64,
}

/// Session store backed by a `DashMap` keyed by session id.
///
/// Cloning shares the same underlying map; the message log holds a clone so
/// it can refresh recency on append.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    inner: Arc<DashMap<String, StoredSession>>,
    next_seq: Arc<AtomicU64>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Current time, never earlier than `previous`.
fn refreshed(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous)
}

impl SessionRepository for InMemorySessionStore {
    async fn create(
        &self,
        owner_id: UserId,
        title: SessionTitle,
        personality: &str,
    ) -> Result<ChatSession, RepositoryError> {
        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::now_v7().to_string(),
            owner_id,
            title_is_default: title.is_placeholder(),
            title: title.into_string(),
            personality: personality.to_string(),
            created_at: now,
            updated_at: now,
        };
        let seq = self.next_seq.fetch_add(1, Ordering::SeqCst);

        self.inner.insert(
            session.id.clone(),
            StoredSession {
                session: session.clone(),
                seq,
            },
        );
        Ok(session)
    }

    async fn get_by_id(&self, session_id: &str) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self.inner.get(session_id).map(|r| r.value().session.clone()))
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<ChatSession>, RepositoryError> {
        let mut owned: Vec<StoredSession> = self
            .inner
            .iter()
            .filter(|r| r.value().session.owner_id == owner_id)
            .map(|r| r.value().clone())
            .collect();

        owned.sort_by(|a, b| {
            b.session
                .updated_at
                .cmp(&a.session.updated_at)
                .then(a.seq.cmp(&b.seq))
        });

        Ok(owned.into_iter().map(|s| s.session).collect())
    }

    async fn rename_title(
        &self,
        session_id: &str,
        title: &str,
    ) -> Result<Option<ChatSession>, RepositoryError> {
        Ok(self.inner.get_mut(session_id).map(|mut r| {
            let stored = r.value_mut();
            stored.session.title = title.to_string();
            stored.session.title_is_default = false;
            stored.session.updated_at = refreshed(stored.session.updated_at);
            stored.session.clone()
        }))
    }

    async fn touch(&self, session_id: &str) -> Result<(), RepositoryError> {
        if let Some(mut r) = self.inner.get_mut(session_id) {
            let stored = r.value_mut();
            stored.session.updated_at = refreshed(stored.session.updated_at);
        }
        Ok(())
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.inner.len() as u64)
    }
}
