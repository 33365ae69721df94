//! In-memory identity registry.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use dumai_core::repository::IdentityRepository;
use dumai_types::error::RepositoryError;
use dumai_types::identity::{Identity, UserId};

/// Identity registry backed by two `DashMap`s (by id and by username).
///
/// `create_or_get` goes through the username map's entry API, so the
/// existence check and the insert happen under one shard lock.
#[derive(Debug, Clone)]
pub struct InMemoryIdentityStore {
    records: Arc<DashMap<UserId, Identity>>,
    names: Arc<DashMap<String, UserId>>,
    next_id: Arc<AtomicU64>,
}

impl InMemoryIdentityStore {
    pub fn new() -> Self {
        Self {
            records: Arc::new(DashMap::new()),
            names: Arc::new(DashMap::new()),
            next_id: Arc::new(AtomicU64::new(1)),
        }
    }
}

impl Default for InMemoryIdentityStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentityRepository for InMemoryIdentityStore {
    async fn get_by_id(&self, id: UserId) -> Result<Option<Identity>, RepositoryError> {
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn get_by_name(&self, username: &str) -> Result<Option<Identity>, RepositoryError> {
        let Some(id) = self.names.get(username).map(|r| *r.value()) else {
            return Ok(None);
        };
        Ok(self.records.get(&id).map(|r| r.value().clone()))
    }

    async fn create_or_get(
        &self,
        username: &str,
        credential: &str,
    ) -> Result<Identity, RepositoryError> {
        match self.names.entry(username.to_string()) {
            Entry::Occupied(entry) => {
                let id = *entry.get();
                drop(entry);
                self.records
                    .get(&id)
                    .map(|r| r.value().clone())
                    .ok_or_else(|| {
                        RepositoryError::Query(format!("identity {id} indexed but not stored"))
                    })
            }
            Entry::Vacant(entry) => {
                let id = self.next_id.fetch_add(1, Ordering::SeqCst);
                let identity = Identity::new(id, username, credential);
                // Record first, so any id visible through the name index resolves.
                self.records.insert(id, identity.clone());
                entry.insert(id);
                tracing::debug!(user_id = id, "Identity created");
                Ok(identity)
            }
        }
    }

    async fn count(&self) -> Result<u64, RepositoryError> {
        Ok(self.records.len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_or_get_is_idempotent() {
        let store = InMemoryIdentityStore::new();
        let first = store.create_or_get("ada", "placeholder").await.unwrap();
        let second = store.create_or_get("ada", "other-secret").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.credential, "placeholder");
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_distinct_names_get_distinct_ids() {
        let store = InMemoryIdentityStore::new();
        let ada = store.create_or_get("ada", "x").await.unwrap();
        let bob = store.create_or_get("bob", "x").await.unwrap();
        assert_ne!(ada.id, bob.id);
    }

    #[tokio::test]
    async fn test_lookup_by_id_and_name() {
        let store = InMemoryIdentityStore::new();
        let ada = store.create_or_get("ada", "x").await.unwrap();

        assert_eq!(store.get_by_id(ada.id).await.unwrap(), Some(ada.clone()));
        assert_eq!(store.get_by_name("ada").await.unwrap(), Some(ada));
        assert_eq!(store.get_by_name("Ada").await.unwrap(), None);
        assert_eq!(store.get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_contact_creates_one_identity() {
        let store = InMemoryIdentityStore::new();

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move { store.create_or_get("ada", "placeholder").await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        assert!(ids.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(store.count().await.unwrap(), 1);
    }
}
