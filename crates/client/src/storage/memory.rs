//! In-memory key-value store for tests and ephemeral sessions.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{KeyValueStore, StorageError};

/// A `HashMap`-backed store. Cloning shares the underlying map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put_raw(&self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_put_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get_raw("a").await.unwrap(), None);

        store.put_raw("a", "1".to_string()).await.unwrap();
        assert_eq!(store.get_raw("a").await.unwrap(), Some("1".to_string()));

        // Last write wins
        store.put_raw("a", "2".to_string()).await.unwrap();
        assert_eq!(store.get_raw("a").await.unwrap(), Some("2".to_string()));

        store.remove("a").await.unwrap();
        assert_eq!(store.get_raw("a").await.unwrap(), None);

        // Removing a missing key is fine
        store.remove("a").await.unwrap();
    }

    #[tokio::test]
    async fn test_clone_shares_state() {
        let store = MemoryStore::new();
        let clone = store.clone();
        store.put_raw("k", "v".to_string()).await.unwrap();
        assert_eq!(clone.get_raw("k").await.unwrap(), Some("v".to_string()));
    }
}
