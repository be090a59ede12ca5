//! Opaque persistent key-value storage.
//!
//! The original apps treated device storage as a dumb string-keyed store
//! with last-write-wins semantics and no transactions; this module keeps
//! that contract. Keys in use: `cart_{user}`, `profile_{user}`, `fcm_token`.
//!
//! [`MemoryStore`] backs tests and ephemeral sessions; [`FileStore`] persists
//! one JSON file per key under a data directory.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::UserKey;

/// Storage key for a user's persisted cart.
#[must_use]
pub fn cart_key(user: &UserKey) -> String {
    format!("cart_{}", user.as_key())
}

/// Storage key for a user's cached profile.
#[must_use]
pub fn profile_key(user: &UserKey) -> String {
    format!("profile_{}", user.as_key())
}

/// Storage key for the FCM device token.
pub const FCM_TOKEN_KEY: &str = "fcm_token";

/// Errors that can occur in the key-value store.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Underlying I/O failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be (de)serialized.
    #[error("storage codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A string-keyed persistent store with last-write-wins semantics.
///
/// Implementations make no atomicity guarantees across keys; the SDK never
/// needs them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value at `key`, if any.
    async fn get_raw(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` at `key`, replacing any previous value.
    async fn put_raw(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Remove the value at `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// JSON convenience layer over [`KeyValueStore`].
///
/// A stored value that no longer deserializes (schema drift across app
/// versions) is treated as absent and removed, matching how the apps
/// recovered from stale device storage.
pub struct JsonStore<S> {
    inner: S,
}

impl<S: KeyValueStore> JsonStore<S> {
    /// Wrap a raw store.
    pub const fn new(inner: S) -> Self {
        Self { inner }
    }

    /// Access the underlying raw store.
    pub const fn raw(&self) -> &S {
        &self.inner
    }

    /// Read and deserialize the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error only for I/O failures; undecodable values are
    /// dropped and reported as `None`.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.inner.get_raw(key).await? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                tracing::warn!(key, error = %e, "Dropping undecodable stored value");
                self.inner.remove(key).await?;
                Ok(None)
            }
        }
    }

    /// Serialize and write `value` at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn put<T: Serialize + Sync>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let raw = serde_json::to_string(value)?;
        self.inner.put_raw(key, raw).await
    }

    /// Remove the value at `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub async fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.inner.remove(key).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grocerly_core::{Email, UserId};

    use super::*;

    #[test]
    fn test_keys_for_registered_user() {
        let user = UserKey::Registered(UserId::new(42));
        assert_eq!(cart_key(&user), "cart_42");
        assert_eq!(profile_key(&user), "profile_42");
    }

    #[test]
    fn test_keys_for_guest() {
        let user = UserKey::Guest(Email::parse("Guest@Example.com").unwrap());
        assert_eq!(cart_key(&user), "cart_guest@example.com");
    }

    #[tokio::test]
    async fn test_json_store_roundtrip() {
        let store = JsonStore::new(MemoryStore::new());
        store.put("k", &vec![1, 2, 3]).await.unwrap();
        let back: Option<Vec<i32>> = store.get("k").await.unwrap();
        assert_eq!(back, Some(vec![1, 2, 3]));
    }

    #[tokio::test]
    async fn test_json_store_drops_undecodable() {
        let store = JsonStore::new(MemoryStore::new());
        store.raw().put_raw("k", "not-json{{".to_string()).await.unwrap();
        let back: Option<Vec<i32>> = store.get("k").await.unwrap();
        assert_eq!(back, None);
        // The bad value was removed, not left to fail again
        assert_eq!(store.raw().get_raw("k").await.unwrap(), None);
    }
}
