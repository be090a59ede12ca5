//! FCM device token bookkeeping.
//!
//! Obtaining the token is the platform SDK's job; this module persists it
//! under the `fcm_token` key and registers it with the backend so pushes can
//! target the device. Registration is idempotent: re-registering the stored
//! token is a cheap upsert server-side.

use grocerly_core::UserId;
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::Result;
use crate::storage::{FCM_TOKEN_KEY, JsonStore, KeyValueStore};

/// Push token storage and backend registration.
pub struct PushTokens<'a, S> {
    api: &'a ApiClient,
    store: &'a JsonStore<S>,
}

impl<'a, S: KeyValueStore> PushTokens<'a, S> {
    pub(crate) const fn new(api: &'a ApiClient, store: &'a JsonStore<S>) -> Self {
        Self { api, store }
    }

    /// The locally stored device token, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn stored_token(&self) -> Result<Option<String>> {
        Ok(self.store.get(FCM_TOKEN_KEY).await?)
    }

    /// Persist a fresh token and register it for `user`.
    ///
    /// The token is stored before the network call so a failed registration
    /// can be retried next launch with the same token.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write or the registration call fails.
    #[instrument(skip(self, token))]
    pub async fn register(&self, user: UserId, token: &str) -> Result<()> {
        self.store.put(FCM_TOKEN_KEY, &token).await?;
        self.api.register_push_token(user, token).await?;
        Ok(())
    }

    /// Drop the stored token (sign-out).
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub async fn clear(&self) -> Result<()> {
        Ok(self.store.remove(FCM_TOKEN_KEY).await?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::storage::{FCM_TOKEN_KEY, JsonStore, MemoryStore};

    #[tokio::test]
    async fn test_token_roundtrip_in_store() {
        let store = JsonStore::new(MemoryStore::new());
        store.put(FCM_TOKEN_KEY, &"tok-123").await.unwrap();
        let token: Option<String> = store.get(FCM_TOKEN_KEY).await.unwrap();
        assert_eq!(token.as_deref(), Some("tok-123"));
    }
}
