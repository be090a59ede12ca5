//! Profile management with a short-lived local cache.
//!
//! Profiles change rarely but are read on several screens, so fetches go
//! through a moka cache (config TTL, invalidated on update). The birth date
//! is write-once: once set it can never change, only be echoed back.

use grocerly_core::UserId;
use moka::future::Cache;
use tracing::instrument;

use crate::api::ApiClient;
use crate::api::types::{ProfileUpdate, UserDetails};
use crate::error::{ClientError, Result};

/// Profile operations.
pub struct ProfileService<'a> {
    api: &'a ApiClient,
    cache: &'a Cache<i64, UserDetails>,
}

impl<'a> ProfileService<'a> {
    pub(crate) const fn new(api: &'a ApiClient, cache: &'a Cache<i64, UserDetails>) -> Self {
        Self { api, cache }
    }

    /// Fetch a user's profile, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails on a cache miss.
    #[instrument(skip(self))]
    pub async fn fetch(&self, user: UserId) -> Result<UserDetails> {
        if let Some(details) = self.cache.get(&user.as_i64()).await {
            return Ok(details);
        }
        let details = self.api.user_details(user).await?;
        self.cache.insert(user.as_i64(), details.clone()).await;
        Ok(details)
    }

    /// Update the profile and invalidate the cache.
    ///
    /// # Errors
    ///
    /// Returns a business-rule error when the update would change an
    /// already-set birth date; otherwise any backend failure.
    #[instrument(skip(self, update))]
    pub async fn update(&self, update: ProfileUpdate) -> Result<()> {
        let current = self.fetch(update.id).await?;
        if let (Some(existing), Some(requested)) = (current.birth_date, update.birth_date)
            && existing != requested
        {
            return Err(ClientError::business(
                "Birth date can only be set once and cannot be changed",
            ));
        }

        self.api.update_user_profile(&update).await?;
        self.cache.invalidate(&update.id.as_i64()).await;
        Ok(())
    }

    /// Delete the account and drop the cached profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    #[instrument(skip(self))]
    pub async fn delete_account(&self, user: UserId) -> Result<()> {
        self.api.delete_user(user).await?;
        self.cache.invalidate(&user.as_i64()).await;
        Ok(())
    }
}
