//! Address bookkeeping: backend CRUD for registered users, local
//! single-address persistence for guests.
//!
//! The server remains authoritative after every mutation; rather than patch
//! local copies, mutations re-fetch the list (the app re-rendered from
//! server state after each change, and this keeps the exclusive primary
//! flag consistent without client-side juggling).

use grocerly_core::{AddressId, Email, UserId};
use tracing::instrument;

use crate::api::ApiClient;
use crate::api::types::{AddressPayload, NewAddress};
use crate::error::{ClientError, Result};
use crate::storage::{JsonStore, KeyValueStore};

/// Maximum saved addresses per registered user.
pub const MAX_ADDRESSES: usize = 3;

/// Storage key for a guest's single saved address.
fn guest_address_key(email: &Email) -> String {
    format!("address_{}", email.storage_key())
}

/// Address operations.
pub struct AddressService<'a, S> {
    api: &'a ApiClient,
    store: &'a JsonStore<S>,
}

impl<'a, S: KeyValueStore> AddressService<'a, S> {
    pub(crate) const fn new(api: &'a ApiClient, store: &'a JsonStore<S>) -> Self {
        Self { api, store }
    }

    /// List a registered user's saved addresses.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    #[instrument(skip(self))]
    pub async fn list(&self, user: UserId) -> Result<Vec<AddressPayload>> {
        Ok(self.api.list_addresses(user).await?)
    }

    /// The user's primary address, if one is flagged.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    pub async fn primary(&self, user: UserId) -> Result<Option<AddressPayload>> {
        match self.api.fetch_primary_address(user).await {
            Ok(address) => Ok(Some(address)),
            Err(crate::api::ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Save a new address, enforcing the 3-address cap before calling out.
    ///
    /// Returns the refreshed address list.
    ///
    /// # Errors
    ///
    /// Returns a business-rule error at the cap, otherwise any backend
    /// failure.
    #[instrument(skip(self, address))]
    pub async fn create(&self, user: UserId, address: NewAddress) -> Result<Vec<AddressPayload>> {
        let existing = self.api.list_addresses(user).await?;
        if existing.len() >= MAX_ADDRESSES {
            return Err(ClientError::business(format!(
                "You can save at most {MAX_ADDRESSES} addresses"
            )));
        }
        self.api.create_address(user, &address).await?;
        Ok(self.api.list_addresses(user).await?)
    }

    /// Update an address (including flipping the primary flag) and return
    /// the refreshed list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    #[instrument(skip(self, address))]
    pub async fn update(&self, user: UserId, address: AddressPayload) -> Result<Vec<AddressPayload>> {
        self.api.update_address(user, &address).await?;
        Ok(self.api.list_addresses(user).await?)
    }

    /// Delete an address and return the refreshed list.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    #[instrument(skip(self))]
    pub async fn delete(&self, user: UserId, address: AddressId) -> Result<Vec<AddressPayload>> {
        self.api.delete_address(user, address).await?;
        Ok(self.api.list_addresses(user).await?)
    }

    // =========================================================================
    // Guest addresses (local only)
    // =========================================================================

    /// A guest's saved address, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn guest_address(&self, email: &Email) -> Result<Option<AddressPayload>> {
        Ok(self.store.get(&guest_address_key(email)).await?)
    }

    /// Save (or replace) a guest's single address locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the store write fails.
    #[instrument(skip(self, address))]
    pub async fn save_guest_address(&self, email: &Email, address: &AddressPayload) -> Result<()> {
        Ok(self.store.put(&guest_address_key(email), address).await?)
    }

    /// Remove a guest's saved address.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub async fn clear_guest_address(&self, email: &Email) -> Result<()> {
        Ok(self.store.remove(&guest_address_key(email)).await?)
    }
}
