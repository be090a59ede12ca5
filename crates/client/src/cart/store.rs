//! Cart persistence over the key-value store.
//!
//! Carts are saved whole under `cart_{user}` wrapped in an envelope carrying
//! the save time. Guest carts expire 24 hours after the last save; a
//! registered user's cart has no local expiry (the backend cart is
//! authoritative for them anyway).

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::Cart;
use crate::UserKey;
use crate::storage::{JsonStore, KeyValueStore, StorageError, cart_key};

/// How long a guest cart survives between sessions, in hours.
pub const GUEST_CART_TTL_HOURS: i64 = 24;

/// Envelope persisted under `cart_{user}`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredCart {
    cart: Cart,
    saved_at: DateTime<Utc>,
}

/// Loads and saves carts for registered users and guests.
pub struct CartStore<S> {
    store: JsonStore<S>,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Create a cart store over a raw key-value store.
    pub const fn new(store: S) -> Self {
        Self {
            store: JsonStore::new(store),
        }
    }

    /// Load the persisted cart for `user`, or an empty cart if none is
    /// stored or a guest cart has expired.
    ///
    /// # Errors
    ///
    /// Returns an error if the store read fails.
    pub async fn load(&self, user: &UserKey) -> Result<Cart, StorageError> {
        self.load_at(user, Utc::now()).await
    }

    /// Save the cart for `user`, stamping the save time.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub async fn save(&self, user: &UserKey, cart: &Cart) -> Result<(), StorageError> {
        let envelope = StoredCart {
            cart: cart.clone(),
            saved_at: Utc::now(),
        };
        self.store.put(&cart_key(user), &envelope).await
    }

    /// Remove the persisted cart for `user`.
    ///
    /// # Errors
    ///
    /// Returns an error if the removal fails.
    pub async fn clear(&self, user: &UserKey) -> Result<(), StorageError> {
        self.store.remove(&cart_key(user)).await
    }

    /// Expiry-aware load with an injectable clock for tests.
    async fn load_at(&self, user: &UserKey, now: DateTime<Utc>) -> Result<Cart, StorageError> {
        let key = cart_key(user);
        let Some(stored) = self.store.get::<StoredCart>(&key).await? else {
            return Ok(Cart::new());
        };

        if user.is_guest() && now - stored.saved_at > Duration::hours(GUEST_CART_TTL_HOURS) {
            tracing::debug!(key, "Guest cart expired, discarding");
            self.store.remove(&key).await?;
            return Ok(Cart::new());
        }

        Ok(stored.cart)
    }
}
