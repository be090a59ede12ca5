//! Grocerly Client SDK - orchestration layer for the delivery backend.
//!
//! The mobile apps are thin shells over this crate: every screen-independent
//! behavior (cart pricing, delivery scheduling, address bookkeeping, coupon
//! validation, OTP verification, push token registration) lives here, keyed
//! off the backend's REST API and a local key-value store.
//!
//! # Architecture
//!
//! - [`api`] - JSON client for the delivery backend (no retries; failures map
//!   to typed errors the caller renders)
//! - [`geocode`] - Google Geocoding API client for address capture
//! - [`storage`] - opaque persistent key-value store (`cart_{user}`,
//!   `profile_{user}`, `fcm_token` keys)
//! - [`cart`] - cart model, decimal pricing, guest cart persistence
//! - [`delivery`] - delivery date resolution and time-slot filtering
//! - [`services`] - addresses, orders, profile, coupons, OTP
//! - [`push`] - FCM device token bookkeeping
//!
//! # Example
//!
//! ```rust,ignore
//! use grocerly_client::{Client, config::ClientConfig, storage::FileStore};
//!
//! let config = ClientConfig::from_env()?;
//! let store = FileStore::new("/data/grocerly")?;
//! let client = Client::new(config, store);
//!
//! let days = client.delivery().upcoming_days().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod client;
pub mod config;
pub mod dates;
pub mod delivery;
pub mod error;
pub mod geocode;
pub mod push;
pub mod services;
pub mod storage;

pub use client::Client;
pub use error::{ClientError, Result};

use grocerly_core::{Email, UserId};

/// Identity a cart or profile is keyed by.
///
/// Registered users are identified by their backend id; guests by their
/// normalized email. A guest has at most one persisted cart and address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserKey {
    /// A registered, authenticated user.
    Registered(UserId),
    /// An unauthenticated guest identified by email.
    Guest(Email),
}

impl UserKey {
    /// Stable string form used to build storage keys.
    #[must_use]
    pub fn as_key(&self) -> String {
        match self {
            Self::Registered(id) => id.to_string(),
            Self::Guest(email) => email.storage_key().to_string(),
        }
    }

    /// True for guest identities.
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        matches!(self, Self::Guest(_))
    }
}
