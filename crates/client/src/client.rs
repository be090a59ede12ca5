//! The SDK facade: one handle owning the HTTP clients, storage, and caches.

use std::sync::Arc;

use moka::future::Cache;

use crate::api::ApiClient;
use crate::api::types::UserDetails;
use crate::cart::CartStore;
use crate::config::ClientConfig;
use crate::delivery::DeliveryService;
use crate::error::Result;
use crate::geocode::Geocoder;
use crate::push::PushTokens;
use crate::services::{
    AddressService, CouponService, OrderService, OtpService, ProfileService,
};
use crate::storage::{JsonStore, KeyValueStore};

/// The Grocerly client.
///
/// Cheap to clone (`Arc` inner) and safe to share across tasks, though the
/// apps drive it from a single event loop. Caches hold backend reads the
/// apps used to re-fetch per screen; TTL comes from
/// [`ClientConfig::cache_ttl`].
pub struct Client<S> {
    inner: Arc<ClientInner<S>>,
}

impl<S> Clone for Client<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct ClientInner<S> {
    config: ClientConfig,
    api: ApiClient,
    geocoder: Geocoder,
    store: JsonStore<S>,
    carts: CartStore<S>,
    delivery_days_cache: Cache<String, Vec<u8>>,
    delivery_slots_cache: Cache<String, Vec<String>>,
    profile_cache: Cache<i64, UserDetails>,
}

impl<S: KeyValueStore + Clone> Client<S> {
    /// Build a client over a key-value store.
    ///
    /// # Errors
    ///
    /// Returns an error if either HTTP client fails to build.
    pub fn new(config: ClientConfig, store: S) -> Result<Self> {
        let api = ApiClient::new(&config)?;
        let geocoder = Geocoder::new(&config)?;

        let delivery_days_cache = Cache::builder()
            .max_capacity(4)
            .time_to_live(config.cache_ttl)
            .build();
        let delivery_slots_cache = Cache::builder()
            .max_capacity(8)
            .time_to_live(config.cache_ttl)
            .build();
        let profile_cache = Cache::builder()
            .max_capacity(64)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(ClientInner {
                api,
                geocoder,
                carts: CartStore::new(store.clone()),
                store: JsonStore::new(store),
                delivery_days_cache,
                delivery_slots_cache,
                profile_cache,
                config,
            }),
        })
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Raw backend API client, for calls the services don't wrap.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Google geocoder for address capture.
    #[must_use]
    pub fn geocoder(&self) -> &Geocoder {
        &self.inner.geocoder
    }

    /// Cart load/save with guest expiry.
    #[must_use]
    pub fn carts(&self) -> &CartStore<S> {
        &self.inner.carts
    }

    /// Delivery date and slot scheduling.
    #[must_use]
    pub fn delivery(&self) -> DeliveryService<'_> {
        DeliveryService::new(
            &self.inner.api,
            &self.inner.delivery_days_cache,
            &self.inner.delivery_slots_cache,
        )
    }

    /// Address bookkeeping.
    #[must_use]
    pub fn addresses(&self) -> AddressService<'_, S> {
        AddressService::new(&self.inner.api, &self.inner.store)
    }

    /// Order history.
    #[must_use]
    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(&self.inner.api)
    }

    /// Profile management.
    #[must_use]
    pub fn profile(&self) -> ProfileService<'_> {
        ProfileService::new(&self.inner.api, &self.inner.profile_cache)
    }

    /// Coupon validation.
    #[must_use]
    pub fn coupons(&self) -> CouponService<'_> {
        CouponService::new(&self.inner.api)
    }

    /// Phone verification.
    #[must_use]
    pub fn otp(&self) -> OtpService<'_> {
        OtpService::new(&self.inner.api)
    }

    /// FCM token bookkeeping.
    #[must_use]
    pub fn push(&self) -> PushTokens<'_, S> {
        PushTokens::new(&self.inner.api, &self.inner.store)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use secrecy::SecretString;

    use super::*;
    use crate::storage::MemoryStore;

    fn test_config() -> ClientConfig {
        ClientConfig {
            api_base_url: "https://api.grocerly.example".to_string(),
            api_token: None,
            maps_api_key: SecretString::from("test-key"),
            timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(300),
        }
    }

    #[tokio::test]
    async fn test_client_builds_and_clones() {
        let client = Client::new(test_config(), MemoryStore::new()).unwrap();
        let clone = client.clone();
        assert_eq!(
            clone.config().api_base_url,
            "https://api.grocerly.example"
        );
    }

    #[tokio::test]
    async fn test_cart_store_reachable_through_facade() {
        let client = Client::new(test_config(), MemoryStore::new()).unwrap();
        let user = crate::UserKey::Registered(grocerly_core::UserId::new(1));
        let cart = client.carts().load(&user).await.unwrap();
        assert!(cart.is_empty());
    }
}
