//! JSON client for the Grocerly delivery backend.
//!
//! All payloads are ad hoc backend-defined JSON over HTTPS. There is no
//! automatic retry: a failed call surfaces as a typed [`ApiError`] and the
//! caller decides whether to re-issue it. Responses the SDK mutates through
//! are re-fetched by the service layer rather than patched locally, so this
//! client stays a thin request/response wrapper.

pub mod types;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use grocerly_core::UserId;

use crate::config::ClientConfig;
use types::{
    AddressPayload, CouponRequest, CouponResponse, DeliveryDaysResponse, NewAddress,
    OrderSummary, ProfileUpdate, SlotsResponse, UserDetails, VerifyResponse,
};

/// Errors that can occur when calling the delivery backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend returned a non-success status with an error payload.
    #[error("Backend error ({status}): {message}")]
    Backend {
        /// HTTP status code.
        status: u16,
        /// Message from the backend's error payload, or the raw body.
        message: String,
    },

    /// Response body was not the expected JSON shape.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Thin typed wrapper over the backend's REST endpoints.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new backend client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build (invalid token
    /// bytes, TLS backend failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = &config.api_token {
            let value = format!("Bearer {}", token.expose_secret());
            let mut value = HeaderValue::from_str(&value).map_err(|e| ApiError::Backend {
                status: 0,
                message: format!("invalid API token: {e}"),
            })?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.client.get(self.url(path)).send().await?;
        Self::decode(response).await
    }

    async fn post<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    async fn put<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.client.put(self.url(path)).json(body).send().await?;
        Self::decode(response).await
    }

    /// POST where only the status matters; tolerates empty response bodies.
    async fn post_unit<B: Serialize + Sync>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.client.delete(self.url(path)).send().await?;
        Self::check_status(response).await?;
        Ok(())
    }

    /// Map a non-success response to a typed error, extracting the backend's
    /// `{"error": ...}` / `{"message": ...}` payload when present.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<types::BackendError>(&body)
            .map_or_else(|_| body.chars().take(200).collect(), |e| e.into_message());

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(message));
        }
        Err(ApiError::Backend {
            status: status.as_u16(),
            message,
        })
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let response = Self::check_status(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %text.chars().take(500).collect::<String>(),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Fetch the order history for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the body cannot be parsed.
    #[instrument(skip(self))]
    pub async fn order_history(&self, user: UserId) -> Result<Vec<OrderSummary>, ApiError> {
        self.get(&format!("/api/orderhistory/{user}")).await
    }

    // =========================================================================
    // Addresses
    // =========================================================================

    /// Fetch a user's primary delivery address.
    ///
    /// Legacy endpoint kept for checkout prefill; returns the single address
    /// flagged primary.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] when the user has no primary address.
    #[instrument(skip(self))]
    pub async fn fetch_primary_address(&self, user: UserId) -> Result<AddressPayload, ApiError> {
        self.get(&format!("/api/fetch_address/{user}")).await
    }

    /// List all saved addresses for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn list_addresses(&self, user: UserId) -> Result<Vec<AddressPayload>, ApiError> {
        self.get(&format!("/api/user/{user}/addresses")).await
    }

    /// Create a new address for a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; the backend enforces its own
    /// copy of the address limit.
    #[instrument(skip(self, address))]
    pub async fn create_address(
        &self,
        user: UserId,
        address: &NewAddress,
    ) -> Result<AddressPayload, ApiError> {
        self.post(&format!("/api/user/{user}/addresses"), address)
            .await
    }

    /// Update an existing address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the address does not exist.
    #[instrument(skip(self, address))]
    pub async fn update_address(
        &self,
        user: UserId,
        address: &AddressPayload,
    ) -> Result<AddressPayload, ApiError> {
        self.put(&format!("/api/user/{user}/addresses/{}", address.id), address)
            .await
    }

    /// Delete an address.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_address(
        &self,
        user: UserId,
        address: grocerly_core::AddressId,
    ) -> Result<(), ApiError> {
        self.delete(&format!("/api/user/{user}/addresses/{address}"))
            .await
    }

    // =========================================================================
    // Phone verification
    // =========================================================================

    /// Send a verification code over SMS.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn sms_send(&self, phone: &str) -> Result<(), ApiError> {
        self.post_unit("/api/sms/send", &serde_json::json!({ "phone": phone }))
            .await
    }

    /// Verify an SMS code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, code))]
    pub async fn sms_verify(&self, phone: &str, code: &str) -> Result<VerifyResponse, ApiError> {
        self.post(
            "/api/sms/verify",
            &serde_json::json!({ "phone": phone, "code": code }),
        )
        .await
    }

    /// Send a verification code over WhatsApp.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn otp_send(&self, phone: &str) -> Result<(), ApiError> {
        self.post_unit("/api/otp/send", &serde_json::json!({ "phone": phone }))
            .await
    }

    /// Verify a WhatsApp code.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, code))]
    pub async fn otp_verify(&self, phone: &str, code: &str) -> Result<VerifyResponse, ApiError> {
        self.post(
            "/api/otp/verify",
            &serde_json::json!({ "phone": phone, "code": code }),
        )
        .await
    }

    // =========================================================================
    // Coupons
    // =========================================================================

    /// Validate a coupon code against the current subtotal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, request))]
    pub async fn validate_coupon(
        &self,
        request: &CouponRequest,
    ) -> Result<CouponResponse, ApiError> {
        self.post("/api/validate-coupon", request).await
    }

    // =========================================================================
    // Delivery scheduling
    // =========================================================================

    /// Fetch the store's active delivery weekdays (1=Mon..7=Sun).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delivery_days(&self) -> Result<DeliveryDaysResponse, ApiError> {
        self.get("/api/delivery-days").await
    }

    /// Fetch the time-slot labels offered on a date (ISO `YYYY-MM-DD`).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delivery_slots(&self, iso_date: &str) -> Result<SlotsResponse, ApiError> {
        self.get(&format!("/api/fetch_ddates/{iso_date}")).await
    }

    // =========================================================================
    // Profile
    // =========================================================================

    /// Fetch a user's profile details.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn user_details(&self, user: UserId) -> Result<UserDetails, ApiError> {
        self.get(&format!("/api/userdetails/{user}")).await
    }

    /// Update a user's profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, update))]
    pub async fn update_user_profile(&self, update: &ProfileUpdate) -> Result<(), ApiError> {
        self.post_unit("/api/updateuserprofile", update).await
    }

    /// Delete a user's account.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn delete_user(&self, user: UserId) -> Result<(), ApiError> {
        self.post_unit("/api/deleteuser", &serde_json::json!({ "id": user }))
            .await
    }

    // =========================================================================
    // Push notifications
    // =========================================================================

    /// Register an FCM device token so the backend can target this device.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self, token))]
    pub async fn register_push_token(&self, user: UserId, token: &str) -> Result<(), ApiError> {
        self.post_unit(
            "/api/register-device",
            &serde_json::json!({ "user_id": user, "fcm_token": token }),
        )
        .await
    }
}
