//! Wire types for the delivery backend's ad hoc JSON payloads.
//!
//! The backend grew out of two parallel address services, so the primary
//! flag arrives as `true`, `1`, or `"1"` depending on which code path built
//! the response. The SDK normalizes all of them into a single `bool` on the
//! way in and only ever serializes `bool` on the way out.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use grocerly_core::{AddressId, Money, OrderId, OrderStatus, UserId};

/// Error payload shapes the backend produces (`{"error": ...}` or
/// `{"message": ...}`).
#[derive(Debug, Deserialize)]
pub struct BackendError {
    error: Option<String>,
    message: Option<String>,
}

impl BackendError {
    /// The most specific message available.
    #[must_use]
    pub fn into_message(self) -> String {
        self.error
            .or(self.message)
            .unwrap_or_else(|| "unknown backend error".to_string())
    }
}

/// Accept birth dates in any of the historical formats old app versions
/// wrote; anything unrecognized decodes as absent instead of failing the
/// whole profile payload.
fn flexible_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(crate::dates::parse_flexible_date))
}

/// Accept `true`/`false`, `1`/`0`, and `"1"`/`"0"`/`"true"`/`"false"` for
/// boolean flags.
fn flexible_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Str(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(b) => Ok(b),
        Raw::Int(n) => Ok(n != 0),
        Raw::Str(s) => match s.trim() {
            "1" | "true" | "True" => Ok(true),
            _ => Ok(false),
        },
    }
}

/// A saved delivery address as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressPayload {
    /// Backend-issued address id.
    pub id: AddressId,
    /// Free-form street address line.
    pub address: String,
    /// Latitude from geocoding.
    pub latitude: f64,
    /// Longitude from geocoding.
    pub longitude: f64,
    /// Contact phone for this address.
    pub phone: String,
    /// User label ("Home", "Work").
    #[serde(default)]
    pub label: Option<String>,
    /// Whether this is the default delivery address. At most one per user.
    #[serde(default, alias = "is_default", deserialize_with = "flexible_bool")]
    pub is_primary: bool,
}

/// Body for creating an address; the backend assigns the id.
#[derive(Debug, Clone, Serialize)]
pub struct NewAddress {
    /// Free-form street address line.
    pub address: String,
    /// Latitude from geocoding.
    pub latitude: f64,
    /// Longitude from geocoding.
    pub longitude: f64,
    /// Contact phone for this address.
    pub phone: String,
    /// User label ("Home", "Work").
    pub label: Option<String>,
    /// Request this address become the default.
    pub is_primary: bool,
}

/// One entry in a user's order history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSummary {
    /// Backend-issued order id.
    pub id: OrderId,
    /// When the order was placed.
    pub placed_at: DateTime<Utc>,
    /// Current lifecycle status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Order total after all discounts.
    pub total: Money,
    /// Number of line items.
    #[serde(default)]
    pub item_count: u32,
    /// Scheduled delivery date, if one was chosen.
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    /// Scheduled delivery slot label, if one was chosen.
    #[serde(default)]
    pub delivery_slot: Option<String>,
}

/// Request body for coupon validation.
#[derive(Debug, Clone, Serialize)]
pub struct CouponRequest {
    /// Coupon code as entered.
    pub code: String,
    /// Cart subtotal after product discounts.
    pub subtotal: Decimal,
}

/// Backend verdict on a coupon.
#[derive(Debug, Clone, Deserialize)]
pub struct CouponResponse {
    /// Whether the coupon applies to this cart.
    pub valid: bool,
    /// Promotion id to attach to the cart when valid.
    #[serde(default)]
    pub promotion_id: Option<grocerly_core::PromotionId>,
    /// Percentage discount granted (e.g. `10` for 10%).
    #[serde(default)]
    pub discount_pct: Decimal,
    /// Minimum subtotal the coupon requires.
    #[serde(default)]
    pub min_subtotal: Decimal,
    /// Human-readable reason when invalid.
    #[serde(default)]
    pub message: Option<String>,
}

/// Active delivery weekdays, 1=Mon..7=Sun.
#[derive(Debug, Clone, Deserialize)]
pub struct DeliveryDaysResponse {
    /// Weekday numbers the store delivers on.
    pub active_days: Vec<u8>,
}

/// Time-slot labels offered on a date.
#[derive(Debug, Clone, Deserialize)]
pub struct SlotsResponse {
    /// Labels like `"9:00 AM - 1:00 PM"`.
    pub slots: Vec<String>,
}

/// Result of an OTP verification call.
#[derive(Debug, Clone, Deserialize)]
pub struct VerifyResponse {
    /// Whether the submitted code matched.
    pub verified: bool,
}

/// A user's profile as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserDetails {
    /// Backend-issued user id.
    pub id: UserId,
    /// Given name.
    #[serde(default)]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default)]
    pub last_name: Option<String>,
    /// Account email.
    pub email: String,
    /// Verified phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Birth date; write-once by business rule.
    #[serde(default, deserialize_with = "flexible_date")]
    pub birth_date: Option<NaiveDate>,
    /// Sign-in provider (`"google"`, `"apple"`, `"email"`).
    #[serde(default)]
    pub provider: Option<String>,
}

/// Body for `/api/updateuserprofile`.
#[derive(Debug, Clone, Serialize)]
pub struct ProfileUpdate {
    /// User being updated.
    pub id: UserId,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Phone number.
    pub phone: Option<String>,
    /// Birth date (only settable once).
    pub birth_date: Option<NaiveDate>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn address_json(flag: &str) -> String {
        format!(
            r#"{{"id": 1, "address": "12 Olive St", "latitude": 34.9, "longitude": 33.6,
                "phone": "+35799123456", "label": "Home", "is_primary": {flag}}}"#
        )
    }

    #[test]
    fn test_primary_flag_bool() {
        let addr: AddressPayload = serde_json::from_str(&address_json("true")).unwrap();
        assert!(addr.is_primary);
    }

    #[test]
    fn test_primary_flag_int() {
        let addr: AddressPayload = serde_json::from_str(&address_json("1")).unwrap();
        assert!(addr.is_primary);
        let addr: AddressPayload = serde_json::from_str(&address_json("0")).unwrap();
        assert!(!addr.is_primary);
    }

    #[test]
    fn test_primary_flag_string() {
        let addr: AddressPayload = serde_json::from_str(&address_json("\"1\"")).unwrap();
        assert!(addr.is_primary);
        let addr: AddressPayload = serde_json::from_str(&address_json("\"0\"")).unwrap();
        assert!(!addr.is_primary);
    }

    #[test]
    fn test_primary_flag_legacy_field_name() {
        let json = r#"{"id": 2, "address": "1 Main", "latitude": 0.0, "longitude": 0.0,
                       "phone": "5551234567", "is_default": "1"}"#;
        let addr: AddressPayload = serde_json::from_str(json).unwrap();
        assert!(addr.is_primary);
    }

    #[test]
    fn test_primary_flag_missing_defaults_false() {
        let json = r#"{"id": 3, "address": "1 Main", "latitude": 0.0, "longitude": 0.0,
                       "phone": "5551234567"}"#;
        let addr: AddressPayload = serde_json::from_str(json).unwrap();
        assert!(!addr.is_primary);
    }

    #[test]
    fn test_serialize_primary_as_bool_only() {
        let addr: AddressPayload = serde_json::from_str(&address_json("\"1\"")).unwrap();
        let out = serde_json::to_value(&addr).unwrap();
        assert_eq!(out["is_primary"], serde_json::Value::Bool(true));
    }

    fn profile_json(birth_date: &str) -> String {
        format!(
            r#"{{"id": 7, "email": "shopper@example.com", "birth_date": {birth_date}}}"#
        )
    }

    #[test]
    fn test_birth_date_iso() {
        let user: UserDetails = serde_json::from_str(&profile_json("\"1990-05-04\"")).unwrap();
        assert_eq!(
            user.birth_date,
            NaiveDate::from_ymd_opt(1990, 5, 4)
        );
    }

    #[test]
    fn test_birth_date_legacy_slash_format() {
        // Written by old app versions on day-first locales
        let user: UserDetails = serde_json::from_str(&profile_json("\"04/05/1990\"")).unwrap();
        assert_eq!(
            user.birth_date,
            NaiveDate::from_ymd_opt(1990, 5, 4)
        );
    }

    #[test]
    fn test_birth_date_unrecognized_decodes_as_absent() {
        let user: UserDetails = serde_json::from_str(&profile_json("\"May 4th, 1990\"")).unwrap();
        assert_eq!(user.birth_date, None);
    }

    #[test]
    fn test_birth_date_null_and_missing() {
        let user: UserDetails = serde_json::from_str(&profile_json("null")).unwrap();
        assert_eq!(user.birth_date, None);

        let json = r#"{"id": 7, "email": "shopper@example.com"}"#;
        let user: UserDetails = serde_json::from_str(json).unwrap();
        assert_eq!(user.birth_date, None);
    }

    #[test]
    fn test_order_summary_unknown_status() {
        let json = r#"{"id": 9, "placed_at": "2026-08-01T10:00:00Z",
                       "status": "on_hold", "total": "42.50", "item_count": 3}"#;
        let order: OrderSummary = serde_json::from_str(json).unwrap();
        assert_eq!(order.status, OrderStatus::Unknown);
        assert_eq!(order.total.display(), "42.50");
    }
}
