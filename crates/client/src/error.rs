//! Unified error handling for the SDK.
//!
//! Errors fall into the three buckets the apps render differently: network
//! failures ("try again" toast), validation failures (inline field message),
//! and business-rule violations (modal alert). [`ClientError::category`]
//! exposes the bucket so callers do not match on variants.

use thiserror::Error;

use crate::api::ApiError;
use crate::config::ConfigError;
use crate::geocode::GeocodeError;
use crate::storage::StorageError;

/// Result type alias for [`ClientError`].
pub type Result<T> = std::result::Result<T, ClientError>;

/// How an error should be surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Transport or backend failure; generic "try again" message.
    Network,
    /// Bad local input; shown inline next to the offending field.
    Validation,
    /// A rule the backend or SDK enforces; shown as a modal alert.
    BusinessRule,
}

/// Top-level error type for the Grocerly client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Backend API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Geocoding call failed.
    #[error(transparent)]
    Geocode(#[from] GeocodeError),

    /// Local storage operation failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// Configuration is missing or invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Locally validated input was rejected.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A business rule blocked the operation (max addresses, coupon minimum,
    /// write-once birth date).
    #[error("{0}")]
    BusinessRule(String),
}

impl ClientError {
    /// The rendering bucket for this error.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::Api(_) | Self::Geocode(_) | Self::Storage(_) | Self::Config(_) => {
                ErrorCategory::Network
            }
            Self::Validation(_) => ErrorCategory::Validation,
            Self::BusinessRule(_) => ErrorCategory::BusinessRule,
        }
    }

    /// Build a validation error from anything displayable.
    pub fn validation(msg: impl std::fmt::Display) -> Self {
        Self::Validation(msg.to_string())
    }

    /// Build a business-rule error from anything displayable.
    pub fn business(msg: impl std::fmt::Display) -> Self {
        Self::BusinessRule(msg.to_string())
    }
}
