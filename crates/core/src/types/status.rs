//! Order status as reported by the delivery backend.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of an order.
///
/// The backend adds statuses without notice, so unrecognized values map to
/// [`OrderStatus::Unknown`] instead of failing the whole history fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order received, not yet confirmed.
    #[default]
    Pending,
    /// Order confirmed by the store.
    Confirmed,
    /// Order is being picked and packed.
    Preparing,
    /// Order is on the way.
    OutForDelivery,
    /// Order delivered.
    Delivered,
    /// Order cancelled.
    Cancelled,
    /// Any status string this client version does not know.
    #[serde(other)]
    Unknown,
}

impl OrderStatus {
    /// True once the order has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::OutForDelivery => "out for delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        };
        write!(f, "{label}")
    }
}
