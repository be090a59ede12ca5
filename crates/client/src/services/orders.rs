//! Order history.

use grocerly_core::UserId;
use tracing::instrument;

use crate::api::ApiClient;
use crate::api::types::OrderSummary;
use crate::error::Result;

/// Order operations.
pub struct OrderService<'a> {
    api: &'a ApiClient,
}

impl<'a> OrderService<'a> {
    pub(crate) const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// A user's past orders, newest first.
    ///
    /// The backend returns them in insertion order; sorting here keeps the
    /// list stable even when the backend paginates oddly.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend call fails.
    #[instrument(skip(self))]
    pub async fn history(&self, user: UserId) -> Result<Vec<OrderSummary>> {
        let mut orders = self.api.order_history(user).await?;
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grocerly_core::{Money, OrderId, OrderStatus};
    use rust_decimal_macros::dec;

    use crate::api::types::OrderSummary;

    fn order(id: i64, placed_at: &str) -> OrderSummary {
        OrderSummary {
            id: OrderId::new(id),
            placed_at: placed_at.parse().unwrap(),
            status: OrderStatus::Delivered,
            total: Money::new(dec!(10)),
            item_count: 1,
            delivery_date: None,
            delivery_slot: None,
        }
    }

    #[test]
    fn test_newest_first_ordering() {
        let mut orders = vec![
            order(1, "2026-08-01T10:00:00Z"),
            order(2, "2026-08-20T10:00:00Z"),
            order(3, "2026-08-10T10:00:00Z"),
        ];
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        let ids: Vec<i64> = orders.iter().map(|o| o.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
