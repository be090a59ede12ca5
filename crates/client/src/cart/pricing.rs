//! Cart totals: subtotal, product discounts, promotional discount.
//!
//! A pure single-pass function of the line items and the optional
//! promotion. All arithmetic is decimal; display rounding is the caller's
//! concern via [`Money::display`].

use serde::Serialize;

use grocerly_core::Money;

use super::{CartItem, Promotion};

/// Derived money figures for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    /// Σ price × quantity, before any discount.
    pub subtotal: Money,
    /// Σ (price − discount) × quantity.
    pub discounted_subtotal: Money,
    /// Slice taken off by the promotion (zero without one).
    pub promo_discount: Money,
    /// Amount due; never negative.
    pub total: Money,
}

impl CartTotals {
    /// Compute totals for `items` with an optional applied promotion.
    ///
    /// The promotional percentage applies to the product-discounted
    /// subtotal, and only when a promotion is attached; a promotion with a
    /// zero percentage is a no-op.
    #[must_use]
    pub fn compute(items: &[CartItem], promotion: Option<&Promotion>) -> Self {
        let mut subtotal = Money::ZERO;
        let mut discounted_subtotal = Money::ZERO;
        for item in items {
            let quantity = rust_decimal::Decimal::from(item.quantity);
            subtotal = subtotal + item.price * quantity;
            discounted_subtotal = discounted_subtotal + item.discounted_price() * quantity;
        }

        let promo_discount = promotion.map_or(Money::ZERO, |promo| {
            discounted_subtotal.percentage(promo.discount_pct)
        });

        let total = (discounted_subtotal - promo_discount).clamp_non_negative();

        Self {
            subtotal,
            discounted_subtotal,
            promo_discount,
            total,
        }
    }
}
