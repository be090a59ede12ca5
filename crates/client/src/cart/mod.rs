//! Cart model, decimal pricing, and cart persistence.
//!
//! The cart is plain in-memory state mutated by the checkout flow and
//! persisted whole to the key-value store (`cart_{user}`). Pricing is a pure
//! function of the line items and an optional promotion; see [`pricing`].

pub mod pricing;
mod store;

pub use pricing::CartTotals;
pub use store::{CartStore, GUEST_CART_TTL_HOURS};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use grocerly_core::{Money, ProductId, PromotionId};

/// One line item in the cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    /// Product being purchased.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Unit price before any discount.
    pub price: Money,
    /// Units in the cart; always >= 1 (removal is explicit).
    pub quantity: u32,
    /// Absolute per-unit discount (zero when the product is not on offer).
    #[serde(default)]
    pub discount: Money,
    /// Pack size the shopper picked ("500g", "1kg").
    #[serde(default)]
    pub selected_quantity: Option<String>,
    /// Units available per the product page, used to cap increments.
    #[serde(default)]
    pub product_quantity: Option<u32>,
}

impl CartItem {
    /// Effective per-unit price after the product discount.
    #[must_use]
    pub fn discounted_price(&self) -> Money {
        (self.price - self.discount).clamp_non_negative()
    }
}

/// A promotion attached to the cart after coupon validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Promotion {
    /// Backend promotion id; its presence is what activates the discount.
    pub id: PromotionId,
    /// Coupon code that granted it.
    pub code: String,
    /// Percentage discount (e.g. `10` for 10%).
    pub discount_pct: Decimal,
}

/// The shopper's cart.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cart {
    /// Line items in insertion order.
    pub items: Vec<CartItem>,
    /// Applied promotion, if a coupon validated.
    #[serde(default)]
    pub promotion: Option<Promotion>,
}

impl Cart {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True when the cart holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Add an item, merging quantities when the product is already present.
    pub fn add_item(&mut self, item: CartItem) {
        debug_assert!(item.quantity >= 1);
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity = existing.quantity.saturating_add(item.quantity);
            if let Some(cap) = existing.product_quantity {
                existing.quantity = existing.quantity.min(cap.max(1));
            }
        } else {
            self.items.push(item);
        }
    }

    /// Set a line's quantity, clamped to at least 1 and at most the
    /// product's available stock when known. Unknown products are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: u32) {
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            let mut q = quantity.max(1);
            if let Some(cap) = item.product_quantity {
                q = q.min(cap.max(1));
            }
            item.quantity = q;
        }
    }

    /// Remove a line entirely.
    pub fn remove_item(&mut self, id: ProductId) {
        self.items.retain(|i| i.id != id);
    }

    /// Drop all items and any applied promotion.
    pub fn clear(&mut self) {
        self.items.clear();
        self.promotion = None;
    }

    /// Compute the cart's totals.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        CartTotals::compute(&self.items, self.promotion.as_ref())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn item(id: i64, price: Decimal, quantity: u32) -> CartItem {
        CartItem {
            id: ProductId::new(id),
            name: format!("product-{id}"),
            price: Money::new(price),
            quantity,
            discount: Money::ZERO,
            selected_quantity: None,
            product_quantity: None,
        }
    }

    #[test]
    fn test_add_item_merges_quantities() {
        let mut cart = Cart::new();
        cart.add_item(item(1, dec!(2.50), 1));
        cart.add_item(item(1, dec!(2.50), 2));
        assert_eq!(cart.items.len(), 1);
        assert_eq!(cart.items.first().unwrap().quantity, 3);
    }

    #[test]
    fn test_set_quantity_clamps_to_one() {
        let mut cart = Cart::new();
        cart.add_item(item(1, dec!(2.50), 2));
        cart.set_quantity(ProductId::new(1), 0);
        assert_eq!(cart.items.first().unwrap().quantity, 1);
    }

    #[test]
    fn test_set_quantity_respects_stock_cap() {
        let mut cart = Cart::new();
        let mut capped = item(1, dec!(2.50), 1);
        capped.product_quantity = Some(5);
        cart.add_item(capped);
        cart.set_quantity(ProductId::new(1), 99);
        assert_eq!(cart.items.first().unwrap().quantity, 5);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = Cart::new();
        cart.add_item(item(1, dec!(1), 1));
        cart.add_item(item(2, dec!(2), 1));
        cart.promotion = Some(Promotion {
            id: PromotionId::new(10),
            code: "SAVE10".to_string(),
            discount_pct: dec!(10),
        });

        cart.remove_item(ProductId::new(1));
        assert_eq!(cart.items.len(), 1);

        cart.clear();
        assert!(cart.is_empty());
        assert!(cart.promotion.is_none());
    }

    #[test]
    fn test_discounted_price_never_negative() {
        let mut i = item(1, dec!(1.00), 1);
        i.discount = Money::new(dec!(2.00));
        assert_eq!(i.discounted_price(), Money::ZERO);
    }
}
