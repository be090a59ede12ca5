//! Shared helpers for the Grocerly integration tests.
//!
//! The actual tests live in `tests/`; this crate body only provides cart
//! and item builders so the flows read like checkout scripts.

#![cfg_attr(not(test), forbid(unsafe_code))]

use grocerly_client::cart::{Cart, CartItem};
use grocerly_core::{Money, ProductId};
use rust_decimal::Decimal;

/// Build a cart item with the given id, unit price, quantity, and per-unit
/// discount.
#[must_use]
pub fn item(id: i64, price: Decimal, quantity: u32, discount: Decimal) -> CartItem {
    CartItem {
        id: ProductId::new(id),
        name: format!("product-{id}"),
        price: Money::new(price),
        quantity,
        discount: Money::new(discount),
        selected_quantity: None,
        product_quantity: None,
    }
}

/// Build a cart from items.
#[must_use]
pub fn cart(items: impl IntoIterator<Item = CartItem>) -> Cart {
    let mut cart = Cart::new();
    for i in items {
        cart.add_item(i);
    }
    cart
}
