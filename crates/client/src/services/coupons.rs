//! Coupon validation.

use tracing::instrument;

use crate::api::ApiClient;
use crate::api::types::CouponRequest;
use crate::cart::{Cart, Promotion};
use crate::error::{ClientError, Result};

/// Coupon operations.
pub struct CouponService<'a> {
    api: &'a ApiClient,
}

impl<'a> CouponService<'a> {
    pub(crate) const fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Validate `code` against the cart and return the resulting promotion.
    ///
    /// The backend decides validity (existence, expiry, minimum subtotal);
    /// an invalid verdict surfaces as a business-rule error carrying the
    /// backend's own wording so the alert matches what support expects.
    ///
    /// # Errors
    ///
    /// Business-rule error for an invalid coupon; validation error for an
    /// empty code; otherwise any backend failure.
    #[instrument(skip(self, cart))]
    pub async fn apply(&self, cart: &mut Cart, code: &str) -> Result<Promotion> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ClientError::validation("Enter a coupon code"));
        }

        let subtotal = cart.totals().discounted_subtotal;
        let request = CouponRequest {
            code: code.clone(),
            subtotal: subtotal.amount(),
        };
        let response = self.api.validate_coupon(&request).await?;

        if !response.valid {
            let message = response.message.unwrap_or_else(|| {
                format!(
                    "Coupon requires a minimum order of {}",
                    response.min_subtotal
                )
            });
            return Err(ClientError::business(message));
        }

        let Some(promotion_id) = response.promotion_id else {
            // Valid verdict without an id cannot activate a discount
            return Err(ClientError::business("Coupon could not be applied"));
        };

        let promotion = Promotion {
            id: promotion_id,
            code,
            discount_pct: response.discount_pct,
        };
        cart.promotion = Some(promotion.clone());
        Ok(promotion)
    }

    /// Detach any applied promotion.
    pub fn remove(cart: &mut Cart) {
        cart.promotion = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use grocerly_core::PromotionId;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn test_remove_detaches_promotion() {
        let mut cart = Cart::new();
        cart.promotion = Some(Promotion {
            id: PromotionId::new(1),
            code: "SAVE10".to_string(),
            discount_pct: dec!(10),
        });
        CouponService::remove(&mut cart);
        assert!(cart.promotion.is_none());
    }
}
