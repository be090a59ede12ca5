//! Service layer: business rules on top of the raw API client.
//!
//! Each service is a borrow-cheap view handed out by [`crate::Client`].
//! Rules that can be decided locally (the address cap, OTP code shape,
//! the birth-date write-once rule) are checked before calling out, so the
//! user gets an immediate, well-worded error without a round trip; coupon
//! verdicts stay with the backend, which knows the promotion table.

pub mod addresses;
pub mod coupons;
pub mod orders;
pub mod otp;
pub mod profile;

pub use addresses::AddressService;
pub use coupons::CouponService;
pub use orders::OrderService;
pub use otp::{OtpChannel, OtpService};
pub use profile::ProfileService;
