//! Domain types shared across the Grocerly crates.

mod email;
mod id;
mod money;
mod phone;
mod status;

pub use email::{Email, EmailError};
pub use id::{AddressId, OrderId, ProductId, PromotionId, UserId};
pub use money::Money;
pub use phone::{Phone, PhoneError};
pub use status::OrderStatus;
