//! Core type definitions.

mod category;
mod email;
mod id;
mod price;
mod status;

pub use category::{Category, CategoryParseError, Subcategory};
pub use email::{Email, EmailError};
pub use id::{OrderId, ProductId, UserId};
pub use price::Price;
pub use status::{OrderStatus, PaymentMethod};
