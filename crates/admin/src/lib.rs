//! Fenestra Admin - the product-management layer.
//!
//! Wraps the storefront catalog with admin gating and form validation:
//! raw string form input is validated into typed drafts and partial
//! updates before it ever reaches the catalog.

#![cfg_attr(not(test), forbid(unsafe_code))]

mod error;
mod products;

pub use error::AdminError;
pub use products::{FormError, ProductForm, ProductManager, ProductUpdateForm};
