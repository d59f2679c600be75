//! Fenestra Core - Shared types library.
//!
//! This crate provides common types used across all Fenestra components:
//! - `storefront` - Catalog, cart, checkout, and order logic
//! - `admin` - Product management layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access. This
//! keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and
//!   the catalog/order enums

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
