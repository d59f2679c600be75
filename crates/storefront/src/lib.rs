//! Fenestra Storefront library.
//!
//! The storefront core: a product catalog with free-text search and
//! structured filters, a shopping cart, a multi-step checkout flow backed
//! by a pluggable payment gateway, append-only order history, and a demo
//! session layer.
//!
//! All state lives in a [`storage::KvStore`] - one JSON document per key,
//! mirroring the browser local-storage layout this store was designed
//! around (`user`, `products`, `cart`, `orders`). Repositories are explicit
//! handles over a shared store rather than ambient globals, so a real
//! backend can be substituted at the storage seam without touching the
//! catalog or checkout logic.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod notify;
pub mod orders;
pub mod session;
pub mod storage;
