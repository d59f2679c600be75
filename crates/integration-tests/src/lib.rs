//! End-to-end tests for Fenestra.
//!
//! The harness here wires a full store the way an application would:
//! one shared [`KvStore`] backing catalog, cart, orders, and session,
//! with a [`RecordingNotifier`] standing in for the toast UI.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fenestra-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `shopping_flow` - Browse, search, cart, and checkout journeys
//! - `admin_products` - Admin product management
//! - `accounts` - Signup, login, and session behavior
//! - `persistence` - File-backed stores across process restarts

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::{Arc, Once};

use rust_decimal::Decimal;

use fenestra_storefront::cart::CartStore;
use fenestra_storefront::catalog::ProductCatalog;
use fenestra_storefront::checkout::AddressForm;
use fenestra_storefront::notify::{Notifier, RecordingNotifier};
use fenestra_storefront::orders::OrderBook;
use fenestra_storefront::session::SessionStore;
use fenestra_storefront::storage::{KvStore, MemoryStore};

/// A fully wired store over a single backing [`KvStore`].
pub struct TestStore {
    pub catalog: ProductCatalog,
    pub cart: CartStore,
    pub orders: OrderBook,
    pub session: SessionStore,
    pub notifier: Arc<RecordingNotifier>,
}

impl TestStore {
    /// Wire up a store over an in-memory backend.
    ///
    /// # Panics
    ///
    /// Panics if catalog seeding fails, which the memory backend never
    /// does.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::over(Arc::new(MemoryStore::new()))
    }

    /// Wire up a store over the given backend, seeding the catalog if
    /// the backend holds no products yet.
    ///
    /// # Panics
    ///
    /// Panics if the backend fails during catalog seeding.
    #[must_use]
    pub fn over(store: Arc<dyn KvStore>) -> Self {
        let notifier = Arc::new(RecordingNotifier::new());
        let sink: Arc<dyn Notifier> = Arc::<RecordingNotifier>::clone(&notifier);
        let catalog = ProductCatalog::with_notifier(Arc::clone(&store), Arc::clone(&sink))
            .unwrap_or_else(|e| panic!("catalog open failed: {e}"));
        Self {
            catalog,
            cart: CartStore::with_notifier(Arc::clone(&store), Arc::clone(&sink)),
            orders: OrderBook::new(Arc::clone(&store)),
            session: SessionStore::with_notifier(store, sink),
            notifier,
        }
    }
}

/// Install a tracing subscriber honoring `RUST_LOG`, once per process.
/// Call at the top of a test to see the store's structured logs.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .init();
    });
}

/// The standard tax rate applied at checkout (18%).
#[must_use]
pub fn standard_tax_rate() -> Decimal {
    Decimal::new(18, 2)
}

/// A shipping address that passes validation.
#[must_use]
pub fn valid_address() -> AddressForm {
    AddressForm {
        full_name: "Ravi Deshmukh".to_owned(),
        phone_number: "9821054321".to_owned(),
        address: "2nd Floor, 18 MG Road".to_owned(),
        city: "Pune".to_owned(),
        state: "Maharashtra".to_owned(),
        pincode: "411001".to_owned(),
    }
}
