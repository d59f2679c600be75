//! Shopping cart over the `cart` document.
//!
//! One line per product id: adding a product already in the cart bumps
//! its quantity instead of duplicating the line. Lines hold product
//! snapshots, so a later catalog edit or delete does not touch a cart in
//! progress.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use fenestra_core::{Price, ProductId};

use crate::catalog::Product;
use crate::notify::{LogNotifier, Notifier};
use crate::storage::{KvStore, StorageError, read_json, write_json};

/// Storage key for the cart document.
const CART_KEY: &str = "cart";

/// A cart line: a product snapshot plus quantity.
///
/// Persisted flat: product fields and `quantity` side by side in the
/// cart document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Price of this line: unit price times quantity.
    #[must_use]
    pub fn line_price(&self) -> Price {
        self.product.price.times(self.quantity)
    }
}

/// Cart repository over a [`KvStore`]. Cheap to clone.
#[derive(Clone)]
pub struct CartStore {
    store: Arc<dyn KvStore>,
    notifier: Arc<dyn Notifier>,
}

impl CartStore {
    /// Create a cart handle over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self::with_notifier(store, Arc::new(LogNotifier))
    }

    /// Create a cart handle with an explicit notification sink.
    #[must_use]
    pub fn with_notifier(store: Arc<dyn KvStore>, notifier: Arc<dyn Notifier>) -> Self {
        Self { store, notifier }
    }

    fn load(&self) -> Result<Vec<CartLine>, StorageError> {
        Ok(read_json(self.store.as_ref(), CART_KEY)?.unwrap_or_default())
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), StorageError> {
        write_json(self.store.as_ref(), CART_KEY, &lines)
    }

    /// Current cart lines, in insertion order.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn lines(&self) -> Result<Vec<CartLine>, StorageError> {
        self.load()
    }

    /// Whether the cart holds no lines.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.load()?.is_empty())
    }

    /// Add a product: a new line at quantity 1, or +1 on its existing line.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn add(&self, product: &Product) -> Result<(), StorageError> {
        let mut lines = self.load()?;
        match lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += 1,
            None => lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
        self.save(&lines)?;

        debug!(product = %product.id, "added to cart");
        self.notifier.notify(
            "Added to Cart",
            &format!("{} has been added to your cart.", product.name),
        );
        Ok(())
    }

    /// Remove a product's line entirely. Unknown ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn remove(&self, product_id: &ProductId) -> Result<(), StorageError> {
        let mut lines = self.load()?;
        lines.retain(|l| &l.product.id != product_id);
        self.save(&lines)
    }

    /// Set a line's quantity. Quantities below 1 are rejected as a no-op;
    /// dropping a line goes through [`CartStore::remove`].
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn set_quantity(&self, product_id: &ProductId, quantity: u32) -> Result<(), StorageError> {
        if quantity < 1 {
            return Ok(());
        }
        let mut lines = self.load()?;
        if let Some(line) = lines.iter_mut().find(|l| &l.product.id == product_id) {
            line.quantity = quantity;
            self.save(&lines)?;
        }
        Ok(())
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(CART_KEY)
    }

    /// Sum of line prices.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn total_price(&self) -> Result<Price, StorageError> {
        Ok(self.load()?.iter().map(CartLine::line_price).sum())
    }

    /// Sum of line quantities.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn total_items(&self) -> Result<u32, StorageError> {
        Ok(self.load()?.iter().map(|l| l.quantity).sum())
    }
}
