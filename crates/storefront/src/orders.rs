//! Order history over the `orders` document.
//!
//! Orders are append-only and stored newest first. Line items are
//! name/quantity/price snapshots decoupled from live products, so later
//! catalog edits or deletes never corrupt history.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use fenestra_core::{OrderId, OrderStatus, PaymentMethod, Price};

use crate::cart::CartLine;
use crate::checkout::ShippingAddress;
use crate::storage::{KvStore, StorageError, read_json, write_json};

/// Storage key for the order document.
const ORDERS_KEY: &str = "orders";

/// A line item snapshot inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    pub quantity: u32,
    /// Unit price at the time the order was placed.
    pub price: Price,
}

impl From<&CartLine> for OrderLine {
    fn from(line: &CartLine) -> Self {
        Self {
            name: line.product.name.clone(),
            quantity: line.quantity,
            price: line.product.price,
        }
    }
}

/// Everything needed to place an order, before an id and date exist.
///
/// This is also what the payment gateway sees when charging.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderDraft {
    pub items: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    /// Sum of line prices.
    pub subtotal: Price,
    /// Tax on the subtotal, rounded to a whole unit.
    pub tax: Price,
    /// `subtotal + tax` (shipping is free).
    pub total: Price,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub date: DateTime<Utc>,
    pub items: Vec<OrderLine>,
    pub shipping_address: ShippingAddress,
    pub payment_method: PaymentMethod,
    pub total: Price,
    pub status: OrderStatus,
}

/// Append-only order repository over a [`KvStore`]. Cheap to clone.
#[derive(Clone)]
pub struct OrderBook {
    store: Arc<dyn KvStore>,
}

impl OrderBook {
    /// Create an order book handle over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    fn load(&self) -> Result<Vec<Order>, StorageError> {
        Ok(read_json(self.store.as_ref(), ORDERS_KEY)?.unwrap_or_default())
    }

    /// All orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn all(&self) -> Result<Vec<Order>, StorageError> {
        self.load()
    }

    /// Materialize a draft into a placed order and prepend it to history.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError`] if the store fails.
    pub fn place(&self, draft: OrderDraft) -> Result<Order, StorageError> {
        let mut orders = self.load()?;
        let order = Order {
            id: next_order_id(&orders),
            date: Utc::now(),
            items: draft.items,
            shipping_address: draft.shipping_address,
            payment_method: draft.payment_method,
            total: draft.total,
            status: OrderStatus::Processing,
        };
        orders.insert(0, order.clone());
        write_json(self.store.as_ref(), ORDERS_KEY, &orders)?;

        info!(id = %order.id, total = %order.total, "order placed");
        Ok(order)
    }
}

/// Generate a human-readable order id: `ORD-` plus a 5-digit suffix not
/// already in use.
fn next_order_id(existing: &[Order]) -> OrderId {
    let mut rng = rand::rng();
    loop {
        let candidate = OrderId::new(format!("ORD-{}", rng.random_range(10000..=99999u32)));
        if !existing.iter().any(|o| o.id == candidate) {
            return candidate;
        }
    }
}
