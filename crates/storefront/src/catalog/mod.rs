//! Product catalog: the single source of truth for products.
//!
//! The catalog is a write-through repository over the `products` document.
//! Cart lines and order lines take snapshots of products; nothing else
//! holds a reference into the catalog, only id-based lookups.

mod filter;
mod search;
pub mod seed;

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};
use uuid::Uuid;

use fenestra_core::{Category, Price, ProductId, Subcategory};

use crate::notify::{LogNotifier, Notifier};
use crate::storage::{KvStore, StorageError, read_json, write_json};

pub use filter::{FilterSet, PriceRange};
pub use search::search;

/// Storage key for the product document.
const PRODUCTS_KEY: &str = "products";

/// A catalog product.
///
/// Serialized with the camelCase field names of the persisted document
/// (`inStock`, not `in_stock`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Image URL; never dereferenced by this crate.
    pub image: String,
    pub category: Category,
    pub subcategory: Subcategory,
    /// Free-text material description (e.g. "Tempered Glass").
    pub material: String,
    /// Free-text dimensions (e.g. `48" x 36"`).
    pub size: String,
    pub in_stock: bool,
    pub featured: bool,
}

/// A product awaiting creation: all fields except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: String,
    pub category: Category,
    pub subcategory: Subcategory,
    pub material: String,
    pub size: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl ProductDraft {
    fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            image: self.image,
            category: self.category,
            subcategory: self.subcategory,
            material: self.material,
            size: self.size,
            in_stock: self.in_stock,
            featured: self.featured,
        }
    }
}

/// A typed partial update: every field optional, unknown fields impossible.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub category: Option<Category>,
    pub subcategory: Option<Subcategory>,
    pub material: Option<String>,
    pub size: Option<String>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

impl ProductUpdate {
    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(subcategory) = self.subcategory {
            product.subcategory = subcategory;
        }
        if let Some(material) = self.material {
            product.material = material;
        }
        if let Some(size) = self.size {
            product.size = size;
        }
        if let Some(in_stock) = self.in_stock {
            product.in_stock = in_stock;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
    }
}

/// Errors that can occur in catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Storage failure reading or writing the product document.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The referenced product does not exist.
    #[error("product not found: {0}")]
    NotFound(ProductId),
}

/// Write-through product repository over a [`KvStore`].
///
/// Cheap to clone: handles share the underlying store.
#[derive(Clone)]
pub struct ProductCatalog {
    store: Arc<dyn KvStore>,
    notifier: Arc<dyn Notifier>,
}

impl ProductCatalog {
    /// Open the catalog, seeding the fixed initial products if the store
    /// holds no product document yet.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails.
    pub fn open(store: Arc<dyn KvStore>) -> Result<Self, CatalogError> {
        Self::with_notifier(store, Arc::new(LogNotifier))
    }

    /// Open the catalog with an explicit notification sink.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails.
    pub fn with_notifier(
        store: Arc<dyn KvStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, CatalogError> {
        let catalog = Self { store, notifier };
        if read_json::<Vec<Product>>(catalog.store.as_ref(), PRODUCTS_KEY)?.is_none() {
            let initial = seed::initial_products();
            info!(count = initial.len(), "seeding initial product catalog");
            catalog.save(&initial)?;
        }
        Ok(catalog)
    }

    fn load(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(read_json(self.store.as_ref(), PRODUCTS_KEY)?.unwrap_or_default())
    }

    fn save(&self, products: &[Product]) -> Result<(), CatalogError> {
        write_json(self.store.as_ref(), PRODUCTS_KEY, &products)?;
        Ok(())
    }

    /// All products, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails.
    pub fn all(&self) -> Result<Vec<Product>, CatalogError> {
        self.load()
    }

    /// Look up a product by id.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails. An unknown
    /// id is `Ok(None)`, not an error.
    pub fn get(&self, id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.load()?.into_iter().find(|p| &p.id == id))
    }

    /// Add a new product, assigning it a fresh id.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails.
    pub fn add(&self, draft: ProductDraft) -> Result<Product, CatalogError> {
        let product = draft.into_product(ProductId::new(Uuid::new_v4().to_string()));
        let mut products = self.load()?;
        products.push(product.clone());
        self.save(&products)?;

        debug!(id = %product.id, name = %product.name, "product added");
        self.notifier.notify(
            "Product Added",
            &format!("{} has been added successfully", product.name),
        );
        Ok(product)
    }

    /// Apply a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, or
    /// [`CatalogError::Storage`] if the store fails.
    pub fn update(&self, id: &ProductId, update: ProductUpdate) -> Result<Product, CatalogError> {
        let mut products = self.load()?;
        let product = products
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        update.apply(product);
        let updated = product.clone();
        self.save(&products)?;

        debug!(id = %updated.id, "product updated");
        self.notifier.notify(
            "Product Updated",
            "The product has been updated successfully",
        );
        Ok(updated)
    }

    /// Delete a product. Existing cart and order lines keep their
    /// snapshots; only the catalog entry goes away.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::NotFound`] for an unknown id, or
    /// [`CatalogError::Storage`] if the store fails.
    pub fn delete(&self, id: &ProductId) -> Result<Product, CatalogError> {
        let mut products = self.load()?;
        let position = products
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;
        let removed = products.remove(position);
        self.save(&products)?;

        warn!(id = %removed.id, name = %removed.name, "product deleted");
        self.notifier.notify(
            "Product Deleted",
            &format!("{} has been deleted", removed.name),
        );
        Ok(removed)
    }

    /// Products in a category, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails.
    pub fn by_category(&self, category: Category) -> Result<Vec<Product>, CatalogError> {
        Ok(self
            .load()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Featured products, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails.
    pub fn featured(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.load()?.into_iter().filter(|p| p.featured).collect())
    }

    /// Run a free-text query against the current catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError::Storage`] if the store fails. The query
    /// itself never fails; no matches is an empty vec.
    pub fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(search::search(&self.load()?, query))
    }
}
