//! Structured result filters for the search results view.
//!
//! A transient filter set rebuilt per view; never persisted. All four
//! predicates are conjunctive, so adding a filter can only narrow a
//! result list.

use std::collections::HashSet;

use fenestra_core::{Category, Price, Subcategory};

use super::Product;

/// An inclusive price range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    pub min: Price,
    pub max: Price,
}

impl PriceRange {
    /// The default range shown by the results view.
    pub const DEFAULT_MAX: u32 = 200_000;

    /// Whether `price` falls within `[min, max]`.
    #[must_use]
    pub fn contains(&self, price: Price) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: Price::ZERO,
            max: Price::from_major(Self::DEFAULT_MAX),
        }
    }
}

/// Structured filters applied on top of a text-search result.
///
/// An empty category or subcategory set passes everything; the price range
/// is inclusive on both ends; the stock flag, when set, requires
/// `in_stock`.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    pub categories: HashSet<Category>,
    pub subcategories: HashSet<Subcategory>,
    pub price_range: PriceRange,
    pub in_stock_only: bool,
}

impl FilterSet {
    /// An empty filter set: passes every product.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle a category in or out of the selected set.
    pub fn toggle_category(&mut self, category: Category) {
        if !self.categories.remove(&category) {
            self.categories.insert(category);
        }
    }

    /// Toggle a subcategory in or out of the selected set.
    pub fn toggle_subcategory(&mut self, subcategory: Subcategory) {
        if !self.subcategories.remove(&subcategory) {
            self.subcategories.insert(subcategory);
        }
    }

    /// Whether a product passes all four predicates.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        (self.categories.is_empty() || self.categories.contains(&product.category))
            && (self.subcategories.is_empty()
                || self.subcategories.contains(&product.subcategory))
            && self.price_range.contains(product.price)
            && (!self.in_stock_only || product.in_stock)
    }

    /// Filter a result list, preserving its order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect()
    }
}
