//! Admin product management: gated, validated catalog mutations.

use tracing::info;

use fenestra_core::{Category, Price, ProductId, Subcategory};
use fenestra_storefront::catalog::{Product, ProductCatalog, ProductDraft, ProductUpdate};
use fenestra_storefront::session::User;

use crate::error::AdminError;

/// A field-level form validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormError {
    /// Form field name.
    pub field: &'static str,
    /// User-facing message.
    pub message: String,
}

impl FormError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Raw product form input, as submitted by the admin panel.
#[derive(Debug, Clone, Default)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub subcategory: String,
    pub material: String,
    pub size: String,
    pub in_stock: bool,
    pub featured: bool,
}

impl ProductForm {
    /// Validate the form into a typed [`ProductDraft`].
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<ProductDraft, Vec<FormError>> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("name", &self.name),
            ("description", &self.description),
            ("image", &self.image),
            ("material", &self.material),
            ("size", &self.size),
        ] {
            if value.trim().is_empty() {
                errors.push(FormError::new(field, format!("{field} is required")));
            }
        }

        let price = Price::parse(&self.price)
            .map_err(|e| errors.push(FormError::new("price", e.to_string())))
            .ok();
        let category = self
            .category
            .parse::<Category>()
            .map_err(|e| errors.push(FormError::new("category", e.to_string())))
            .ok();
        let subcategory = self
            .subcategory
            .parse::<Subcategory>()
            .map_err(|e| errors.push(FormError::new("subcategory", e.to_string())))
            .ok();

        match (price, category, subcategory) {
            (Some(price), Some(category), Some(subcategory)) if errors.is_empty() => {
                Ok(ProductDraft {
                    name: self.name.trim().to_owned(),
                    description: self.description.trim().to_owned(),
                    price,
                    image: self.image.trim().to_owned(),
                    category,
                    subcategory,
                    material: self.material.trim().to_owned(),
                    size: self.size.trim().to_owned(),
                    in_stock: self.in_stock,
                    featured: self.featured,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Raw partial-update form: absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductUpdateForm {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    pub material: Option<String>,
    pub size: Option<String>,
    pub in_stock: Option<bool>,
    pub featured: Option<bool>,
}

impl ProductUpdateForm {
    /// Validate the present fields into a typed [`ProductUpdate`].
    ///
    /// # Errors
    ///
    /// Returns every failing field with its message.
    pub fn validate(&self) -> Result<ProductUpdate, Vec<FormError>> {
        let mut errors = Vec::new();
        let mut update = ProductUpdate::default();

        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                errors.push(FormError::new("name", "name is required"));
            } else {
                update.name = Some(name.trim().to_owned());
            }
        }
        if let Some(description) = &self.description {
            if description.trim().is_empty() {
                errors.push(FormError::new("description", "description is required"));
            } else {
                update.description = Some(description.trim().to_owned());
            }
        }
        if let Some(price) = &self.price {
            match Price::parse(price) {
                Ok(price) => update.price = Some(price),
                Err(e) => errors.push(FormError::new("price", e.to_string())),
            }
        }
        if let Some(image) = &self.image {
            update.image = Some(image.trim().to_owned());
        }
        if let Some(category) = &self.category {
            match category.parse::<Category>() {
                Ok(category) => update.category = Some(category),
                Err(e) => errors.push(FormError::new("category", e.to_string())),
            }
        }
        if let Some(subcategory) = &self.subcategory {
            match subcategory.parse::<Subcategory>() {
                Ok(subcategory) => update.subcategory = Some(subcategory),
                Err(e) => errors.push(FormError::new("subcategory", e.to_string())),
            }
        }
        if let Some(material) = &self.material {
            update.material = Some(material.trim().to_owned());
        }
        if let Some(size) = &self.size {
            update.size = Some(size.trim().to_owned());
        }
        update.in_stock = self.in_stock;
        update.featured = self.featured;

        if errors.is_empty() {
            Ok(update)
        } else {
            Err(errors)
        }
    }
}

/// Admin-gated catalog mutations.
pub struct ProductManager {
    catalog: ProductCatalog,
}

impl ProductManager {
    /// Wrap a catalog with admin gating.
    #[must_use]
    pub const fn new(catalog: ProductCatalog) -> Self {
        Self { catalog }
    }

    fn require_admin(user: &User) -> Result<(), AdminError> {
        if user.is_admin {
            Ok(())
        } else {
            Err(AdminError::Forbidden)
        }
    }

    /// Create a product from validated form input.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Forbidden`] for non-admins,
    /// [`AdminError::InvalidForm`] on validation failure, or a wrapped
    /// catalog error.
    pub fn create(&self, user: &User, form: &ProductForm) -> Result<Product, AdminError> {
        Self::require_admin(user)?;
        let draft = form.validate().map_err(AdminError::InvalidForm)?;
        info!(admin = %user.id, name = %draft.name, "admin creating product");
        Ok(self.catalog.add(draft)?)
    }

    /// Apply a validated partial update.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Forbidden`] for non-admins,
    /// [`AdminError::InvalidForm`] on validation failure, or a wrapped
    /// catalog error (including not-found).
    pub fn update(
        &self,
        user: &User,
        id: &ProductId,
        form: &ProductUpdateForm,
    ) -> Result<Product, AdminError> {
        Self::require_admin(user)?;
        let update = form.validate().map_err(AdminError::InvalidForm)?;
        info!(admin = %user.id, product = %id, "admin updating product");
        Ok(self.catalog.update(id, update)?)
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Forbidden`] for non-admins, or a wrapped
    /// catalog error (including not-found).
    pub fn delete(&self, user: &User, id: &ProductId) -> Result<Product, AdminError> {
        Self::require_admin(user)?;
        info!(admin = %user.id, product = %id, "admin deleting product");
        Ok(self.catalog.delete(id)?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use fenestra_core::{Email, UserId};
    use fenestra_storefront::storage::MemoryStore;

    use super::*;

    fn admin() -> User {
        User {
            id: UserId::new("1"),
            email: Email::parse("admin@example.com").unwrap(),
            is_admin: true,
        }
    }

    fn shopper() -> User {
        User {
            id: UserId::new("2"),
            email: Email::parse("shopper@example.com").unwrap(),
            is_admin: false,
        }
    }

    fn manager() -> ProductManager {
        let catalog = ProductCatalog::open(Arc::new(MemoryStore::new())).unwrap();
        ProductManager::new(catalog)
    }

    fn valid_form() -> ProductForm {
        ProductForm {
            name: "Aluminium Sliding Door".to_owned(),
            description: "Smooth-rolling sliding door".to_owned(),
            price: "41000".to_owned(),
            image: "https://example.com/door.jpg".to_owned(),
            category: "Aluminium".to_owned(),
            subcategory: "Doors".to_owned(),
            material: "Aluminium".to_owned(),
            size: "72\" x 80\"".to_owned(),
            in_stock: true,
            featured: false,
        }
    }

    #[test]
    fn test_non_admin_is_forbidden() {
        let manager = manager();
        assert!(matches!(
            manager.create(&shopper(), &valid_form()),
            Err(AdminError::Forbidden)
        ));
        assert!(matches!(
            manager.delete(&shopper(), &ProductId::new("1")),
            Err(AdminError::Forbidden)
        ));
    }

    #[test]
    fn test_create_from_valid_form() {
        let manager = manager();
        let product = manager.create(&admin(), &valid_form()).unwrap();
        assert_eq!(product.name, "Aluminium Sliding Door");
        assert_eq!(product.category, Category::Aluminium);
        assert_eq!(product.price, Price::from_major(41000));
    }

    #[test]
    fn test_form_validation_collects_field_errors() {
        let mut form = valid_form();
        form.name = "  ".to_owned();
        form.price = "a lot".to_owned();
        form.category = "Plywood".to_owned();

        let err = manager().create(&admin(), &form).unwrap_err();
        let AdminError::InvalidForm(errors) = err else {
            panic!("expected InvalidForm");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["name", "price", "category"]);
    }

    #[test]
    fn test_partial_update_form() {
        let manager = manager();
        let update = ProductUpdateForm {
            price: Some("31000".to_owned()),
            in_stock: Some(false),
            ..ProductUpdateForm::default()
        };
        let product = manager
            .update(&admin(), &ProductId::new("1"), &update)
            .unwrap();
        assert_eq!(product.price, Price::from_major(31000));
        assert!(!product.in_stock);
        assert_eq!(product.name, "Sliding UPVC Window");
    }

    #[test]
    fn test_update_rejects_bad_fields() {
        let update = ProductUpdateForm {
            subcategory: Some("Skylights".to_owned()),
            ..ProductUpdateForm::default()
        };
        let err = manager()
            .update(&admin(), &ProductId::new("1"), &update)
            .unwrap_err();
        assert!(matches!(err, AdminError::InvalidForm(_)));
    }

    #[test]
    fn test_delete_unknown_id_maps_to_catalog_error() {
        let err = manager()
            .delete(&admin(), &ProductId::new("missing"))
            .unwrap_err();
        assert!(matches!(err, AdminError::Catalog(_)));
    }
}
