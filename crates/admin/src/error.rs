//! Admin error types.

use thiserror::Error;

use fenestra_storefront::catalog::CatalogError;

use crate::products::FormError;

/// Errors that can occur in admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The acting user is not an admin.
    #[error("admin access required")]
    Forbidden,

    /// The submitted form failed validation.
    #[error("product form is invalid")]
    InvalidForm(Vec<FormError>),

    /// The underlying catalog operation failed.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),
}
