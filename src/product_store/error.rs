//! Error types for the product store.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during product operations.
///
/// The variants are deliberately distinct: "did not exist", "existed but
/// the presented version was stale", and the fault cases never collapse
/// into one another.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(u32),

    /// The presented version no longer matches the stored product.
    #[error("Version conflict on product {0}: presented tag is stale")]
    VersionConflict(u32),

    /// A product identical under the store's uniqueness probe exists.
    #[error("Product already exists: {0}")]
    AlreadyExists(String),

    /// The product data provided is invalid.
    #[error("Product validation error: {0}")]
    Validation(String),

    /// The underlying store could not be reached.
    #[error("Product store error: {0}")]
    Store(#[from] StoreError),
}
