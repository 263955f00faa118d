//! Error types for the review store.

use crate::store::StoreError;
use thiserror::Error;

/// Errors that can occur during review operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReviewError {
    /// The requested review was not found.
    #[error("Review not found: {0}")]
    NotFound(String),

    /// The presented version no longer matches the stored review.
    #[error("Version conflict on review {0}: presented tag is stale")]
    VersionConflict(String),

    /// A review document for this product already exists.
    #[error("Review already exists for product {0}")]
    AlreadyExists(u32),

    /// The append loop exhausted its attempt budget under contention.
    #[error("Append for product {product_id} still contended after {attempts} attempts")]
    Busy { product_id: u32, attempts: usize },

    /// The review data provided is invalid.
    #[error("Review validation error: {0}")]
    Validation(String),

    /// The underlying store could not be reached.
    #[error("Review store error: {0}")]
    Store(#[from] StoreError),
}
