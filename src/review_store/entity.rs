//! StoreEntity trait implementation for the Review domain type.
//!
//! The uniqueness probe is what makes "create the review for a product"
//! a single atomic step: the store rejects a second document for the same
//! `product_id` inside the same message that would have inserted it.

use crate::model::{Review, ReviewCreate};
use crate::store::occ::Version;
use crate::store::StoreEntity;

impl StoreEntity for Review {
    type Id = String;
    type CreateParams = ReviewCreate;

    fn from_create_params(id: String, params: ReviewCreate) -> Self {
        Self::new(id, params.product_id, params.entries)
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }

    /// At most one review document per product.
    fn conflicts_with(&self, existing: &Self) -> bool {
        self.product_id == existing.product_id
    }
}
