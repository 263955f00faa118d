//! StoreEntity trait implementation for the Product domain type.
//!
//! This module contains the [`StoreEntity`] trait implementation that
//! enables [`Product`] to be managed by the generic
//! [`crate::store::StoreActor`].

use crate::model::{Product, ProductCreate};
use crate::store::occ::Version;
use crate::store::StoreEntity;

impl StoreEntity for Product {
    type Id = u32;
    type CreateParams = ProductCreate;

    /// Creates a new Product from creation parameters. Any version the
    /// caller supplied is irrelevant; the store stamps version 1.
    fn from_create_params(id: u32, params: ProductCreate) -> Self {
        Self::new(id, params.name, params.quantity)
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}
