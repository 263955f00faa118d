//! Product mutation and read surface.

use tracing::{info, instrument};

use crate::clients::{EntityClient, ProductClient};
use crate::endpoint::ResourceResponse;
use crate::model::{Product, ProductCreate, ProductUpdate};
use crate::product_store::ProductError;
use crate::store::core::{DeleteOutcome, UpdateOutcome};
use crate::store::occ::EntityTag;

/// Boundary-facing handle for product requests.
#[derive(Clone)]
pub struct ProductEndpoint {
    client: ProductClient,
}

impl ProductEndpoint {
    pub fn new(client: ProductClient) -> Self {
        Self { client }
    }

    fn envelope(product: Product) -> ResourceResponse<Product> {
        let location = format!("/product/{}", product.id);
        let version = product.version;
        ResourceResponse::versioned(product, version, location)
    }

    /// Returns the product with the specified id, or `None` when it does
    /// not exist.
    #[instrument(skip(self))]
    pub async fn get(&self, id: u32) -> Result<Option<ResourceResponse<Product>>, ProductError> {
        Ok(self.client.get(id).await?.map(Self::envelope))
    }

    /// Returns all products.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        self.client.list().await
    }

    /// Creates a new product. Any id or version the caller had in mind is
    /// ignored; the stored form comes back with version 1.
    #[instrument(skip(self, params))]
    pub async fn create(
        &self,
        params: ProductCreate,
    ) -> Result<ResourceResponse<Product>, ProductError> {
        validate_create(&params)?;
        info!(name = %params.name, quantity = params.quantity, "Creating new product");
        let product = self.client.create(params).await?;
        Ok(Self::envelope(product))
    }

    /// Updates the product only if `if_match` names its current version.
    ///
    /// The three non-fault outcomes stay distinct: absent, stale version,
    /// and applied-with-new-tag.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: u32,
        if_match: &EntityTag,
        update: ProductUpdate,
    ) -> Result<ResourceResponse<Product>, ProductError> {
        let expected = if_match.version().ok_or_else(|| {
            ProductError::Validation(format!("malformed entity tag: {}", if_match))
        })?;
        info!(id, %expected, "Updating product");

        match self.client.update(id, expected, update).await? {
            UpdateOutcome::Applied(product) => Ok(Self::envelope(product)),
            UpdateOutcome::VersionConflict => Err(ProductError::VersionConflict(id)),
            UpdateOutcome::NotFound => Err(ProductError::NotFound(id)),
        }
    }

    /// Deletes the product. No version check: deletion is unconditional
    /// once the product is known to exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: u32) -> Result<(), ProductError> {
        info!(id, "Deleting product");
        match self.client.delete(id).await? {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::NotFound => Err(ProductError::NotFound(id)),
        }
    }
}

fn validate_create(params: &ProductCreate) -> Result<(), ProductError> {
    if params.name.trim().is_empty() {
        return Err(ProductError::Validation("product name must not be empty".into()));
    }
    Ok(())
}
