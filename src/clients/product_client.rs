use crate::clients::entity_client::EntityClient;
use crate::model::{Product, ProductCreate, ProductUpdate};
use crate::product_store::ProductError;
use crate::store::core::{CreateOutcome, StoreClient, UpdateOutcome};
use crate::store::occ::Version;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Product store actor.
#[derive(Clone)]
pub struct ProductClient {
    inner: StoreClient<Product>,
}

impl ProductClient {
    pub fn new(inner: StoreClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &StoreClient<Product> {
        &self.inner
    }
}

impl ProductClient {
    /// Creates a product; the store assigns the id and stamps version 1.
    #[instrument(skip(self))]
    pub async fn create(&self, params: ProductCreate) -> Result<Product, ProductError> {
        debug!("Sending request");
        let name = params.name.clone();
        match self.inner.create(params).await? {
            CreateOutcome::Created(product) => Ok(product),
            CreateOutcome::Duplicate => Err(ProductError::AlreadyExists(name)),
        }
    }

    /// Fetches every stored product.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner.list().await.map_err(ProductError::from)
    }

    /// Compare-and-swap update: applied only when `expected` matches the
    /// stored version.
    #[instrument(skip(self, update))]
    pub async fn update(
        &self,
        id: u32,
        expected: Version,
        update: ProductUpdate,
    ) -> Result<UpdateOutcome<Product>, ProductError> {
        debug!("Sending request");
        self.conditional_update(id, expected, Box::new(move |product| product.apply(update)))
            .await
    }
}
