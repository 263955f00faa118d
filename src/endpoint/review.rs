//! Review mutation and read surface.

use tracing::{info, instrument};

use crate::clients::{EntityClient, ReviewClient};
use crate::endpoint::ResourceResponse;
use crate::model::{Review, ReviewCreate, ReviewEntry};
use crate::review_store::{ReviewAggregator, ReviewError};
use crate::store::core::{CreateOutcome, DeleteOutcome};

/// Boundary-facing handle for review requests.
#[derive(Clone)]
pub struct ReviewEndpoint {
    client: ReviewClient,
    aggregator: ReviewAggregator,
}

impl ReviewEndpoint {
    pub fn new(client: ReviewClient) -> Self {
        let aggregator = ReviewAggregator::new(client.clone());
        Self { client, aggregator }
    }

    fn envelope(review: Review) -> ResourceResponse<Review> {
        let location = format!("/review/{}", review.id);
        let version = review.version;
        ResourceResponse::versioned(review, version, location)
    }

    /// Returns the review with the specified id.
    #[instrument(skip(self))]
    pub async fn get(&self, id: String) -> Result<Option<ResourceResponse<Review>>, ReviewError> {
        Ok(self.client.get(id).await?.map(Self::envelope))
    }

    /// Returns the review for a product, if any entries were ever written.
    #[instrument(skip(self))]
    pub async fn get_by_product(
        &self,
        product_id: u32,
    ) -> Result<Option<ResourceResponse<Review>>, ReviewError> {
        Ok(self
            .client
            .find_by_product(product_id)
            .await?
            .map(Self::envelope))
    }

    /// Creates a review document outright. Fails with `AlreadyExists` when
    /// the product already has one; the append path is the usual way in.
    #[instrument(skip(self, params))]
    pub async fn create(
        &self,
        params: ReviewCreate,
    ) -> Result<ResourceResponse<Review>, ReviewError> {
        for entry in &params.entries {
            validate_entry(entry)?;
        }
        let product_id = params.product_id;
        info!(product_id, entries = params.entries.len(), "Creating new review");

        match self.client.create(params).await? {
            CreateOutcome::Created(review) => Ok(Self::envelope(review)),
            CreateOutcome::Duplicate => Err(ReviewError::AlreadyExists(product_id)),
        }
    }

    /// Appends one entry to the product's review, creating the document on
    /// first use. Contention is absorbed by the aggregator's bounded retry
    /// loop; exhaustion surfaces as `Busy`.
    #[instrument(skip(self, entry))]
    pub async fn append_entry(
        &self,
        product_id: u32,
        entry: ReviewEntry,
    ) -> Result<ResourceResponse<Review>, ReviewError> {
        validate_entry(&entry)?;
        info!(product_id, username = %entry.username, "Appending review entry");
        let review = self.aggregator.append_entry(product_id, entry).await?;
        Ok(Self::envelope(review))
    }

    /// Deletes the review. Unconditional once it exists.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: String) -> Result<(), ReviewError> {
        info!(%id, "Deleting review");
        match self.client.delete(id.clone()).await? {
            DeleteOutcome::Deleted => Ok(()),
            DeleteOutcome::NotFound => Err(ReviewError::NotFound(id)),
        }
    }
}

fn validate_entry(entry: &ReviewEntry) -> Result<(), ReviewError> {
    if entry.username.trim().is_empty() {
        return Err(ReviewError::Validation("reviewer username must not be empty".into()));
    }
    if entry.review.trim().is_empty() {
        return Err(ReviewError::Validation("review text must not be empty".into()));
    }
    Ok(())
}
