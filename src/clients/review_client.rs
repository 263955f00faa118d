use crate::clients::entity_client::EntityClient;
use crate::model::{Review, ReviewCreate, ReviewEntry};
use crate::review_store::ReviewError;
use crate::store::core::{CreateOutcome, StoreClient, UpdateOutcome};
use crate::store::occ::Version;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Review store actor.
///
/// Append orchestration (find, create-if-absent, retry on conflict) lives
/// in the [`ReviewAggregator`](crate::review_store::ReviewAggregator); this
/// client only exposes the store primitives in review-shaped form.
#[derive(Clone)]
pub struct ReviewClient {
    inner: StoreClient<Review>,
}

impl ReviewClient {
    pub fn new(inner: StoreClient<Review>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl EntityClient<Review> for ReviewClient {
    type Error = ReviewError;

    fn inner(&self) -> &StoreClient<Review> {
        &self.inner
    }
}

impl ReviewClient {
    /// Creates a review document. `Duplicate` is surfaced to the caller:
    /// the aggregator treats it as a lost create race, the endpoint as
    /// "already exists".
    #[instrument(skip(self, params), fields(product_id = params.product_id))]
    pub async fn create(&self, params: ReviewCreate) -> Result<CreateOutcome<Review>, ReviewError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(ReviewError::from)
    }

    /// Looks up the review document for a product, if one exists.
    #[instrument(skip(self))]
    pub async fn find_by_product(&self, product_id: u32) -> Result<Option<Review>, ReviewError> {
        debug!("Sending request");
        self.inner
            .find_one(move |review: &Review| review.product_id == product_id)
            .await
            .map_err(ReviewError::from)
    }

    /// Appends one entry at the caller's expected version.
    #[instrument(skip(self, entry))]
    pub async fn append_at(
        &self,
        id: String,
        expected: Version,
        entry: ReviewEntry,
    ) -> Result<UpdateOutcome<Review>, ReviewError> {
        debug!("Sending request");
        self.conditional_update(id, expected, Box::new(move |review| review.push_entry(entry)))
            .await
    }
}
