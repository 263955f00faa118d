//! Append-only aggregation of review entries under contention.
//!
//! "Append one entry to the review for a product" is a read-modify-write,
//! and concurrent appenders race on the same document. Instead of a
//! cross-operation lock, the aggregator runs a bounded compare-and-swap
//! loop: each individual store call is atomic, and a lost race only costs
//! re-reading the current state and recomputing the append locally. The
//! loop is bounded so sustained contention surfaces as [`ReviewError::Busy`]
//! instead of livelock.

use tracing::{debug, instrument, warn};

use crate::clients::ReviewClient;
use crate::model::{Review, ReviewCreate, ReviewEntry};
use crate::review_store::ReviewError;
use crate::store::core::{CreateOutcome, UpdateOutcome};

/// Maximum number of find/write rounds before an append gives up.
const MAX_APPEND_ATTEMPTS: usize = 5;

/// Serializes "append an entry" into store primitives, tolerating
/// concurrent appenders.
#[derive(Clone)]
pub struct ReviewAggregator {
    reviews: ReviewClient,
}

impl ReviewAggregator {
    pub fn new(reviews: ReviewClient) -> Self {
        Self { reviews }
    }

    /// Appends `entry` to the review for `product_id`, creating the review
    /// document when none exists.
    ///
    /// Every attempt re-reads the current state, so a retry never replays
    /// a stale version. The outcomes within one attempt:
    /// - no document and our create wins: done, version 1;
    /// - no document but another appender created it first: retry;
    /// - document present and our conditional append wins: done;
    /// - document present but its version moved underneath us: retry;
    /// - document deleted between the read and the write: retry (the next
    ///   round recreates it).
    #[instrument(skip(self, entry), fields(username = %entry.username))]
    pub async fn append_entry(
        &self,
        product_id: u32,
        entry: ReviewEntry,
    ) -> Result<Review, ReviewError> {
        for attempt in 1..=MAX_APPEND_ATTEMPTS {
            match self.reviews.find_by_product(product_id).await? {
                None => {
                    let params = ReviewCreate {
                        product_id,
                        entries: vec![entry.clone()],
                    };
                    match self.reviews.create(params).await? {
                        CreateOutcome::Created(review) => {
                            debug!(attempt, review_id = %review.id, "Created review with first entry");
                            return Ok(review);
                        }
                        CreateOutcome::Duplicate => {
                            debug!(attempt, "Lost create race, retrying");
                        }
                    }
                }
                Some(current) => {
                    match self
                        .reviews
                        .append_at(current.id.clone(), current.version, entry.clone())
                        .await?
                    {
                        UpdateOutcome::Applied(review) => {
                            debug!(attempt, review_id = %review.id, version = %review.version, "Appended entry");
                            return Ok(review);
                        }
                        UpdateOutcome::VersionConflict => {
                            debug!(attempt, review_id = %current.id, "Lost append race, retrying");
                        }
                        UpdateOutcome::NotFound => {
                            debug!(attempt, review_id = %current.id, "Review deleted mid-append, retrying");
                        }
                    }
                }
            }
        }

        warn!(product_id, attempts = MAX_APPEND_ATTEMPTS, "Append attempts exhausted");
        Err(ReviewError::Busy {
            product_id,
            attempts: MAX_APPEND_ATTEMPTS,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Review;
    use crate::store::mock::MockClient;
    use crate::store::occ::Version;

    fn review_v1() -> Review {
        Review::new("review_1", 7, vec![ReviewEntry::new("a", "x")])
    }

    #[tokio::test]
    async fn append_creates_the_document_when_absent() {
        let mut mock = MockClient::<Review>::new();
        mock.expect_find().returns(None);
        mock.expect_create()
            .returns(CreateOutcome::Created(review_v1()));

        let aggregator = ReviewAggregator::new(ReviewClient::new(mock.client()));
        let review = aggregator
            .append_entry(7, ReviewEntry::new("a", "x"))
            .await
            .unwrap();

        assert_eq!(review.version, Version::initial());
        assert_eq!(review.entries.len(), 1);
        mock.verify();
    }

    #[tokio::test]
    async fn append_retries_after_losing_the_create_race() {
        let mut mock = MockClient::<Review>::new();

        // First round: nothing stored, but another appender creates the
        // document before our create lands.
        mock.expect_find().returns(None);
        mock.expect_create().returns(CreateOutcome::Duplicate);

        // Second round: the winner's document is found and the append
        // applies.
        let current = review_v1();
        let mut appended = current.clone();
        appended.push_entry(ReviewEntry::new("b", "y"));
        appended.version = current.version.next();

        mock.expect_find().returns(Some(current));
        mock.expect_conditional_update("review_1".to_string())
            .returns(UpdateOutcome::Applied(appended.clone()));

        let aggregator = ReviewAggregator::new(ReviewClient::new(mock.client()));
        let review = aggregator
            .append_entry(7, ReviewEntry::new("b", "y"))
            .await
            .unwrap();

        assert_eq!(review, appended);
        mock.verify();
    }

    #[tokio::test]
    async fn append_surfaces_busy_after_exhausting_attempts() {
        let mut mock = MockClient::<Review>::new();
        for _ in 0..MAX_APPEND_ATTEMPTS {
            mock.expect_find().returns(Some(review_v1()));
            mock.expect_conditional_update("review_1".to_string())
                .returns(UpdateOutcome::VersionConflict);
        }

        let aggregator = ReviewAggregator::new(ReviewClient::new(mock.client()));
        let result = aggregator.append_entry(7, ReviewEntry::new("b", "y")).await;

        assert_eq!(
            result,
            Err(ReviewError::Busy {
                product_id: 7,
                attempts: MAX_APPEND_ATTEMPTS
            })
        );
        mock.verify();
    }

    #[tokio::test]
    async fn append_propagates_storage_faults_unretried() {
        let mut mock = MockClient::<Review>::new();
        mock.expect_find().drops_response();

        let aggregator = ReviewAggregator::new(ReviewClient::new(mock.client()));
        let result = aggregator.append_entry(7, ReviewEntry::new("b", "y")).await;

        assert!(matches!(result, Err(ReviewError::Store(_))));
        mock.verify();
    }
}
