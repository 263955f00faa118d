//! Review-specific store logic, including the append aggregation path.

pub mod aggregator;
pub mod entity;
pub mod error;

pub use aggregator::*;
pub use error::*;

use crate::clients::ReviewClient;
use crate::model::Review;
use crate::store::StoreActor;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Creates a new Review store actor and its client.
pub fn new() -> (StoreActor<Review>, ReviewClient) {
    let review_id_counter = Arc::new(AtomicU64::new(1));
    let next_review_id = move || {
        let id = review_id_counter.fetch_add(1, Ordering::SeqCst);
        format!("review_{}", id)
    };

    let (actor, generic_client) = StoreActor::new(32, next_review_id);
    let client = ReviewClient::new(generic_client);

    (actor, client)
}
