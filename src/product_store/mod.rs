//! Product-specific store logic.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use crate::store::StoreActor;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Creates a new Product store actor and its client.
pub fn new() -> (StoreActor<Product>, ProductClient) {
    let product_id_counter = Arc::new(AtomicU32::new(1));
    let next_product_id = move || product_id_counter.fetch_add(1, Ordering::SeqCst);

    let (actor, generic_client) = StoreActor::new(32, next_product_id);
    let client = ProductClient::new(generic_client);

    (actor, client)
}
