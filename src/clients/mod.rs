//! Type-safe wrappers around [`StoreClient`](crate::store::StoreClient).

pub mod entity_client;
pub mod product_client;
pub mod review_client;

pub use entity_client::*;
pub use product_client::*;
pub use review_client::*;
