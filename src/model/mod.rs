//! Pure data structures (DTOs) implementing the [`StoreEntity`](crate::store::StoreEntity) trait.

pub mod product;
pub mod review;

pub use product::*;
pub use review::*;
