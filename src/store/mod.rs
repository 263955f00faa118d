//! Generic versioned storage with optimistic concurrency control.
//!
//! This module provides the building blocks the resource stores are made
//! of: a store actor that owns the entities and serializes mutations, a
//! typed client, and the version-comparison policy.
//!
//! # Main Components
//!
//! - [`StoreEntity`] - Trait that versioned resource types implement
//! - [`StoreActor`] - Generic actor that owns entities and applies
//!   conditional writes
//! - [`StoreClient`] - Type-safe client handle
//! - [`occ`] - Version arithmetic, classification, and entity tags
//!
//! # Testing
//!
//! See [`mock`] for utilities to test clients without spawning full store
//! actors.

pub mod core;
pub mod mock;
pub mod occ;

// Re-export core types for convenience
pub use self::core::*;
