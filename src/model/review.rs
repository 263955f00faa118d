//! Review document and its entries.
//!
//! A review is the single collection of user write-ups for one product.
//! Entries are append-only: once attached they are never reordered or
//! removed by the aggregation path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::occ::Version;

/// A user's write-up of a product, contained in a [`Review`] document.
///
/// Value type with no identity of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewEntry {
    /// The username of the reviewer.
    pub username: String,
    /// When the review was written.
    pub date: DateTime<Utc>,
    /// The textual review content.
    pub review: String,
}

impl ReviewEntry {
    pub fn new(username: impl Into<String>, review: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            date: Utc::now(),
            review: review.into(),
        }
    }
}

/// The review document for a product.
///
/// At most one review exists per `product_id`; the store's uniqueness
/// probe enforces this at create time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    pub product_id: u32,
    pub version: Version,
    pub entries: Vec<ReviewEntry>,
}

impl Review {
    pub fn new(id: impl Into<String>, product_id: u32, entries: Vec<ReviewEntry>) -> Self {
        Self {
            id: id.into(),
            product_id,
            version: Version::initial(),
            entries,
        }
    }

    /// Appends an entry at the end, preserving everything already present.
    pub fn push_entry(&mut self, entry: ReviewEntry) {
        self.entries.push(entry);
    }
}

/// Payload for creating a new review document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub product_id: u32,
    pub entries: Vec<ReviewEntry>,
}
