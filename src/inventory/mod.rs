//! External inventory-manager collaborator.
//!
//! The catalog consumes the inventory manager, it does not implement it:
//! `lookup` and `record_purchase` are stateless pass-through calls with no
//! versioning of their own, and any failure on the manager's side is
//! reported as absence. The trait is the seam; the wiring decides which
//! implementation sits behind it, and tests substitute their own.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use tracing::{debug, warn};

/// A product's stock record as the inventory manager reports it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub product_id: u32,
    pub quantity: u32,
    pub product_name: String,
    pub product_category: String,
}

/// A purchase to be recorded against a product's stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub product_id: u32,
    pub quantity_purchased: u32,
}

/// Handle to the external inventory manager.
///
/// Both calls return `None` for "unknown product" and for any failure on
/// the manager's side; callers never distinguish the two.
#[async_trait]
pub trait InventoryManager: Send + Sync {
    async fn lookup(&self, product_id: u32) -> Option<InventoryRecord>;

    async fn record_purchase(&self, product_id: u32, quantity: u32) -> Option<InventoryRecord>;
}

/// In-process inventory manager used for wiring the system locally and in
/// tests.
pub struct InMemoryInventoryManager {
    records: Mutex<HashMap<u32, InventoryRecord>>,
}

impl InMemoryInventoryManager {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_records(records: impl IntoIterator<Item = InventoryRecord>) -> Self {
        let manager = Self::new();
        {
            let mut map = manager.records.lock().unwrap();
            for record in records {
                map.insert(record.product_id, record);
            }
        }
        manager
    }
}

impl Default for InMemoryInventoryManager {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl InventoryManager for InMemoryInventoryManager {
    async fn lookup(&self, product_id: u32) -> Option<InventoryRecord> {
        let records = self.records.lock().unwrap();
        let record = records.get(&product_id).cloned();
        debug!(product_id, found = record.is_some(), "Inventory lookup");
        record
    }

    async fn record_purchase(&self, product_id: u32, quantity: u32) -> Option<InventoryRecord> {
        let mut records = self.records.lock().unwrap();
        let record = records.get_mut(&product_id)?;
        if record.quantity < quantity {
            warn!(
                product_id,
                requested = quantity,
                available = record.quantity,
                "Purchase exceeds stock"
            );
            return None;
        }
        record.quantity -= quantity;
        debug!(product_id, quantity, remaining = record.quantity, "Purchase recorded");
        Some(record.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn widgets(quantity: u32) -> InventoryRecord {
        InventoryRecord {
            product_id: 1,
            quantity,
            product_name: "Widget".into(),
            product_category: "Tools".into(),
        }
    }

    #[tokio::test]
    async fn lookup_reports_absent_for_unknown_products() {
        let manager = InMemoryInventoryManager::new();
        assert!(manager.lookup(42).await.is_none());
    }

    #[tokio::test]
    async fn purchase_decrements_stock() {
        let manager = InMemoryInventoryManager::with_records([widgets(10)]);

        let updated = manager.record_purchase(1, 3).await.unwrap();
        assert_eq!(updated.quantity, 7);

        let looked_up = manager.lookup(1).await.unwrap();
        assert_eq!(looked_up.quantity, 7);
    }

    #[tokio::test]
    async fn purchase_beyond_stock_reports_absent_and_changes_nothing() {
        let manager = InMemoryInventoryManager::with_records([widgets(2)]);

        assert!(manager.record_purchase(1, 5).await.is_none());
        assert_eq!(manager.lookup(1).await.unwrap().quantity, 2);
    }
}
