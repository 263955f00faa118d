//! Inventory pass-through surface.
//!
//! Nothing here is versioned or concurrency-sensitive: the endpoint
//! forwards to the injected [`InventoryManager`] and wraps what comes
//! back. Manager failure and unknown product both read as absence.

use std::sync::Arc;
use tracing::{info, instrument};

use crate::endpoint::ResourceResponse;
use crate::inventory::{InventoryManager, InventoryRecord, PurchaseRecord};

/// Boundary-facing handle for inventory requests.
#[derive(Clone)]
pub struct InventoryEndpoint {
    manager: Arc<dyn InventoryManager>,
}

impl InventoryEndpoint {
    pub fn new(manager: Arc<dyn InventoryManager>) -> Self {
        Self { manager }
    }

    fn envelope(record: InventoryRecord) -> ResourceResponse<InventoryRecord> {
        let location = format!("/inventory/{}", record.product_id);
        ResourceResponse::unversioned(record, location)
    }

    /// Returns the inventory record for a product.
    #[instrument(skip(self))]
    pub async fn get(&self, product_id: u32) -> Option<ResourceResponse<InventoryRecord>> {
        self.manager.lookup(product_id).await.map(Self::envelope)
    }

    /// Records a purchase and returns the updated record.
    #[instrument(skip(self, purchase), fields(product_id = purchase.product_id))]
    pub async fn purchase(
        &self,
        purchase: PurchaseRecord,
    ) -> Option<ResourceResponse<InventoryRecord>> {
        info!(
            product_id = purchase.product_id,
            quantity = purchase.quantity_purchased,
            "Creating new purchase record"
        );
        self.manager
            .record_purchase(purchase.product_id, purchase.quantity_purchased)
            .await
            .map(Self::envelope)
    }
}
