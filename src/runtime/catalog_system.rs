use std::sync::Arc;
use tracing::{error, info};

use crate::endpoint::{InventoryEndpoint, ProductEndpoint, ReviewEndpoint};
use crate::inventory::InventoryManager;
use crate::{product_store, review_store};

/// The runtime orchestrator for the versioned catalog.
///
/// `CatalogSystem` is responsible for:
/// - **Lifecycle Management**: Starting and stopping the store actors
/// - **Dependency Wiring**: Connecting endpoints to their store clients
///   and injecting the inventory-manager handle
///
/// # Architecture
///
/// Two store actors run, one per versioned resource type:
/// - **Product store**: integer-keyed products with stock quantities
/// - **Review store**: one review document per product, appended to under
///   contention
///
/// The inventory manager is not an actor of ours at all: it is an
/// external collaborator whose handle the caller owns and passes in.
///
/// # Example
///
/// ```ignore
/// let system = CatalogSystem::new(Arc::new(InMemoryInventoryManager::new()));
///
/// let created = system.products.create(ProductCreate { name: "Widget".into(), quantity: 10 }).await?;
/// let tag = created.etag.unwrap();
/// system.products.update(created.body.id, &tag, update).await?;
///
/// system.shutdown().await?;
/// ```
pub struct CatalogSystem {
    /// Boundary handle for product requests
    pub products: ProductEndpoint,

    /// Boundary handle for review requests
    pub reviews: ReviewEndpoint,

    /// Boundary handle for inventory pass-through requests
    pub inventory: InventoryEndpoint,

    /// Task handles for the running store actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    /// Creates and initializes a new `CatalogSystem` with both store
    /// actors running.
    ///
    /// The inventory manager handle is injected rather than constructed
    /// here; production wiring and tests pass different implementations of
    /// the same trait.
    pub fn new(inventory_manager: Arc<dyn InventoryManager>) -> Self {
        // Product store actor and its endpoint.
        let (product_actor, product_client) = product_store::new();
        let product_handle = tokio::spawn(product_actor.run());
        let products = ProductEndpoint::new(product_client);

        // Review store actor and its endpoint (the endpoint builds the
        // append aggregator around the client).
        let (review_actor, review_client) = review_store::new();
        let review_handle = tokio::spawn(review_actor.run());
        let reviews = ReviewEndpoint::new(review_client);

        let inventory = InventoryEndpoint::new(inventory_manager);

        Self {
            products,
            reviews,
            inventory,
            handles: vec![product_handle, review_handle],
        }
    }

    /// Gracefully shuts down the system.
    ///
    /// Dropping the endpoints closes the store channels; each actor
    /// detects the closed channel and exits its loop. The method then
    /// waits for the actor tasks and reports any panic.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.products);
        drop(self.reviews);
        drop(self.inventory);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
