use serde::{Deserialize, Serialize};

use crate::store::occ::Version;

/// Represents a product in the catalog.
///
/// # Store Framework
/// This struct implements the [`StoreEntity`](crate::store::StoreEntity)
/// trait, allowing it to be managed by a
/// [`StoreActor`](crate::store::StoreActor).
///
/// The `version` field is owned by the store: it is stamped 1 at creation
/// and advanced by the store on every applied update. Callers present the
/// version they last observed when asking for a change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub quantity: u32,
    pub version: Version,
}

impl Product {
    /// Creates a new Product instance.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (assigned by the store)
    /// * `name` - Product name
    /// * `quantity` - Available stock quantity
    pub fn new(id: u32, name: impl Into<String>, quantity: u32) -> Self {
        Self {
            id,
            name: name.into(),
            quantity,
            version: Version::initial(),
        }
    }

    /// Applies an update payload. Only the supplied fields change; id and
    /// version are untouched here (the store advances the version).
    pub fn apply(&mut self, update: ProductUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(quantity) = update.quantity {
            self.quantity = quantity;
        }
    }
}

/// Payload for creating a new product. Carries no id or version; both are
/// assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    pub name: String,
    pub quantity: u32,
}

/// Payload for updating an existing product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub quantity: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_changes_only_supplied_fields() {
        let mut product = Product::new(1, "Widget", 10);

        product.apply(ProductUpdate {
            name: None,
            quantity: Some(15),
        });
        assert_eq!(product.name, "Widget");
        assert_eq!(product.quantity, 15);
        assert_eq!(product.id, 1);
        assert_eq!(product.version, Version::initial());

        product.apply(ProductUpdate {
            name: Some("Gadget".into()),
            quantity: None,
        });
        assert_eq!(product.name, "Gadget");
        assert_eq!(product.quantity, 15);
    }
}
