use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::inventory::Inventory;
use crate::types::inventory_item::InventoryItem;
use crate::types::product::ProductId;

/// Stand-in for the real inventory store, keyed by product id.
#[derive(Debug, Default)]
pub struct InMemoryInventory {
    items: RwLock<HashMap<ProductId, InventoryItem>>,
}

impl InMemoryInventory {
    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}

#[async_trait]
impl Inventory for InMemoryInventory {
    async fn find_by_product_id(&self, product_id: &ProductId) -> Result<Option<InventoryItem>> {
        Ok(self.items.read().await.get(product_id).cloned())
    }

    async fn save(&self, item: InventoryItem) -> Result<InventoryItem> {
        self.items
            .write()
            .await
            .insert(item.product_id().clone(), item.clone());

        Ok(item)
    }
}
