pub mod in_memory;

use anyhow::Result;
use async_trait::async_trait;

use crate::types::inventory_item::InventoryItem;
use crate::types::product::ProductId;

#[async_trait]
pub trait Inventory: Send + Sync {
    async fn find_by_product_id(&self, product_id: &ProductId) -> Result<Option<InventoryItem>>;

    async fn save(&self, item: InventoryItem) -> Result<InventoryItem>;
}
