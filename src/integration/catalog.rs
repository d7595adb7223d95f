use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cursor::{AdvancePolicy, CursorStore};
use crate::feed::resources::{EventResource, ProductAdded};
use crate::feed::{EventFeed, PRODUCTS_ADDED};
use crate::integration::advanced_timestamp;
use crate::inventory::Inventory;
use crate::types::inventory_item::InventoryItem;
use crate::types::product::ProductId;

/// Polls the catalog feed and makes sure every product it announces has an
/// inventory record. Scheduling lives with the caller; one call is one tick.
pub struct CatalogIntegration {
    feed: Arc<dyn EventFeed>,
    inventory: Arc<dyn Inventory>,
    cursors: Arc<dyn CursorStore>,
    policy: AdvancePolicy,
}

impl CatalogIntegration {
    pub fn new(
        feed: Arc<dyn EventFeed>,
        inventory: Arc<dyn Inventory>,
        cursors: Arc<dyn CursorStore>,
        policy: AdvancePolicy,
    ) -> Self {
        Self {
            feed,
            inventory,
            cursors,
            policy,
        }
    }

    /// Runs one polling tick and returns how many events it worked through.
    /// Any error aborts the tick; the next interval retries from the cursor.
    pub async fn run_once(&self) -> Result<usize> {
        let since = self
            .cursors
            .load(PRODUCTS_ADDED)
            .await?
            .and_then(|cursor| cursor.last_update);

        let page = self.feed.fetch_product_added(since).await?;

        if page.is_empty() {
            debug!("no new product-added events");
            return Ok(0);
        }

        info!(events = page.len(), "processing new product-added events");

        for resource in &page {
            self.process(resource).await?;
        }

        Ok(page.len())
    }

    async fn process(&self, resource: &EventResource<ProductAdded>) -> Result<()> {
        let product_id = self.init_inventory(resource).await?;

        let cursor = self
            .cursors
            .apply_or_create(PRODUCTS_ADDED, resource.content.publication_date, self.policy)
            .await?;

        let reference_time = advanced_timestamp(&cursor)?;

        info!(
            product_id = %product_id,
            reference_time = %reference_time.format("%Y-%m-%dT%H:%M:%S"),
            "catalog update applied"
        );

        Ok(())
    }

    /// Ensures an item exists for the event's product and stamps it with the
    /// event's publication time. Quantity is untouched for known products.
    async fn init_inventory(&self, resource: &EventResource<ProductAdded>) -> Result<ProductId> {
        let href = resource
            .link("product")
            .context("product-added event carries no \"product\" link")?;

        let product_id = ProductId::from_href(href)?;

        let item = match self.inventory.find_by_product_id(&product_id).await? {
            Some(existing) => existing,
            None => {
                info!(
                    product = %resource.content.product.description,
                    "creating inventory item for new product"
                );

                InventoryItem::new(product_id.clone())
            }
        };

        self.inventory
            .save(item.with_last_update(resource.content.publication_date))
            .await?;

        Ok(product_id)
    }
}
