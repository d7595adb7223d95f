pub mod hal_feed;
pub mod resources;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::feed::resources::{EventResource, OrderCompleted, ProductAdded};

/// Stream token for catalog "product added" events.
pub const PRODUCTS_ADDED: &str = "PRODUCTS_ADDED";

/// Stream token for orders "order completed" events.
pub const ORDER_COMPLETED: &str = "ORDER_COMPLETED";

/// Typed access to the upstream event feeds. Implementations own the
/// hypermedia traversal; callers only see decoded pages, newest last.
#[async_trait]
pub trait EventFeed: Send + Sync {
    async fn fetch_product_added(
        &self,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<EventResource<ProductAdded>>>;

    async fn fetch_order_completed(
        &self,
        since: Option<NaiveDateTime>,
    ) -> Result<Vec<EventResource<OrderCompleted>>>;
}
