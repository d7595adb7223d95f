use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use crate::cursor::{AdvancePolicy, CursorStore};
use crate::feed::{EventFeed, ORDER_COMPLETED};
use crate::integration::advanced_timestamp;

/// Polls the orders feed and records how far order-completion events have
/// been seen. Inventory itself is untouched here.
pub struct OrdersIntegration {
    feed: Arc<dyn EventFeed>,
    cursors: Arc<dyn CursorStore>,
    policy: AdvancePolicy,
}

impl OrdersIntegration {
    pub fn new(feed: Arc<dyn EventFeed>, cursors: Arc<dyn CursorStore>, policy: AdvancePolicy) -> Self {
        Self {
            feed,
            cursors,
            policy,
        }
    }

    pub async fn run_once(&self) -> Result<usize> {
        let since = self
            .cursors
            .load(ORDER_COMPLETED)
            .await?
            .and_then(|cursor| cursor.last_update);

        let page = self.feed.fetch_order_completed(since).await?;

        if page.is_empty() {
            debug!("no new order-completed events");
            return Ok(0);
        }

        info!(events = page.len(), "processing new order-completed events");

        for resource in &page {
            let order = resource.link("order").unwrap_or("<unlinked>");

            let cursor = self
                .cursors
                .apply_or_create(ORDER_COMPLETED, resource.content.publication_date, self.policy)
                .await?;

            let reference_time = advanced_timestamp(&cursor)?;

            info!(
                order = %order,
                reference_time = %reference_time.format("%Y-%m-%dT%H:%M:%S"),
                "order completion recorded"
            );
        }

        Ok(page.len())
    }
}

#[cfg(test)]
mod tests {
    use anyhow::Result;
    use async_trait::async_trait;
    use chrono::NaiveDateTime;
    use serde_json::json;

    use super::*;
    use crate::cursor::in_memory::InMemoryCursorStore;
    use crate::feed::PRODUCTS_ADDED;
    use crate::feed::resources::{EventResource, OrderCompleted, ProductAdded};

    struct FixedFeed {
        page: Vec<EventResource<OrderCompleted>>,
    }

    #[async_trait]
    impl EventFeed for FixedFeed {
        async fn fetch_product_added(
            &self,
            _since: Option<NaiveDateTime>,
        ) -> Result<Vec<EventResource<ProductAdded>>> {
            Ok(Vec::new())
        }

        async fn fetch_order_completed(
            &self,
            _since: Option<NaiveDateTime>,
        ) -> Result<Vec<EventResource<OrderCompleted>>> {
            Ok(self.page.clone())
        }
    }

    fn order_completed(href: &str, published: &str) -> EventResource<OrderCompleted> {
        serde_json::from_value(json!({
            "publicationDate": published,
            "_links": { "order": { "href": href } }
        }))
        .unwrap()
    }

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn advances_only_the_orders_cursor() {
        let cursors = Arc::new(InMemoryCursorStore::default());
        let integration = OrdersIntegration::new(
            Arc::new(FixedFeed {
                page: vec![order_completed("/orders/7", "2024-03-01T12:00:00")],
            }),
            cursors.clone(),
            AdvancePolicy::LastProcessed,
        );

        let processed = integration.run_once().await.unwrap();

        assert_eq!(processed, 1);

        let cursor = cursors.load(ORDER_COMPLETED).await.unwrap().unwrap();

        assert_eq!(cursor.last_update, Some(at("2024-03-01T12:00:00")));
        assert_eq!(cursors.load(PRODUCTS_ADDED).await.unwrap(), None);
    }

    #[tokio::test]
    async fn empty_page_is_a_no_op() {
        let cursors = Arc::new(InMemoryCursorStore::default());
        let integration = OrdersIntegration::new(
            Arc::new(FixedFeed { page: Vec::new() }),
            cursors.clone(),
            AdvancePolicy::LastProcessed,
        );

        assert_eq!(integration.run_once().await.unwrap(), 0);
        assert_eq!(cursors.load(ORDER_COMPLETED).await.unwrap(), None);
    }
}
