use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use tokio::sync::RwLock;

use crate::cursor::{AdvancePolicy, CursorStore, IntegrationCursor};

/// Stand-in for the real cursor store, one record per event stream.
#[derive(Debug, Default)]
pub struct InMemoryCursorStore {
    cursors: RwLock<HashMap<String, IntegrationCursor>>,
}

#[async_trait]
impl CursorStore for InMemoryCursorStore {
    async fn load(&self, event_type: &str) -> Result<Option<IntegrationCursor>> {
        Ok(self.cursors.read().await.get(event_type).cloned())
    }

    async fn apply_or_create(
        &self,
        event_type: &str,
        publication: NaiveDateTime,
        policy: AdvancePolicy,
    ) -> Result<IntegrationCursor> {
        let mut cursors = self.cursors.write().await;

        let cursor = cursors
            .entry(event_type.to_string())
            .or_insert_with(|| IntegrationCursor::new(event_type));

        cursor.last_update = match (policy, cursor.last_update) {
            (AdvancePolicy::Monotonic, Some(current)) if current > publication => Some(current),
            _ => Some(publication),
        };

        Ok(cursor.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn creates_cursor_on_first_advance() {
        let store = InMemoryCursorStore::default();

        let cursor = store
            .apply_or_create("PRODUCTS_ADDED", at("2024-01-01T00:00:00"), AdvancePolicy::LastProcessed)
            .await
            .unwrap();

        assert_eq!(cursor.event_type, "PRODUCTS_ADDED");
        assert_eq!(cursor.last_update, Some(at("2024-01-01T00:00:00")));
    }

    #[tokio::test]
    async fn last_processed_lets_the_cursor_regress() {
        let store = InMemoryCursorStore::default();

        store
            .apply_or_create("PRODUCTS_ADDED", at("2024-02-01T00:00:00"), AdvancePolicy::LastProcessed)
            .await
            .unwrap();
        let cursor = store
            .apply_or_create("PRODUCTS_ADDED", at("2024-01-01T00:00:00"), AdvancePolicy::LastProcessed)
            .await
            .unwrap();

        assert_eq!(cursor.last_update, Some(at("2024-01-01T00:00:00")));
    }

    #[tokio::test]
    async fn monotonic_keeps_the_newer_timestamp() {
        let store = InMemoryCursorStore::default();

        store
            .apply_or_create("PRODUCTS_ADDED", at("2024-02-01T00:00:00"), AdvancePolicy::Monotonic)
            .await
            .unwrap();
        let cursor = store
            .apply_or_create("PRODUCTS_ADDED", at("2024-01-01T00:00:00"), AdvancePolicy::Monotonic)
            .await
            .unwrap();

        assert_eq!(cursor.last_update, Some(at("2024-02-01T00:00:00")));
    }

    #[tokio::test]
    async fn streams_keep_independent_cursors() {
        let store = InMemoryCursorStore::default();

        store
            .apply_or_create("PRODUCTS_ADDED", at("2024-01-01T00:00:00"), AdvancePolicy::LastProcessed)
            .await
            .unwrap();

        assert_eq!(store.load("ORDER_COMPLETED").await.unwrap(), None);
    }
}
