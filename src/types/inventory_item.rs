use chrono::NaiveDateTime;

use crate::types::product::ProductId;

/// Inventory record for one product. Exactly one exists per product id;
/// this service creates it on first sighting and never deletes it.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryItem {
    product_id: ProductId,
    /// Units on hand. New products start at zero until stock arrives.
    quantity: i64,
    /// Publication time of the most recent event processed for this product.
    last_update: Option<NaiveDateTime>,
}

impl InventoryItem {
    pub fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 0,
            last_update: None,
        }
    }

    pub fn with_last_update(mut self, at: NaiveDateTime) -> Self {
        self.last_update = Some(at);
        self
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn last_update(&self) -> Option<NaiveDateTime> {
        self.last_update
    }
}
