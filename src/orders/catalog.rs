//! Point-in-time catalog snapshot used while composing orders

use crate::core::error::OrderError;
use crate::core::model::{Item, ItemId, ItemScope};
use crate::core::CatalogRepository;

/// All catalog items read once at the start of an operation
///
/// Stock figures are only as fresh as the read; nothing is reserved.
#[derive(Debug, Clone, Default)]
pub struct CatalogSnapshot {
    items: Vec<Item>,
}

impl CatalogSnapshot {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// Read the whole catalog in one call
    pub async fn load(
        catalog: &dyn CatalogRepository,
        scope: ItemScope,
    ) -> Result<Self, OrderError> {
        Ok(Self::new(catalog.list_items(scope).await?))
    }

    pub fn find(&self, id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.item_id == id)
    }

    /// Like [`find`](Self::find), but a miss is a lookup failure
    pub fn require(&self, id: ItemId) -> Result<&Item, OrderError> {
        self.find(id).ok_or_else(|| OrderError::not_found_item(id))
    }

    /// True when some item with this id has at least `quantity` in stock
    pub fn can_fulfil(&self, id: ItemId, quantity: u32) -> bool {
        self.items
            .iter()
            .any(|item| item.quantity_available >= quantity && item.item_id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
