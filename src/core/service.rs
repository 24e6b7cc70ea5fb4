//! Persistence contracts consumed by the order engines

use crate::core::model::{Inserted, Item, ItemId, ItemScope, NewOrder, Order, OrderId};
use anyhow::Result;
use async_trait::async_trait;

/// Storage for orders and their line items
///
/// Implementations return orders with line items and their catalog items
/// eagerly resolved. The engines never push filters down to storage.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// List all orders, line items resolved
    async fn list_orders(&self) -> Result<Vec<Order>>;

    /// Get one order by ID, line items resolved
    async fn get_order(&self, id: OrderId) -> Result<Option<Order>>;

    /// Insert an order together with its line items
    ///
    /// Returns the generated order id and the number of rows written.
    async fn insert_order(&self, order: NewOrder) -> Result<Inserted>;

    /// Overwrite an order's fields and replace its line items wholesale
    ///
    /// Returns the number of rows written; 0 when the order does not exist.
    async fn update_order(&self, order: &Order) -> Result<usize>;

    /// Delete an order and, by cascade, all its line items
    ///
    /// Returns the number of rows removed; 0 when the order does not exist.
    async fn delete_order(&self, id: OrderId) -> Result<usize>;
}

/// Read-only access to the item catalog
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// List items visible in `scope`
    async fn list_items(&self, scope: ItemScope) -> Result<Vec<Item>>;

    /// Get an item by ID if it is visible in `scope`
    async fn get_item(&self, id: ItemId, scope: ItemScope) -> Result<Option<Item>>;
}
