//! In-memory implementation of the order and catalog repositories

use crate::config::DeskConfig;
use crate::core::model::{
    Inserted, Item, ItemId, ItemScope, LineItem, LineItemId, NewOrder, Order, OrderId,
    OrderStatus,
};
use crate::core::{CatalogRepository, OrderRepository};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory storage for items, orders and line items
///
/// Line items live in their own table keyed by id and point back at their
/// order, so cascades are observable. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

#[derive(Default)]
struct Tables {
    items: BTreeMap<ItemId, Item>,
    orders: BTreeMap<OrderId, OrderRow>,
    line_items: BTreeMap<LineItemId, LineItemRow>,

    /// Line item ids of each order, ascending
    order_lines: BTreeMap<OrderId, Vec<LineItemId>>,

    last_order_id: OrderId,
    last_line_item_id: LineItemId,
}

struct OrderRow {
    customer_name: String,
    order_date: DateTime<Utc>,
    status: OrderStatus,
}

struct LineItemRow {
    item_id: ItemId,
    quantity: u32,
}

impl Tables {
    fn hydrate(&self, order_id: OrderId, row: &OrderRow) -> Order {
        let line_items = self
            .order_lines
            .get(&order_id)
            .into_iter()
            .flatten()
            .filter_map(|line_item_id| {
                self.line_items.get(line_item_id).map(|line| LineItem {
                    line_item_id: *line_item_id,
                    item_id: line.item_id,
                    quantity: line.quantity,
                    item: self.items.get(&line.item_id).cloned(),
                })
            })
            .collect();

        Order {
            order_id,
            customer_name: row.customer_name.clone(),
            order_date: row.order_date,
            status: row.status,
            line_items,
        }
    }

    /// Every line must point at an existing item, like a foreign key
    fn check_references(&self, line_items: &[LineItem]) -> Result<()> {
        match line_items
            .iter()
            .find(|line| !self.items.contains_key(&line.item_id))
        {
            Some(line) => Err(anyhow!(
                "FOREIGN KEY constraint failed: item {} does not exist",
                line.item_id
            )),
            None => Ok(()),
        }
    }

    /// Insert line rows for `order_id`; returns the ids written
    fn insert_lines(&mut self, order_id: OrderId, line_items: &[LineItem]) -> Vec<LineItemId> {
        let mut ids = Vec::with_capacity(line_items.len());
        for line in line_items {
            self.last_line_item_id += 1;
            self.line_items.insert(
                self.last_line_item_id,
                LineItemRow {
                    item_id: line.item_id,
                    quantity: line.quantity,
                },
            );
            ids.push(self.last_line_item_id);
        }
        self.order_lines
            .entry(order_id)
            .or_default()
            .extend(ids.iter().copied());
        ids
    }

    /// Remove all line rows of `order_id`; returns the number removed
    fn remove_lines(&mut self, order_id: OrderId) -> usize {
        let ids = self.order_lines.remove(&order_id).unwrap_or_default();
        for id in &ids {
            self.line_items.remove(id);
        }
        ids.len()
    }
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with catalog items
    pub fn with_items(items: impl IntoIterator<Item = Item>) -> Self {
        let tables = Tables {
            items: items.into_iter().map(|item| (item.item_id, item)).collect(),
            ..Tables::default()
        };
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }

    /// Create a store seeded with the configured catalog
    pub fn from_config(config: &DeskConfig) -> Self {
        Self::with_items(config.catalog.iter().cloned())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))
    }

    /// Add or replace a catalog item
    ///
    /// Stands in for the inventory processes that own the catalog.
    pub fn put_item(&self, item: Item) -> Result<()> {
        self.write()?.items.insert(item.item_id, item);
        Ok(())
    }

    /// Remove a catalog item, leaving line items that reference it dangling
    pub fn remove_item(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.write()?.items.remove(&id))
    }

    /// Total number of stored line items across all orders
    pub fn line_item_count(&self) -> Result<usize> {
        Ok(self.read()?.line_items.len())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        let tables = self.read()?;

        Ok(tables
            .orders
            .iter()
            .map(|(order_id, row)| tables.hydrate(*order_id, row))
            .collect())
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        let tables = self.read()?;

        Ok(tables.orders.get(&id).map(|row| tables.hydrate(id, row)))
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Inserted> {
        let mut tables = self.write()?;

        tables
            .check_references(&order.line_items)
            .context("Failed to save order")?;

        tables.last_order_id += 1;
        let order_id = tables.last_order_id;
        tables.orders.insert(
            order_id,
            OrderRow {
                customer_name: order.customer_name,
                order_date: order.order_date,
                status: order.status,
            },
        );
        let line_item_ids = tables.insert_lines(order_id, &order.line_items);

        Ok(Inserted {
            order_id,
            rows_affected: 1 + line_item_ids.len(),
            line_item_ids,
        })
    }

    async fn update_order(&self, order: &Order) -> Result<usize> {
        let mut tables = self.write()?;

        if !tables.orders.contains_key(&order.order_id) {
            return Ok(0);
        }

        tables
            .check_references(&order.line_items)
            .with_context(|| format!("Failed to update order {}", order.order_id))?;

        if let Some(row) = tables.orders.get_mut(&order.order_id) {
            row.customer_name = order.customer_name.clone();
            row.order_date = order.order_date;
            row.status = order.status;
        }
        let removed = tables.remove_lines(order.order_id);
        let added = tables.insert_lines(order.order_id, &order.line_items).len();

        Ok(1 + removed + added)
    }

    async fn delete_order(&self, id: OrderId) -> Result<usize> {
        let mut tables = self.write()?;

        if tables.orders.remove(&id).is_none() {
            return Ok(0);
        }

        Ok(1 + tables.remove_lines(id))
    }
}

#[async_trait]
impl CatalogRepository for InMemoryStore {
    async fn list_items(&self, scope: ItemScope) -> Result<Vec<Item>> {
        let tables = self.read()?;

        Ok(tables
            .items
            .values()
            .filter(|item| scope.admits(item))
            .cloned()
            .collect())
    }

    async fn get_item(&self, id: ItemId, scope: ItemScope) -> Result<Option<Item>> {
        let tables = self.read()?;

        Ok(tables.items.get(&id).filter(|item| scope.admits(item)).cloned())
    }
}
