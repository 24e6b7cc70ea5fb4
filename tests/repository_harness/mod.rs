//! Shared test harness for order engine and repository testing
//!
//! Provides a fixed catalog, helpers to build desks and seed orders, and
//! `FlakyOrders`, an `OrderRepository` whose writes fail on demand.
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod repository_harness;
//! use repository_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
pub mod order_repository_tests;

use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use chrono::Utc;
use order_desk::prelude::*;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Catalog fixtures
// ---------------------------------------------------------------------------

pub const WIDGET: ItemId = 1;
pub const GADGET: ItemId = 2;
pub const GIZMO: ItemId = 3;
pub const RETIRED: ItemId = 4;

/// The catalog every test starts from
///
/// - Widget: 5 in stock at 10.00
/// - Gadget: 2 in stock at 2.50
/// - Gizmo: 100 in stock at 1.00
/// - Retired: inactive, 10 in stock at 7.00
pub fn catalog() -> Vec<Item> {
    vec![
        Item::new(WIDGET, "Widget", 5, Decimal::new(1000, 2)),
        Item::new(GADGET, "Gadget", 2, Decimal::new(250, 2)),
        Item::new(GIZMO, "Gizmo", 100, Decimal::new(100, 2)),
        Item::new(RETIRED, "Retired", 10, Decimal::new(700, 2)).deactivated(),
    ]
}

pub fn catalog_item(id: ItemId) -> Item {
    catalog()
        .into_iter()
        .find(|item| item.item_id == id)
        .expect("fixture item")
}

// ---------------------------------------------------------------------------
// Desk and store helpers
// ---------------------------------------------------------------------------

/// In-memory store seeded with [`catalog`]
pub fn seeded_store() -> InMemoryStore {
    InMemoryStore::with_items(catalog())
}

/// A desk over a single in-memory store acting as both collaborators
pub fn desk_over(store: &InMemoryStore) -> OrderDesk {
    OrderDesk::new(Arc::new(store.clone()), Arc::new(store.clone()))
}

/// A pending order with the given `(item, quantity)` lines
pub fn new_order(customer_name: &str, lines: &[(ItemId, u32)]) -> NewOrder {
    let line_items = lines
        .iter()
        .map(|(item_id, quantity)| LineItem::new(catalog_item(*item_id), *quantity))
        .collect();
    NewOrder::new(customer_name, Utc::now(), line_items)
}

/// Insert orders directly through the repository; returns their ids
pub async fn seed_orders<R: OrderRepository>(repo: &R, orders: Vec<NewOrder>) -> Vec<OrderId> {
    let mut ids = Vec::new();
    for order in orders {
        ids.push(repo.insert_order(order).await.unwrap().order_id);
    }
    ids
}

pub fn order_ids(orders: &[Order]) -> Vec<OrderId> {
    orders.iter().map(|order| order.order_id).collect()
}

// ---------------------------------------------------------------------------
// FlakyOrders: an order repository with failing writes
// ---------------------------------------------------------------------------

/// How `FlakyOrders` treats writes
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum WriteMode {
    /// Every write returns an error with a wrapped inner cause
    Fail,
    /// Every write succeeds but reports zero rows affected
    NoRows,
}

pub const INNER_CAUSE: &str = "Cannot insert duplicate key row in object 'dbo.Orders'";
pub const OUTER_MESSAGE: &str = "An error occurred while saving the entity changes";

/// Delegates reads to an `InMemoryStore`; writes fail according to `mode`
#[derive(Clone)]
pub struct FlakyOrders {
    pub store: InMemoryStore,
    pub mode: WriteMode,
}

impl FlakyOrders {
    pub fn new(store: InMemoryStore, mode: WriteMode) -> Self {
        Self { store, mode }
    }

    fn write_error<T>(&self) -> Result<T> {
        Err(anyhow!(INNER_CAUSE)).context(OUTER_MESSAGE)
    }

    /// A desk whose order writes go through this repository
    pub fn desk(&self) -> OrderDesk {
        OrderDesk::new(Arc::new(self.clone()), Arc::new(self.store.clone()))
    }
}

#[async_trait]
impl OrderRepository for FlakyOrders {
    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.store.list_orders().await
    }

    async fn get_order(&self, id: OrderId) -> Result<Option<Order>> {
        self.store.get_order(id).await
    }

    async fn insert_order(&self, _order: NewOrder) -> Result<Inserted> {
        match self.mode {
            WriteMode::Fail => self.write_error(),
            WriteMode::NoRows => Ok(Inserted {
                order_id: 0,
                line_item_ids: Vec::new(),
                rows_affected: 0,
            }),
        }
    }

    async fn update_order(&self, _order: &Order) -> Result<usize> {
        match self.mode {
            WriteMode::Fail => self.write_error(),
            WriteMode::NoRows => Ok(0),
        }
    }

    async fn delete_order(&self, _id: OrderId) -> Result<usize> {
        match self.mode {
            WriteMode::Fail => self.write_error(),
            WriteMode::NoRows => Ok(0),
        }
    }
}
