//! Domain model: catalog items, orders and their line items

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type ItemId = i64;
pub type OrderId = i64;
pub type LineItemId = i64;

/// A catalog entry with its current stock and unit price
///
/// Items are owned by the catalog collaborator. The engines only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: ItemId,
    pub product_name: String,
    pub quantity_available: u32,
    pub price: Decimal,

    /// Inactive items are hidden from the item picker but still resolve
    /// for existing line items.
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Item {
    /// Create an active catalog item
    pub fn new(
        item_id: ItemId,
        product_name: impl Into<String>,
        quantity_available: u32,
        price: Decimal,
    ) -> Self {
        Self {
            item_id,
            product_name: product_name.into(),
            quantity_available,
            price,
            is_active: true,
        }
    }

    /// Same item, flagged inactive
    pub fn deactivated(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Which part of the catalog a query should see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ItemScope {
    #[default]
    All,
    ActiveOnly,
}

impl ItemScope {
    pub fn admits(&self, item: &Item) -> bool {
        match self {
            ItemScope::All => true,
            ItemScope::ActiveOnly => item.is_active,
        }
    }
}

/// A quantity of one catalog item inside an order
///
/// The line item holds the item by reference (`item_id`). `item` is the
/// catalog entry resolved when the order was read and is `None` when the
/// reference no longer resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// Assigned by persistence; 0 until stored
    pub line_item_id: LineItemId,
    pub item_id: ItemId,
    pub quantity: u32,
    pub item: Option<Item>,
}

impl LineItem {
    /// Build an unsaved line item pointing at a resolved catalog item
    pub fn new(item: Item, quantity: u32) -> Self {
        Self {
            line_item_id: 0,
            item_id: item.item_id,
            quantity,
            item: Some(item),
        }
    }

    /// Price of this line at the current catalog price, if the item resolves
    pub fn line_total(&self) -> Option<Decimal> {
        self.item
            .as_ref()
            .map(|item| item.price * Decimal::from(self.quantity))
    }

    pub fn product_name(&self) -> Option<&str> {
        self.item.as_ref().map(|item| item.product_name.as_str())
    }
}

/// Stored order status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    Pending,
    Shipped,
    Cancelled,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "Pending"),
            OrderStatus::Shipped => write!(f, "Shipped"),
            OrderStatus::Cancelled => write!(f, "Cancelled"),
        }
    }
}

/// Status filter used by listings; `All` is a wildcard and never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Shipped,
    Cancelled,
}

impl StatusFilter {
    pub fn matches(&self, status: OrderStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => status == OrderStatus::Pending,
            StatusFilter::Shipped => status == OrderStatus::Shipped,
            StatusFilter::Cancelled => status == OrderStatus::Cancelled,
        }
    }
}

impl From<OrderStatus> for StatusFilter {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => StatusFilter::Pending,
            OrderStatus::Shipped => StatusFilter::Shipped,
            OrderStatus::Cancelled => StatusFilter::Cancelled,
        }
    }
}

/// A customer order with its line items resolved against the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub line_items: Vec<LineItem>,
}

impl Order {
    /// Sum of price × quantity over all line items
    ///
    /// If any line item's catalog item cannot be resolved the whole total is
    /// zero, not the sum of the resolvable lines.
    pub fn total_amount(&self) -> Decimal {
        self.line_items
            .iter()
            .map(LineItem::line_total)
            .sum::<Option<Decimal>>()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn has_line_items(&self) -> bool {
        !self.line_items.is_empty()
    }
}

/// An order that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub line_items: Vec<LineItem>,
}

impl NewOrder {
    /// A pending order dated `order_date`
    pub fn new(
        customer_name: impl Into<String>,
        order_date: DateTime<Utc>,
        line_items: Vec<LineItem>,
    ) -> Self {
        Self {
            customer_name: customer_name.into(),
            order_date,
            status: OrderStatus::Pending,
            line_items,
        }
    }

    pub fn with_status(mut self, status: OrderStatus) -> Self {
        self.status = status;
        self
    }
}

/// Result of an insert: the generated ids and the number of rows written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inserted {
    pub order_id: OrderId,

    /// Ids given to the order's line items, in insertion order
    pub line_item_ids: Vec<LineItemId>,

    pub rows_affected: usize,
}
