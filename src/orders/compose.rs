//! Order composition: stock-checked creation of a new order

use crate::core::error::{OrderError, write_failure_message};
use crate::core::model::{ItemScope, LineItem, LineItemId, NewOrder, OrderId};
use crate::core::validation::validate;
use crate::orders::OrderDesk;
use crate::orders::catalog::CatalogSnapshot;
use crate::orders::request::OrderRequest;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{error, info, instrument, warn};

pub const UNFULFILLABLE_HEADER: &str = "We can not fulfill this order:";
pub const SAVE_FAILED_MESSAGE: &str = "Order failed to save";

/// Format used for order dates in user-facing messages
pub const ORDER_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Outcome of a create request
///
/// `order_id` and `order_date` are only set when the order was stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateOrderResponse {
    pub order_id: Option<OrderId>,
    pub order_date: Option<DateTime<Utc>>,
    pub customer_name: String,
    pub line_items: Vec<LineItem>,

    /// Product name → quantity in stock, for every line that could not be met
    pub unavailable: IndexMap<String, u32>,

    pub message: String,
}

impl CreateOrderResponse {
    fn empty(customer_name: &str) -> Self {
        Self {
            order_id: None,
            order_date: None,
            customer_name: customer_name.to_string(),
            line_items: Vec::new(),
            unavailable: IndexMap::new(),
            message: String::new(),
        }
    }

    pub fn is_created(&self) -> bool {
        self.order_id.is_some()
    }
}

/// Line items built from a request, or the reasons they could not be
#[derive(Debug, Clone, PartialEq)]
pub enum Composition {
    Ready(Vec<LineItem>),
    Unavailable(IndexMap<String, u32>),
}

/// Check every positive line against the snapshot and build line items
///
/// Shortfalls are keyed by product name, so two short items sharing a name
/// keep only the later stock figure. An unknown item id is a lookup failure.
pub fn compose_lines(
    snapshot: &CatalogSnapshot,
    request: &OrderRequest,
) -> Result<Composition, OrderError> {
    let mut line_items = Vec::new();
    let mut unavailable = IndexMap::new();

    for (item_id, quantity) in request.positive_lines() {
        let item = snapshot.require(item_id)?;
        if snapshot.can_fulfil(item_id, quantity) {
            line_items.push(LineItem::new(item.clone(), quantity));
        } else {
            unavailable.insert(item.product_name.clone(), item.quantity_available);
        }
    }

    if unavailable.is_empty() {
        Ok(Composition::Ready(line_items))
    } else {
        Ok(Composition::Unavailable(unavailable))
    }
}

/// User-facing explanation of a stock shortfall
pub fn unavailable_message(unavailable: &IndexMap<String, u32>) -> String {
    let lines = unavailable
        .iter()
        .map(|(product_name, in_stock)| format!("{} - Only {} in stock", product_name, in_stock))
        .collect::<Vec<_>>();

    format!("{}\n{}", UNFULFILLABLE_HEADER, lines.join("\n"))
}

/// Copy persisted ids onto freshly built line items, in insertion order
pub fn with_line_ids(mut line_items: Vec<LineItem>, ids: &[LineItemId]) -> Vec<LineItem> {
    for (line, id) in line_items.iter_mut().zip(ids) {
        line.line_item_id = *id;
    }
    line_items
}

pub fn created_message(order_id: OrderId, order_date: &DateTime<Utc>) -> String {
    format!(
        "Order {} Created on {}",
        order_id,
        order_date.format(ORDER_DATE_FORMAT)
    )
}

impl OrderDesk {
    /// Compose and store a new order
    ///
    /// The catalog is read once. If any line asks for more than is in stock
    /// nothing is written and the response explains which items fell short.
    /// A failed write is logged and reported through the response message.
    #[instrument(skip(self, request), fields(customer = %request.customer_name))]
    pub async fn create_order(
        &self,
        request: &OrderRequest,
    ) -> Result<CreateOrderResponse, OrderError> {
        validate(request)?;

        let snapshot = CatalogSnapshot::load(self.catalog.as_ref(), ItemScope::All).await?;
        let mut response = CreateOrderResponse::empty(&request.customer_name);

        let line_items = match compose_lines(&snapshot, request)? {
            Composition::Ready(line_items) => line_items,
            Composition::Unavailable(unavailable) => {
                warn!(
                    short_items = unavailable.len(),
                    "Order rejected for insufficient stock"
                );
                response.message = unavailable_message(&unavailable);
                response.unavailable = unavailable;
                return Ok(response);
            }
        };

        let order_date = Utc::now();
        let new_order = NewOrder::new(&request.customer_name, order_date, line_items.clone());

        match self.orders.insert_order(new_order).await {
            Ok(inserted) if inserted.rows_affected > 0 => {
                info!(order_id = inserted.order_id, "Order created");
                response.order_id = Some(inserted.order_id);
                response.order_date = Some(order_date);
                response.line_items = with_line_ids(line_items, &inserted.line_item_ids);
                response.message = created_message(inserted.order_id, &order_date);
            }
            Ok(_) => {
                warn!("Order insert wrote no rows");
                response.message = SAVE_FAILED_MESSAGE.to_string();
            }
            Err(err) => {
                let chain = format!("{:#}", err);
                error!(error = %chain, "Failed to save order");
                response.message = write_failure_message(&err);
            }
        }

        Ok(response)
    }
}
