//! Order mutation: full-replace edits, delete confirmation and deletion

use crate::core::error::{OrderError, write_failure_message};
use crate::core::model::{ItemScope, LineItem, Order, OrderId, OrderStatus};
use crate::core::validation::validate;
use crate::orders::OrderDesk;
use crate::orders::catalog::CatalogSnapshot;
use crate::orders::request::OrderRequest;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info, instrument, warn};

pub const EDIT_FAILED_MESSAGE: &str = "Some error occured, please try again later";
pub const DELETE_FAILED_MESSAGE: &str =
    "There was an issue processing your request, please try again later.";

/// Current state of an order as shown on the edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditableOrder {
    pub order_id: OrderId,
    pub customer_name: String,
    pub order_date: DateTime<Utc>,
    pub status: OrderStatus,
    pub line_items: Vec<LineItem>,
}

impl From<Order> for EditableOrder {
    fn from(order: Order) -> Self {
        Self {
            order_id: order.order_id,
            customer_name: order.customer_name,
            order_date: order.order_date,
            status: order.status,
            line_items: order.line_items,
        }
    }
}

/// Outcome of an edit
///
/// Name and line items describe what is stored after the attempt: the edit
/// when it was saved, the untouched order when it was not.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditOrderResponse {
    pub order_id: OrderId,
    pub updated: bool,
    pub customer_name: String,
    pub line_items: Vec<LineItem>,
    pub message: String,
}

/// Read-only prompt shown before a delete
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteConfirmation {
    pub order: Order,
    pub message: String,
}

/// Outcome of a delete
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteResponse {
    pub order_id: OrderId,
    pub deleted: bool,
    pub message: String,
}

/// Build line items for an edit; no stock check is made
pub fn rebuild_lines(
    snapshot: &CatalogSnapshot,
    request: &OrderRequest,
) -> Result<Vec<LineItem>, OrderError> {
    request
        .positive_lines()
        .map(|(item_id, quantity)| {
            snapshot
                .require(item_id)
                .map(|item| LineItem::new(item.clone(), quantity))
        })
        .collect()
}

pub fn delete_prompt(order_id: OrderId) -> String {
    format!("Are you sure you would like to delete order {}?", order_id)
}

impl OrderDesk {
    async fn require_order(&self, id: OrderId) -> Result<Order, OrderError> {
        self.orders
            .get_order(id)
            .await?
            .ok_or_else(|| OrderError::not_found_order(id))
    }

    /// One order with its line items and their catalog items
    pub async fn order_details(&self, id: OrderId) -> Result<Order, OrderError> {
        self.require_order(id).await
    }

    /// Load an order for the edit form
    pub async fn fetch_editable_order(&self, id: OrderId) -> Result<EditableOrder, OrderError> {
        Ok(self.require_order(id).await?.into())
    }

    /// Replace an order's customer name and line items
    ///
    /// The old line items are discarded and rebuilt from the request. Unlike
    /// creation, quantities are not checked against stock. Status and order
    /// date are left as they were.
    #[instrument(skip(self, request), fields(customer = %request.customer_name))]
    pub async fn edit_order(
        &self,
        order_id: OrderId,
        request: &OrderRequest,
    ) -> Result<EditOrderResponse, OrderError> {
        validate(request)?;

        let snapshot = CatalogSnapshot::load(self.catalog.as_ref(), ItemScope::All).await?;
        let line_items = rebuild_lines(&snapshot, request)?;

        let stored = self.require_order(order_id).await?;
        let edited = Order {
            customer_name: request.customer_name.clone(),
            line_items,
            ..stored.clone()
        };

        let result = self.orders.update_order(&edited).await;
        let (updated, order, message) = match result {
            Ok(rows) if rows > 0 => {
                info!(order_id, lines = edited.line_items.len(), "Order updated");
                let order = self.reload(edited).await;
                (true, order, format!("Order {} updated.", order_id))
            }
            Ok(_) => {
                warn!(order_id, "Order update wrote no rows");
                (false, stored, EDIT_FAILED_MESSAGE.to_string())
            }
            Err(err) => {
                let chain = format!("{:#}", err);
                error!(order_id, error = %chain, "Failed to update order");
                (false, stored, write_failure_message(&err))
            }
        };

        Ok(EditOrderResponse {
            order_id,
            updated,
            customer_name: order.customer_name,
            line_items: order.line_items,
            message,
        })
    }

    /// Read back a just-written order so line items carry their new ids
    ///
    /// The write already succeeded, so a failed read falls back to `written`.
    async fn reload(&self, written: Order) -> Order {
        match self.orders.get_order(written.order_id).await {
            Ok(Some(order)) => order,
            Ok(None) => written,
            Err(err) => {
                let chain = format!("{:#}", err);
                warn!(order_id = written.order_id, error = %chain, "Failed to reload order");
                written
            }
        }
    }

    /// Compose the confirmation prompt for deleting an order; changes nothing
    pub async fn confirm_delete(&self, order_id: OrderId) -> Result<DeleteConfirmation, OrderError> {
        let order = self.require_order(order_id).await?;
        Ok(DeleteConfirmation {
            message: delete_prompt(order.order_id),
            order,
        })
    }

    /// Delete an order together with its line items
    #[instrument(skip(self))]
    pub async fn delete_order(&self, order_id: OrderId) -> Result<DeleteResponse, OrderError> {
        let order = self.require_order(order_id).await?;

        let (deleted, message) = match self.orders.delete_order(order.order_id).await {
            Ok(rows) if rows > 0 => {
                info!(order_id, rows, "Order deleted");
                (true, format!("Order {} deleted!", order.order_id))
            }
            Ok(_) => {
                warn!(order_id, "Order delete removed no rows");
                (false, DELETE_FAILED_MESSAGE.to_string())
            }
            Err(err) => {
                let chain = format!("{:#}", err);
                error!(order_id, error = %chain, "Failed to delete order");
                (false, write_failure_message(&err))
            }
        };

        Ok(DeleteResponse {
            order_id,
            deleted,
            message,
        })
    }
}
