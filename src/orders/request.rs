//! Inbound order requests

use crate::core::model::ItemId;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A customer name plus the lines asked for, used for both create and edit
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct OrderRequest {
    #[validate(length(
        min = 1,
        max = 100,
        message = "customer name must be between 1 and 100 characters"
    ))]
    pub customer_name: String,

    #[serde(default)]
    #[validate(nested)]
    pub lines: Vec<RequestedLine>,
}

impl OrderRequest {
    pub fn new(customer_name: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            lines: Vec::new(),
        }
    }

    /// Append a line with a quantity
    pub fn line(mut self, item_id: ItemId, quantity: u32) -> Self {
        self.lines.push(RequestedLine {
            item_id,
            quantity: Some(quantity),
        });
        self
    }

    /// Append a line with no quantity; it is skipped when the order is built
    pub fn blank_line(mut self, item_id: ItemId) -> Self {
        self.lines.push(RequestedLine {
            item_id,
            quantity: None,
        });
        self
    }

    /// Lines that carry a positive quantity, in request order
    pub fn positive_lines(&self) -> impl Iterator<Item = (ItemId, u32)> + '_ {
        self.lines.iter().filter_map(RequestedLine::positive)
    }
}

/// One requested (item, quantity) pair
///
/// A missing or zero quantity means "skip this line".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct RequestedLine {
    pub item_id: ItemId,

    #[validate(range(max = 500, message = "quantity must be between 0 and 500"))]
    pub quantity: Option<u32>,
}

impl RequestedLine {
    pub fn positive(&self) -> Option<(ItemId, u32)> {
        self.quantity
            .filter(|quantity| *quantity > 0)
            .map(|quantity| (self.item_id, quantity))
    }
}
