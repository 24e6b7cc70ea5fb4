//! Typed error handling for the order engines
//!
//! Lookups that miss, invalid requests and failed storage reads surface as
//! [`OrderError`]. Stock shortfalls and failed writes are *not* errors: they
//! are reported through the response message of the operation.
//!
//! # Example
//!
//! ```rust,ignore
//! match desk.order_details(42).await {
//!     Ok(order) => println!("{} owes {}", order.customer_name, order.total_amount()),
//!     Err(OrderError::NotFound { id, .. }) => println!("Order {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Kind of record a lookup was looking for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Order,
    Item,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Order => write!(f, "order"),
            EntityKind::Item => write!(f, "item"),
        }
    }
}

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// The error type of every engine operation
#[derive(Debug, Error)]
pub enum OrderError {
    /// The requested order or item does not exist
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: EntityKind, id: i64 },

    /// The request failed input validation
    #[error("Validation failed: {}", join_field_errors(.0))]
    Validation(Vec<FieldError>),

    /// A storage read failed
    #[error("Storage error: {0}")]
    Storage(String),
}

fn join_field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<anyhow::Error> for OrderError {
    fn from(err: anyhow::Error) -> Self {
        OrderError::Storage(format!("{:#}", err))
    }
}

/// Error response structure for callers that render errors
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl OrderError {
    pub fn not_found_order(id: i64) -> Self {
        OrderError::NotFound {
            entity: EntityKind::Order,
            id,
        }
    }

    pub fn not_found_item(id: i64) -> Self {
        OrderError::NotFound {
            entity: EntityKind::Item,
            id,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            OrderError::NotFound {
                entity: EntityKind::Order,
                ..
            } => "ORDER_NOT_FOUND",
            OrderError::NotFound {
                entity: EntityKind::Item,
                ..
            } => "ITEM_NOT_FOUND",
            OrderError::Validation(_) => "VALIDATION_ERROR",
            OrderError::Storage(_) => "STORAGE_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            OrderError::NotFound { entity, id } => Some(serde_json::json!({
                "entity": entity.to_string(),
                "id": id
            })),
            OrderError::Validation(errors) => Some(serde_json::json!({ "fields": errors })),
            OrderError::Storage(_) => None,
        }
    }
}

/// Text shown to the user when a write fails
///
/// The innermost cause of the chain wins; a chain of one is its own cause.
pub fn write_failure_message(err: &anyhow::Error) -> String {
    err.root_cause().to_string()
}
