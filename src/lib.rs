//! # Order Desk
//!
//! Order composition and consistency engine for a small order-management
//! application: customers place orders built from a shared item catalog with
//! finite stock, and staff list, filter, page, edit, delete and report on them.
//!
//! ## Features
//!
//! - **Stock-checked composition**: an order is either fully buildable from the
//!   catalog snapshot or rejected as a whole with a per-item explanation
//! - **Full-replace edits**: line items are rebuilt from the request on every edit
//! - **Cascading deletes**: removing an order removes its line items
//! - **Listing**: substring/status filtering and fixed-size pages
//! - **Reports**: top spenders, most sold products, orders without items
//! - **Pluggable persistence**: engines talk to storage through
//!   [`OrderRepository`](core::service::OrderRepository) and
//!   [`CatalogRepository`](core::service::CatalogRepository)
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use order_desk::prelude::*;
//! use std::sync::Arc;
//!
//! let store = InMemoryStore::with_items(vec![
//!     Item::new(1, "Widget", 5, Decimal::new(1000, 2)),
//! ]);
//! let desk = OrderDesk::new(Arc::new(store.clone()), Arc::new(store));
//!
//! let response = desk
//!     .create_order(&OrderRequest::new("Alice").line(1, 3))
//!     .await?;
//! assert!(response.message.starts_with("Order"));
//! ```

pub mod config;
pub mod core;
pub mod orders;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        error::{EntityKind, ErrorResponse, FieldError, OrderError},
        model::{
            Inserted, Item, ItemId, ItemScope, LineItem, LineItemId, NewOrder, Order, OrderId,
            OrderStatus, StatusFilter,
        },
        query::{ListingQuery, PaginationMeta},
        service::{CatalogRepository, OrderRepository},
    };

    // === Engines ===
    pub use crate::orders::{
        OrderDesk,
        catalog::CatalogSnapshot,
        compose::CreateOrderResponse,
        listing::OrderListing,
        mutate::{DeleteConfirmation, DeleteResponse, EditOrderResponse, EditableOrder},
        reports::{Report, ReportKind, ReportResponse},
        request::{OrderRequest, RequestedLine},
    };

    // === Storage ===
    #[cfg(feature = "in-memory")]
    pub use crate::storage::InMemoryStore;

    // === Config ===
    pub use crate::config::{DeskConfig, ListingConfig, ReportConfig};

    // === External dependencies ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use rust_decimal::Decimal;
    pub use serde::{Deserialize, Serialize};
}
