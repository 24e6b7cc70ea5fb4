//! Order engines: composition, mutation, listing and reporting
//!
//! All engines hang off [`OrderDesk`], which owns the persistence
//! collaborators it is given. Nothing here keeps global state.

pub mod catalog;
pub mod compose;
pub mod listing;
pub mod mutate;
pub mod reports;
pub mod request;

use crate::config::{DeskConfig, ListingConfig, ReportConfig};
use crate::core::error::OrderError;
use crate::core::model::{Item, ItemId, ItemScope};
use crate::core::{CatalogRepository, OrderRepository};
use std::sync::Arc;

/// Entry point for every order operation
///
/// # Example
/// ```rust,ignore
/// let store = InMemoryStore::from_config(&config);
/// let desk = OrderDesk::new(Arc::new(store.clone()), Arc::new(store))
///     .with_config(&config);
/// ```
#[derive(Clone)]
pub struct OrderDesk {
    orders: Arc<dyn OrderRepository>,
    catalog: Arc<dyn CatalogRepository>,
    listing: ListingConfig,
    reports: ReportConfig,
}

impl OrderDesk {
    /// Create a desk over the given collaborators with default settings
    pub fn new(orders: Arc<dyn OrderRepository>, catalog: Arc<dyn CatalogRepository>) -> Self {
        Self {
            orders,
            catalog,
            listing: ListingConfig::default(),
            reports: ReportConfig::default(),
        }
    }

    /// Apply listing and report settings from `config`
    pub fn with_config(mut self, config: &DeskConfig) -> Self {
        self.listing = config.listing.clone();
        self.reports = config.reports.clone();
        self
    }

    pub fn page_size(&self) -> usize {
        self.listing.page_size()
    }

    /// Active items offered when composing or editing an order
    pub async fn available_items(&self) -> Result<Vec<Item>, OrderError> {
        Ok(self.catalog.list_items(ItemScope::ActiveOnly).await?)
    }

    /// One active catalog item
    pub async fn item_details(&self, id: ItemId) -> Result<Item, OrderError> {
        self.catalog
            .get_item(id, ItemScope::ActiveOnly)
            .await?
            .ok_or_else(|| OrderError::not_found_item(id))
    }
}
