//! Order listing: name/status filtering and fixed-size pages

use crate::core::error::OrderError;
use crate::core::model::{Order, StatusFilter};
use crate::core::query::{ListingQuery, PaginationMeta};
use crate::orders::OrderDesk;
use serde::Serialize;
use tracing::debug;

pub const EMPTY_PAGE_MESSAGE: &str = "No Orders to Display";

/// One page of orders plus navigation data
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderListing {
    pub orders: Vec<Order>,

    /// Page numbers for navigation, `1..=total_pages`
    pub pages: Vec<u32>,

    pub current_page: u32,
    pub search_term: Option<String>,
    pub status: StatusFilter,
    pub pagination: PaginationMeta,

    /// Set when the page is empty
    pub message: Option<String>,
}

/// Keep orders whose customer name contains `search_term` and whose status
/// passes `status`
///
/// Matching is case-sensitive; an empty term matches every name.
pub fn filter_orders(
    orders: Vec<Order>,
    search_term: Option<&str>,
    status: StatusFilter,
) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| search_term.is_none_or(|term| order.customer_name.contains(term)))
        .filter(|order| status.matches(order.status))
        .collect()
}

/// Filter `orders` by `query` and cut out the requested page
pub fn paginate(orders: Vec<Order>, query: &ListingQuery, page_size: usize) -> OrderListing {
    let status = query.status_filter();
    let filtered = filter_orders(orders, query.search_term.as_deref(), status);

    let current_page = query.current_page();
    let pagination = PaginationMeta::new(current_page, page_size, filtered.len());

    let page: Vec<Order> = filtered
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.limit)
        .collect();

    let message = page.is_empty().then(|| EMPTY_PAGE_MESSAGE.to_string());

    OrderListing {
        orders: page,
        pages: pagination.page_numbers(),
        current_page,
        search_term: query.search_term.clone(),
        status,
        pagination,
        message,
    }
}

impl OrderDesk {
    /// List one page of orders matching `query`
    ///
    /// All orders are loaded and filtered in memory.
    pub async fn list_orders(&self, query: &ListingQuery) -> Result<OrderListing, OrderError> {
        let orders = self.orders.list_orders().await?;
        let listing = paginate(orders, query, self.page_size());

        debug!(
            total = listing.pagination.total,
            page = listing.current_page,
            shown = listing.orders.len(),
            "Listed orders"
        );

        Ok(listing)
    }
}
