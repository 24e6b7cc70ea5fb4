//! Listing query parameters and pagination utilities

use crate::core::model::StatusFilter;
use serde::{Deserialize, Serialize};

/// Query parameters for the order listing
///
/// All parameters are optional. A missing page means page 1.
///
/// # Example
/// ```rust,ignore
/// let query = ListingQuery::default()
///     .search("Smith")
///     .status(StatusFilter::Shipped)
///     .page(2);
/// let listing = desk.list_orders(&query).await?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingQuery {
    /// Case-sensitive substring matched against the customer name
    pub search_term: Option<String>,

    /// Exact status match; `All` disables the filter
    pub status: Option<StatusFilter>,

    /// Page number (starts at 1)
    pub page: Option<u32>,
}

impl ListingQuery {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn status(mut self, status: StatusFilter) -> Self {
        self.status = Some(status);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Get page number, defaulting to 1 and ensuring a minimum of 1
    pub fn current_page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective status filter; absent means `All`
    pub fn status_filter(&self) -> StatusFilter {
        self.status.unwrap_or_default()
    }
}

/// Number of pages for `total` results
///
/// This is `total / page_size` rounded half away from zero, not a ceiling.
/// A trailing partial page smaller than half a page is not counted, so the
/// page list can stop short of the last results (e.g. 7 results in pages of
/// 3 give 2 pages).
pub fn page_count(total: usize, page_size: usize) -> usize {
    let page_size = page_size.max(1);
    let remainder = total % page_size;
    total / page_size + usize::from(remainder.saturating_mul(2) >= page_size)
}

/// Pagination metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (starts at 1)
    pub page: u32,

    /// Number of items per page
    pub limit: usize,

    /// Total number of items (after filters)
    pub total: usize,

    /// Total number of pages, see [`page_count`]
    pub total_pages: usize,

    /// Whether there is a next page
    pub has_next: bool,

    /// Whether there is a previous page
    pub has_prev: bool,
}

impl PaginationMeta {
    /// Create pagination metadata from calculation
    pub fn new(page: u32, limit: usize, total: usize) -> Self {
        // Ensure limit is at least 1 to avoid division by zero
        let limit = limit.max(1);
        let start = Self::offset_for(page, limit);

        Self {
            page,
            limit,
            total,
            total_pages: page_count(total, limit),
            has_next: start.saturating_add(limit) < total,
            has_prev: page > 1,
        }
    }

    /// Number of results skipped before this page
    pub fn offset(&self) -> usize {
        Self::offset_for(self.page, self.limit)
    }

    fn offset_for(page: u32, limit: usize) -> usize {
        (page.max(1) as usize - 1).saturating_mul(limit)
    }

    /// Page numbers offered for navigation: `1..=total_pages`
    pub fn page_numbers(&self) -> Vec<u32> {
        (1..=self.total_pages as u32).collect()
    }
}
