//! Canned reports over the full order set

use crate::core::error::OrderError;
use crate::core::model::Order;
use crate::orders::OrderDesk;
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

/// The reports on offer, by selector number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportKind {
    TopSpenders,
    TopProducts,
    /// Labelled "customers with no orders" but lists orders with no line items
    OrdersWithoutItems,
}

impl ReportKind {
    pub const ALL: [ReportKind; 3] = [
        ReportKind::TopSpenders,
        ReportKind::TopProducts,
        ReportKind::OrdersWithoutItems,
    ];

    pub fn from_selector(selector: i32) -> Option<Self> {
        match selector {
            1 => Some(ReportKind::TopSpenders),
            2 => Some(ReportKind::TopProducts),
            3 => Some(ReportKind::OrdersWithoutItems),
            _ => None,
        }
    }

    pub fn selector(self) -> i32 {
        match self {
            ReportKind::TopSpenders => 1,
            ReportKind::TopProducts => 2,
            ReportKind::OrdersWithoutItems => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ReportKind::TopSpenders => "Top 5 customers by spending",
            ReportKind::TopProducts => "Most sold products",
            ReportKind::OrdersWithoutItems => "Customers with no orders",
        }
    }
}

/// Selector → label for every report, in selector order
pub fn report_catalogue() -> IndexMap<i32, &'static str> {
    ReportKind::ALL
        .iter()
        .map(|kind| (kind.selector(), kind.label()))
        .collect()
}

/// Rows of a generated report
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "rows", rename_all = "snake_case")]
pub enum Report {
    /// Customer name → total spent, highest first
    TopSpenders(IndexMap<String, Decimal>),

    /// Quantity sold → product name, highest first
    TopProducts(IndexMap<u32, String>),

    OrdersWithoutItems(Vec<Order>),

    /// Produced for an unknown selector
    Empty,
}

/// A generated report with the selector that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportResponse {
    pub selected_report: i32,
    pub report: Report,
    pub reports: IndexMap<i32, &'static str>,
}

/// Customers ranked by the sum of their orders' totals
///
/// Ties keep the order in which customers first appear.
pub fn top_spenders(orders: &[Order], limit: usize) -> IndexMap<String, Decimal> {
    let mut totals: IndexMap<&str, Decimal> = IndexMap::new();
    for order in orders {
        *totals
            .entry(order.customer_name.as_str())
            .or_insert(Decimal::ZERO) += order.total_amount();
    }

    let mut ranked: Vec<(&str, Decimal)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(name, total)| (name.to_string(), total))
        .collect()
}

/// Products ranked by total quantity sold across all orders
///
/// Lines whose item no longer resolves are left out. The result is keyed by
/// quantity, so two products with the same total share one entry: the
/// lower-ranked name replaces the value while the slot keeps its position.
pub fn top_products(orders: &[Order], limit: usize) -> IndexMap<u32, String> {
    let mut sold: IndexMap<&str, u32> = IndexMap::new();
    for line in orders.iter().flat_map(|order| &order.line_items) {
        if let Some(product_name) = line.product_name() {
            *sold.entry(product_name).or_insert(0) += line.quantity;
        }
    }

    let mut ranked: Vec<(&str, u32)> = sold.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    ranked
        .into_iter()
        .take(limit)
        .map(|(name, quantity)| (quantity, name.to_string()))
        .collect()
}

/// Orders that have no line items at all
pub fn orders_without_items(orders: Vec<Order>) -> Vec<Order> {
    orders
        .into_iter()
        .filter(|order| !order.has_line_items())
        .collect()
}

pub fn build_report(kind: Option<ReportKind>, orders: Vec<Order>, limit: usize) -> Report {
    match kind {
        Some(ReportKind::TopSpenders) => Report::TopSpenders(top_spenders(&orders, limit)),
        Some(ReportKind::TopProducts) => Report::TopProducts(top_products(&orders, limit)),
        Some(ReportKind::OrdersWithoutItems) => {
            Report::OrdersWithoutItems(orders_without_items(orders))
        }
        None => Report::Empty,
    }
}

impl OrderDesk {
    /// Run report `selector` (1, 2 or 3) over every stored order
    ///
    /// Any other selector gives [`Report::Empty`].
    pub async fn generate_report(&self, selector: i32) -> Result<ReportResponse, OrderError> {
        let kind = ReportKind::from_selector(selector);
        let report = match kind {
            Some(_) => {
                let orders = self.orders.list_orders().await?;
                build_report(kind, orders, self.reports.top_n)
            }
            None => Report::Empty,
        };

        debug!(selector, ?kind, "Generated report");

        Ok(ReportResponse {
            selected_report: selector,
            report,
            reports: report_catalogue(),
        })
    }
}
