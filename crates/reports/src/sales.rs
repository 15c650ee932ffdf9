use chrono::{DateTime, Utc};
use serde::Serialize;

use forno_orders::{Order, OrderStatus};

use crate::period::ReportPeriod;

/// Sales totals for a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesSummary {
    pub period: ReportPeriod,
    pub total_sales_cents: u64,
    pub orders_count: u64,
    /// Average ticket in centavos (integer division, floor).
    pub average_ticket_cents: u64,
    /// The orders that made the cut, for drill-down in the dashboard.
    pub orders: Vec<Order>,
}

/// Reduce orders into the sales summary for `period`.
///
/// Cancelled orders never count; everything else does, whatever its
/// fulfilment status.
pub fn sales_summary(orders: &[Order], period: ReportPeriod, now: DateTime<Utc>) -> SalesSummary {
    let start = period.start(now);

    let matching: Vec<Order> = orders
        .iter()
        .filter(|o| o.created_at >= start && o.status != OrderStatus::Cancelled)
        .cloned()
        .collect();

    let total_sales_cents: u64 = matching.iter().map(|o| o.total_cents).sum();
    let orders_count = matching.len() as u64;
    let average_ticket_cents = if orders_count > 0 {
        total_sales_cents / orders_count
    } else {
        0
    };

    SalesSummary {
        period,
        total_sales_cents,
        orders_count,
        average_ticket_cents,
        orders: matching,
    }
}
