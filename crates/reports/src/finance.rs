use chrono::{DateTime, Utc};
use serde::Serialize;

use forno_orders::{Order, OrderChannel, OrderStatus};

use crate::period::ReportPeriod;

/// Revenue attributed to one sales channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelRevenue {
    pub channel: OrderChannel,
    pub revenue_cents: u64,
    pub orders_count: u64,
}

/// Revenue split by channel for a reporting window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub period: ReportPeriod,
    pub revenue_cents: u64,
    pub orders_count: u64,
    pub by_channel: Vec<ChannelRevenue>,
}

const CHANNELS: [OrderChannel; 3] = [
    OrderChannel::Counter,
    OrderChannel::Delivery,
    OrderChannel::Takeaway,
];

/// Reduce orders into the financial summary for `period`.
///
/// Channels always appear in a fixed order, zeroes included, so the
/// dashboard's chart buckets are stable.
pub fn financial_summary(
    orders: &[Order],
    period: ReportPeriod,
    now: DateTime<Utc>,
) -> FinancialSummary {
    let start = period.start(now);

    let mut by_channel: Vec<ChannelRevenue> = CHANNELS
        .iter()
        .map(|&channel| ChannelRevenue {
            channel,
            revenue_cents: 0,
            orders_count: 0,
        })
        .collect();

    let mut revenue_cents = 0u64;
    let mut orders_count = 0u64;

    for order in orders {
        if order.created_at < start || order.status == OrderStatus::Cancelled {
            continue;
        }
        revenue_cents += order.total_cents;
        orders_count += 1;

        let bucket = by_channel
            .iter_mut()
            .find(|c| c.channel == order.channel)
            .expect("all channels are pre-seeded");
        bucket.revenue_cents += order.total_cents;
        bucket.orders_count += 1;
    }

    FinancialSummary {
        period,
        revenue_cents,
        orders_count,
        by_channel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forno_menu::ProductId;
    use forno_orders::{OrderDraft, OrderId, OrderItem, OrderPlatform, PaymentMethod};

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn order(channel: OrderChannel, total_cents: u64, created_at: DateTime<Utc>) -> Order {
        Order::place(
            OrderId::generate(),
            OrderDraft {
                customer_id: None,
                customer_name: "cliente".into(),
                phone: None,
                address: None,
                table_number: None,
                items: vec![OrderItem {
                    product_id: ProductId::generate(),
                    name: "pizza".into(),
                    quantity: 1,
                    unit_price_cents: total_cents,
                    note: None,
                }],
                total_cents,
                channel,
                platform: OrderPlatform::InHouse,
                payment_method: PaymentMethod::Pix,
            },
            created_at,
        )
        .unwrap()
    }

    #[test]
    fn splits_revenue_by_channel_with_stable_buckets() {
        let now = at("2025-03-10T20:00:00Z");
        let orders = vec![
            order(OrderChannel::Delivery, 4200, at("2025-03-10T12:00:00Z")),
            order(OrderChannel::Counter, 2100, at("2025-03-10T13:00:00Z")),
            order(OrderChannel::Delivery, 1800, at("2025-03-10T14:00:00Z")),
        ];

        let summary = financial_summary(&orders, ReportPeriod::Today, now);
        assert_eq!(summary.revenue_cents, 8100);
        assert_eq!(summary.orders_count, 3);
        assert_eq!(summary.by_channel.len(), 3);

        assert_eq!(summary.by_channel[0].channel, OrderChannel::Counter);
        assert_eq!(summary.by_channel[0].revenue_cents, 2100);
        assert_eq!(summary.by_channel[1].channel, OrderChannel::Delivery);
        assert_eq!(summary.by_channel[1].revenue_cents, 6000);
        assert_eq!(summary.by_channel[2].channel, OrderChannel::Takeaway);
        assert_eq!(summary.by_channel[2].revenue_cents, 0);
    }

    #[test]
    fn old_orders_fall_outside_the_window() {
        let now = at("2025-03-10T20:00:00Z");
        let orders = vec![order(OrderChannel::Counter, 5000, at("2025-03-01T12:00:00Z"))];

        let summary = financial_summary(&orders, ReportPeriod::Today, now);
        assert_eq!(summary.revenue_cents, 0);
        assert_eq!(summary.orders_count, 0);
    }
}
