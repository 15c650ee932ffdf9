use std::collections::HashMap;

use serde::Serialize;

use forno_menu::ProductId;
use forno_orders::{Order, OrderStatus};

/// Units and revenue sold of one product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSales {
    pub product_id: ProductId,
    pub name: String,
    pub quantity_sold: u64,
    pub revenue_cents: u64,
}

/// Rank products by units sold across all non-cancelled orders.
///
/// The item's denormalized name wins ties in labeling (menu edits after the
/// sale don't rewrite history). Ordering is quantity desc, then name, so
/// the ranking is deterministic.
pub fn popular_products(orders: &[Order]) -> Vec<ProductSales> {
    let mut tally: HashMap<ProductId, ProductSales> = HashMap::new();

    for order in orders {
        if order.status == OrderStatus::Cancelled {
            continue;
        }
        for item in &order.items {
            let entry = tally.entry(item.product_id).or_insert_with(|| ProductSales {
                product_id: item.product_id,
                name: item.name.clone(),
                quantity_sold: 0,
                revenue_cents: 0,
            });
            entry.quantity_sold += u64::from(item.quantity);
            entry.revenue_cents += item.unit_price_cents * u64::from(item.quantity);
        }
    }

    let mut ranking: Vec<ProductSales> = tally.into_values().collect();
    ranking.sort_by(|a, b| {
        b.quantity_sold
            .cmp(&a.quantity_sold)
            .then_with(|| a.name.cmp(&b.name))
    });
    ranking
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use forno_orders::{OrderChannel, OrderDraft, OrderId, OrderItem, OrderPlatform, PaymentMethod};

    fn order_with(items: Vec<OrderItem>, cancelled: bool) -> Order {
        let now = Utc::now();
        let total = items
            .iter()
            .map(|i| i.unit_price_cents * u64::from(i.quantity))
            .sum();
        let mut order = Order::place(
            OrderId::generate(),
            OrderDraft {
                customer_id: None,
                customer_name: "cliente".into(),
                phone: None,
                address: None,
                table_number: None,
                items,
                total_cents: total,
                channel: OrderChannel::Takeaway,
                platform: OrderPlatform::InHouse,
                payment_method: PaymentMethod::Card,
            },
            now,
        )
        .unwrap();
        if cancelled {
            order.set_status(OrderStatus::Cancelled, now).unwrap();
        }
        order
    }

    fn item(product_id: ProductId, name: &str, quantity: u32, price: u64) -> OrderItem {
        OrderItem {
            product_id,
            name: name.into(),
            quantity,
            unit_price_cents: price,
            note: None,
        }
    }

    #[test]
    fn aggregates_quantity_and_revenue_per_product() {
        let margherita = ProductId::generate();
        let calabresa = ProductId::generate();

        let orders = vec![
            order_with(
                vec![
                    item(margherita, "pizza margherita", 1, 3500),
                    item(calabresa, "pizza calabresa", 2, 3800),
                ],
                false,
            ),
            order_with(vec![item(margherita, "pizza margherita", 2, 3500)], false),
        ];

        let ranking = popular_products(&orders);
        assert_eq!(ranking.len(), 2);

        assert_eq!(ranking[0].product_id, margherita);
        assert_eq!(ranking[0].quantity_sold, 3);
        assert_eq!(ranking[0].revenue_cents, 10_500);

        assert_eq!(ranking[1].product_id, calabresa);
        assert_eq!(ranking[1].quantity_sold, 2);
        assert_eq!(ranking[1].revenue_cents, 7_600);
    }

    #[test]
    fn cancelled_orders_are_excluded() {
        let product = ProductId::generate();
        let orders = vec![order_with(vec![item(product, "pizza", 5, 4000)], true)];

        assert!(popular_products(&orders).is_empty());
    }

    #[test]
    fn equal_quantities_rank_by_name() {
        let a = ProductId::generate();
        let b = ProductId::generate();
        let orders = vec![order_with(
            vec![item(b, "suco de laranja", 1, 900), item(a, "refrigerante", 1, 700)],
            false,
        )];

        let ranking = popular_products(&orders);
        assert_eq!(ranking[0].name, "refrigerante");
        assert_eq!(ranking[1].name, "suco de laranja");
    }
}
