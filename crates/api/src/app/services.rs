use std::sync::Arc;

use chrono::{DateTime, Utc};
use thiserror::Error;

use forno_auth::StaffAccount;
use forno_core::DomainError;
use forno_customers::Customer;
use forno_deliveries::{Courier, Delivery, DeliveryStatus};
use forno_infra::{InMemoryKvStore, KeyValueStore, KvError, RecordStore, keys};
use forno_inventory::{StockItem, StockItemDraft, StockItemId};
use forno_invoicing::{Invoice, format_invoice_number};
use forno_menu::Product;
use forno_orders::{Order, OrderDraft, OrderId};

/// Error from a service operation: either the domain said no, or the store
/// failed. Route modules map this onto HTTP in one place (`errors.rs`).
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] KvError),
}

/// Shared application services: one typed record store per entity plus the
/// few operations that touch more than one of them.
pub struct AppServices {
    pub orders: RecordStore<Order>,
    pub products: RecordStore<Product>,
    pub stock: RecordStore<StockItem>,
    pub customers: RecordStore<Customer>,
    pub invoices: RecordStore<Invoice>,
    pub deliveries: RecordStore<Delivery>,
    pub couriers: RecordStore<Courier>,
    pub staff: RecordStore<StaffAccount>,
}

/// Wire the in-memory store (dev/test and single-process deployments).
pub fn build_services() -> AppServices {
    let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryKvStore::new());
    AppServices::new(kv)
}

impl AppServices {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self {
            orders: RecordStore::new(kv.clone(), keys::ORDER_PREFIX),
            products: RecordStore::new(kv.clone(), keys::PRODUCT_PREFIX),
            stock: RecordStore::new(kv.clone(), keys::STOCK_PREFIX),
            customers: RecordStore::new(kv.clone(), keys::CUSTOMER_PREFIX),
            invoices: RecordStore::new(kv.clone(), keys::INVOICE_PREFIX),
            deliveries: RecordStore::new(kv.clone(), keys::DELIVERY_PREFIX),
            couriers: RecordStore::new(kv.clone(), keys::COURIER_PREFIX),
            staff: RecordStore::new(kv, keys::STAFF_PREFIX),
        }
    }

    /// Place an order, then deduct ingredient stock.
    ///
    /// The order is persisted first; stock updates follow best-effort and
    /// are not atomic with it. Items whose product or stock item no longer
    /// exists are skipped.
    pub fn create_order(
        &self,
        draft: OrderDraft,
        now: DateTime<Utc>,
    ) -> Result<Order, ServiceError> {
        let order = Order::place(OrderId::generate(), draft, now)?;
        self.orders.put(&order.id.to_string(), &order)?;

        self.consume_stock_for(&order, now);
        Ok(order)
    }

    /// Walk items → product → ingredient requirements, decrementing stock.
    ///
    /// Failures here must not fail the already-persisted order; they are
    /// logged and skipped.
    fn consume_stock_for(&self, order: &Order, now: DateTime<Utc>) {
        for item in &order.items {
            let product = match self.products.get(&item.product_id.to_string()) {
                Ok(Some(product)) => product,
                Ok(None) => {
                    tracing::debug!(
                        order_id = %order.id,
                        product_id = %item.product_id,
                        "ordered product not in catalog; skipping stock deduction"
                    );
                    continue;
                }
                Err(e) => {
                    tracing::warn!(order_id = %order.id, "product lookup failed: {e}");
                    continue;
                }
            };

            for requirement in &product.ingredients {
                let id = requirement.stock_item_id.to_string();
                let mut stock_item = match self.stock.get(&id) {
                    Ok(Some(stock_item)) => stock_item,
                    Ok(None) => {
                        tracing::debug!(
                            product_id = %product.id,
                            stock_item_id = %requirement.stock_item_id,
                            "ingredient not in stock registry; skipping"
                        );
                        continue;
                    }
                    Err(e) => {
                        tracing::warn!(order_id = %order.id, "stock lookup failed: {e}");
                        continue;
                    }
                };

                let amount = requirement.quantity * f64::from(item.quantity);
                if let Err(e) = stock_item.consume(amount, now) {
                    tracing::warn!(stock_item_id = %stock_item.id, "stock deduction rejected: {e}");
                    continue;
                }
                if let Err(e) = self.stock.put(&id, &stock_item) {
                    tracing::warn!(stock_item_id = %stock_item.id, "stock write failed: {e}");
                    continue;
                }
                if stock_item.is_low() {
                    tracing::warn!(
                        stock_item_id = %stock_item.id,
                        name = %stock_item.name,
                        quantity = stock_item.quantity,
                        "stock at or below minimum after order"
                    );
                }
            }
        }
    }

    /// Create or replace a stock item.
    ///
    /// With an explicit id this is an upsert (the admin screen re-submits
    /// the whole form); the original creation timestamp survives.
    pub fn upsert_stock_item(
        &self,
        id: Option<StockItemId>,
        draft: StockItemDraft,
        now: DateTime<Utc>,
    ) -> Result<StockItem, ServiceError> {
        let id = id.unwrap_or_else(StockItemId::generate);
        let existing = self.stock.get(&id.to_string())?;

        let mut item = StockItem::create(id, draft, now)?;
        if let Some(previous) = existing {
            item.created_at = previous.created_at;
        }

        self.stock.put(&id.to_string(), &item)?;
        Ok(item)
    }

    /// Next invoice number in a series: count of stored invoices in that
    /// series plus one, zero-padded.
    pub fn next_invoice_number(&self, series: &str) -> Result<String, ServiceError> {
        let issued = self
            .invoices
            .list()?
            .into_iter()
            .filter(|i| i.series == series)
            .count() as u64;
        Ok(format_invoice_number(issued + 1))
    }

    /// Move a delivery through its lifecycle, keeping the courier roster in
    /// step: picked up / in transit marks the courier busy, a finished run
    /// credits the courier and frees them.
    pub fn update_delivery_status(
        &self,
        delivery_id: &str,
        status: DeliveryStatus,
        courier_id: Option<forno_deliveries::CourierId>,
        now: DateTime<Utc>,
    ) -> Result<Option<Delivery>, ServiceError> {
        let Some(mut delivery) = self.deliveries.get(delivery_id)? else {
            return Ok(None);
        };

        let previous_status = delivery.status;
        delivery.set_status(status, courier_id, now)?;
        self.deliveries.put(delivery_id, &delivery)?;

        // A repeated status write must not credit the courier again.
        if delivery.status == previous_status {
            return Ok(Some(delivery));
        }

        if let Some(courier_id) = delivery.courier_id {
            match self.couriers.get(&courier_id.to_string())? {
                Some(mut courier) => {
                    match status {
                        DeliveryStatus::PickedUp | DeliveryStatus::InTransit => {
                            courier.set_status(forno_deliveries::CourierStatus::OnDelivery, now);
                        }
                        DeliveryStatus::Delivered => courier.complete_delivery(now),
                        DeliveryStatus::Failed => {
                            courier.set_status(forno_deliveries::CourierStatus::Available, now);
                        }
                        DeliveryStatus::Pending => {}
                    }
                    self.couriers.put(&courier_id.to_string(), &courier)?;
                }
                None => {
                    tracing::debug!(
                        delivery_id = %delivery.id,
                        courier_id = %courier_id,
                        "assigned courier not in roster"
                    );
                }
            }
        }

        Ok(Some(delivery))
    }

    /// Find the active staff account holding `api_key`, if any.
    pub fn staff_by_api_key(&self, api_key: &str) -> Result<Option<StaffAccount>, KvError> {
        Ok(self
            .staff
            .list()?
            .into_iter()
            .find(|account| account.api_key == api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forno_inventory::StockUnit;
    use forno_menu::{IngredientRequirement, ProductCategory, ProductDraft, ProductId};
    use forno_orders::{OrderChannel, OrderItem, OrderPlatform, PaymentMethod};

    fn services() -> AppServices {
        build_services()
    }

    fn seed_stock(services: &AppServices, quantity: f64) -> StockItemId {
        let item = services
            .upsert_stock_item(
                None,
                StockItemDraft {
                    name: "mozzarella".into(),
                    unit: StockUnit::Kg,
                    quantity,
                    minimum_quantity: 1.0,
                    supplier: None,
                    unit_cost_cents: Some(3200),
                },
                Utc::now(),
            )
            .unwrap();
        item.id
    }

    fn seed_product(services: &AppServices, stock_item_id: StockItemId, per_unit: f64) -> Product {
        let product = Product::create(
            ProductId::generate(),
            ProductDraft {
                name: "pizza quatro queijos".into(),
                description: None,
                category: ProductCategory::Pizza,
                size: None,
                price_cents: 4200,
                ingredients: vec![IngredientRequirement {
                    stock_item_id,
                    quantity: per_unit,
                }],
                active: None,
                image: None,
            },
            Utc::now(),
        )
        .unwrap();
        services
            .products
            .put(&product.id.to_string(), &product)
            .unwrap();
        product
    }

    fn draft_for(product: &Product, quantity: u32) -> OrderDraft {
        OrderDraft {
            customer_id: None,
            customer_name: "cliente".into(),
            phone: None,
            address: None,
            table_number: None,
            items: vec![OrderItem {
                product_id: product.id,
                name: product.name.clone(),
                quantity,
                unit_price_cents: product.price_cents,
                note: None,
            }],
            total_cents: product.price_cents * u64::from(quantity),
            channel: OrderChannel::Counter,
            platform: OrderPlatform::InHouse,
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn create_order_persists_and_decrements_stock() {
        let services = services();
        let stock_id = seed_stock(&services, 10.0);
        let product = seed_product(&services, stock_id, 0.4);

        let order = services
            .create_order(draft_for(&product, 3), Utc::now())
            .unwrap();

        let stored = services.orders.get(&order.id.to_string()).unwrap().unwrap();
        assert_eq!(stored.total_cents, 12_600);

        let stock_item = services.stock.get(&stock_id.to_string()).unwrap().unwrap();
        assert!((stock_item.quantity - 8.8).abs() < 1e-9);
    }

    #[test]
    fn create_order_survives_missing_product_and_stock() {
        let services = services();
        // Product referenced by the order was never registered.
        let ghost = Product::create(
            ProductId::generate(),
            ProductDraft {
                name: "pizza fantasma".into(),
                description: None,
                category: ProductCategory::Pizza,
                size: None,
                price_cents: 1000,
                ingredients: vec![],
                active: None,
                image: None,
            },
            Utc::now(),
        )
        .unwrap();

        let order = services
            .create_order(draft_for(&ghost, 1), Utc::now())
            .unwrap();
        assert!(services.orders.get(&order.id.to_string()).unwrap().is_some());
    }

    #[test]
    fn stock_can_go_negative_through_orders() {
        let services = services();
        let stock_id = seed_stock(&services, 0.5);
        let product = seed_product(&services, stock_id, 0.4);

        services
            .create_order(draft_for(&product, 2), Utc::now())
            .unwrap();

        let stock_item = services.stock.get(&stock_id.to_string()).unwrap().unwrap();
        assert!(stock_item.quantity < 0.0);
        assert!(stock_item.is_low());
    }

    #[test]
    fn upsert_with_explicit_id_keeps_created_at() {
        let services = services();
        let id = seed_stock(&services, 3.0);
        let original = services.stock.get(&id.to_string()).unwrap().unwrap();

        let updated = services
            .upsert_stock_item(
                Some(id),
                StockItemDraft {
                    name: "mozzarella di bufala".into(),
                    unit: StockUnit::Kg,
                    quantity: 7.0,
                    minimum_quantity: 2.0,
                    supplier: Some("laticínio serra".into()),
                    unit_cost_cents: Some(5400),
                },
                Utc::now(),
            )
            .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.quantity, 7.0);
    }

    #[test]
    fn invoice_numbers_count_per_series() {
        let services = services();
        assert_eq!(services.next_invoice_number("1").unwrap(), "000001");

        let draft = forno_invoicing::InvoiceDraft {
            customer_name: "cliente".into(),
            cnpj: None,
            total_cents: 1000,
            series: None,
        };
        let invoice = Invoice::issue(
            forno_invoicing::InvoiceId::generate(),
            services.next_invoice_number("1").unwrap(),
            draft,
            Utc::now(),
        )
        .unwrap();
        services
            .invoices
            .put(&invoice.id.to_string(), &invoice)
            .unwrap();

        assert_eq!(services.next_invoice_number("1").unwrap(), "000002");
        assert_eq!(services.next_invoice_number("2").unwrap(), "000001");
    }

    #[test]
    fn delivered_run_credits_the_courier() {
        let services = services();
        let courier = Courier::register(
            forno_deliveries::CourierId::generate(),
            forno_deliveries::CourierDraft {
                name: "pedro".into(),
                phone: "11 95555-0000".into(),
                plate: None,
            },
            Utc::now(),
        )
        .unwrap();
        services
            .couriers
            .put(&courier.id.to_string(), &courier)
            .unwrap();

        let delivery = Delivery::dispatch(
            forno_deliveries::DeliveryId::generate(),
            forno_deliveries::DeliveryDraft {
                order_id: OrderId::generate(),
                customer_name: "ana".into(),
                address: "av. paulista, 1000".into(),
                neighborhood: None,
                phone: None,
                total_cents: 9_500,
                courier_id: Some(courier.id),
            },
            Utc::now(),
        )
        .unwrap();
        services
            .deliveries
            .put(&delivery.id.to_string(), &delivery)
            .unwrap();

        services
            .update_delivery_status(
                &delivery.id.to_string(),
                DeliveryStatus::Delivered,
                None,
                Utc::now(),
            )
            .unwrap()
            .unwrap();

        let stored = services
            .couriers
            .get(&courier.id.to_string())
            .unwrap()
            .unwrap();
        assert_eq!(stored.deliveries_completed, 1);
        assert_eq!(stored.status, forno_deliveries::CourierStatus::Available);

        // Re-asserting "delivered" is a no-op for the counter.
        services
            .update_delivery_status(
                &delivery.id.to_string(),
                DeliveryStatus::Delivered,
                None,
                Utc::now(),
            )
            .unwrap()
            .unwrap();
        let stored = services
            .couriers
            .get(&courier.id.to_string())
            .unwrap()
            .unwrap();
        assert_eq!(stored.deliveries_completed, 1);
    }

    #[test]
    fn unknown_delivery_updates_to_none() {
        let services = services();
        let result = services
            .update_delivery_status(
                &forno_deliveries::DeliveryId::generate().to_string(),
                DeliveryStatus::PickedUp,
                None,
                Utc::now(),
            )
            .unwrap();
        assert!(result.is_none());
    }
}
