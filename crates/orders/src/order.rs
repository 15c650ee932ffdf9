use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};
use forno_customers::CustomerId;
use forno_menu::ProductId;

/// Order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub RecordId);

record_id_newtype!(OrderId, "order id");

/// Order status lifecycle.
///
/// `Delivered` and `Cancelled` are terminal; everything else may move
/// freely (the admin dashboard reorders the queue at will).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }
}

/// How the order reaches the customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderChannel {
    Counter,
    Delivery,
    Takeaway,
}

/// Where the order was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPlatform {
    InHouse,
    Whatsapp,
    Ifood,
    Rappi,
    Uber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Cash,
    Card,
    Pix,
}

/// One ordered line: product reference, denormalized name, quantity, price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub product_id: ProductId,
    /// Denormalized so reports and receipts survive menu edits.
    pub name: String,
    pub quantity: u32,
    /// Unit price in centavos.
    pub unit_price_cents: u64,
    #[serde(default)]
    pub note: Option<String>,
}

/// Fields supplied when placing an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    #[serde(default)]
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub table_number: Option<u32>,
    pub items: Vec<OrderItem>,
    /// Total in centavos, as computed by the caller.
    pub total_cents: u64,
    pub channel: OrderChannel,
    #[serde(default = "OrderDraft::default_platform")]
    pub platform: OrderPlatform,
    pub payment_method: PaymentMethod,
}

impl OrderDraft {
    fn default_platform() -> OrderPlatform {
        OrderPlatform::InHouse
    }
}

/// An order record.
///
/// References (customer, products) are opaque ids resolved at request time;
/// the store does not enforce that they exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    pub customer_id: Option<CustomerId>,
    pub customer_name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub table_number: Option<u32>,
    pub items: Vec<OrderItem>,
    pub total_cents: u64,
    pub channel: OrderChannel,
    pub platform: OrderPlatform,
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Place a new order. Orders always start `Pending`.
    pub fn place(id: OrderId, draft: OrderDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }
        if draft.items.is_empty() {
            return Err(DomainError::validation("order must contain at least one item"));
        }
        for item in &draft.items {
            if item.quantity == 0 {
                return Err(DomainError::validation("item quantity must be positive"));
            }
        }

        Ok(Self {
            id,
            customer_id: draft.customer_id,
            customer_name: draft.customer_name,
            phone: draft.phone,
            address: draft.address,
            table_number: draft.table_number,
            items: draft.items,
            total_cents: draft.total_cents,
            channel: draft.channel,
            platform: draft.platform,
            payment_method: draft.payment_method,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move the order to `status`.
    ///
    /// Leaving a terminal status is an invariant violation; re-asserting the
    /// current status is a no-op touch.
    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if self.status.is_terminal() && status != self.status {
            return Err(DomainError::invariant(format!(
                "order is {} and cannot change status",
                status_label(self.status)
            )));
        }
        self.status = status;
        self.updated_at = now;
        Ok(())
    }

    /// Still on the kitchen/fulfilment path.
    pub fn is_open(&self) -> bool {
        !self.status.is_terminal()
    }
}

fn status_label(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Pending => "pending",
        OrderStatus::Preparing => "preparing",
        OrderStatus::Ready => "ready",
        OrderStatus::Delivered => "delivered",
        OrderStatus::Cancelled => "cancelled",
    }
}
