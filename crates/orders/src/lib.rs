//! `forno-orders` — order records and their status lifecycle.

pub mod order;

pub use order::{
    Order, OrderChannel, OrderDraft, OrderId, OrderItem, OrderPlatform, OrderStatus, PaymentMethod,
};
