//! `forno-deliveries` — delivery runs and the courier roster.

pub mod courier;
pub mod delivery;

pub use courier::{Courier, CourierDraft, CourierId, CourierStatus};
pub use delivery::{Delivery, DeliveryDraft, DeliveryId, DeliveryStatus};
