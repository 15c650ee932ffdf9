//! `forno-customers` — customer records and loyalty accrual.

pub mod customer;

pub use customer::{Customer, CustomerDraft, CustomerId};
