//! `forno-invoicing` — nota fiscal records.

pub mod invoice;

pub use invoice::{Invoice, InvoiceDraft, InvoiceId, InvoiceStatus, format_invoice_number};
