//! Key namespace.
//!
//! One prefix per record type. The prefixes are part of the published data
//! layout (the admin frontend and any seed tooling rely on them), so they
//! stay stable even where type names differ.

/// Order records.
pub const ORDER_PREFIX: &str = "pedido:";
/// Menu product records.
pub const PRODUCT_PREFIX: &str = "produto:";
/// Stock item records.
pub const STOCK_PREFIX: &str = "estoque:";
/// Customer records.
pub const CUSTOMER_PREFIX: &str = "cliente:";
/// Invoice (nota fiscal) records.
pub const INVOICE_PREFIX: &str = "nota:";
/// Delivery records.
pub const DELIVERY_PREFIX: &str = "entrega:";
/// Courier records.
pub const COURIER_PREFIX: &str = "motoboy:";
/// Staff account records.
pub const STAFF_PREFIX: &str = "usuario:";

/// Build the storage key for a record id under a prefix.
pub fn key_for(prefix: &str, id: &str) -> String {
    format!("{prefix}{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_for_concatenates_prefix_and_id() {
        assert_eq!(key_for(ORDER_PREFIX, "abc"), "pedido:abc");
        assert_eq!(key_for(STAFF_PREFIX, "42"), "usuario:42");
    }
}
