use forno_inventory::StockItem;

/// Items at or below their reorder threshold.
pub fn low_stock(items: &[StockItem]) -> Vec<StockItem> {
    items.iter().filter(|i| i.is_low()).cloned().collect()
}
