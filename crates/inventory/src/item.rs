use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};

/// Stock item identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StockItemId(pub RecordId);

record_id_newtype!(StockItemId, "stock item id");

/// Unit a stock item is counted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockUnit {
    Kg,
    Unit,
    Litre,
}

/// Fields supplied when registering (or upserting) a stock item.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItemDraft {
    pub name: String,
    pub unit: StockUnit,
    pub quantity: f64,
    #[serde(default)]
    pub minimum_quantity: f64,
    #[serde(default)]
    pub supplier: Option<String>,
    #[serde(default)]
    pub unit_cost_cents: Option<u64>,
}

/// An ingredient stock record.
///
/// Quantities are `f64` (kilos and litres are fractional). Consumption is
/// allowed to drive the balance negative; the store never blocks a sale,
/// the shortfall surfaces through the low-stock report instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockItem {
    pub id: StockItemId,
    pub name: String,
    pub unit: StockUnit,
    pub quantity: f64,
    pub minimum_quantity: f64,
    pub supplier: Option<String>,
    pub unit_cost_cents: Option<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StockItem {
    pub fn create(id: StockItemId, draft: StockItemDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("stock item name must not be empty"));
        }
        if !draft.quantity.is_finite() {
            return Err(DomainError::validation("quantity must be a finite number"));
        }
        if !draft.minimum_quantity.is_finite() || draft.minimum_quantity < 0.0 {
            return Err(DomainError::validation(
                "minimum quantity must be a finite, non-negative number",
            ));
        }

        Ok(Self {
            id,
            name: draft.name,
            unit: draft.unit,
            quantity: draft.quantity,
            minimum_quantity: draft.minimum_quantity,
            supplier: draft.supplier,
            unit_cost_cents: draft.unit_cost_cents,
            created_at: now,
            updated_at: now,
        })
    }

    /// At or below the reorder threshold.
    pub fn is_low(&self) -> bool {
        self.quantity <= self.minimum_quantity
    }

    /// Replace the counted quantity (manual stock-take).
    pub fn set_quantity(&mut self, quantity: f64, now: DateTime<Utc>) -> DomainResult<()> {
        if !quantity.is_finite() {
            return Err(DomainError::validation("quantity must be a finite number"));
        }
        self.quantity = quantity;
        self.updated_at = now;
        Ok(())
    }

    /// Deduct `amount` from the balance (order-driven consumption).
    ///
    /// The balance may go negative.
    pub fn consume(&mut self, amount: f64, now: DateTime<Utc>) -> DomainResult<()> {
        if !amount.is_finite() || amount < 0.0 {
            return Err(DomainError::validation(
                "consumption amount must be a finite, non-negative number",
            ));
        }
        self.quantity -= amount;
        self.updated_at = now;
        Ok(())
    }
}
