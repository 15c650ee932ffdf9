use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};

/// Courier identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourierId(pub RecordId);

record_id_newtype!(CourierId, "courier id");

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourierStatus {
    Available,
    OnDelivery,
    Offline,
}

/// Fields supplied when adding a courier to the roster.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourierDraft {
    pub name: String,
    pub phone: String,
    #[serde(default)]
    pub plate: Option<String>,
}

/// A courier roster record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Courier {
    pub id: CourierId,
    pub name: String,
    pub phone: String,
    pub plate: Option<String>,
    pub status: CourierStatus,
    pub deliveries_completed: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Courier {
    pub fn register(id: CourierId, draft: CourierDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("courier name must not be empty"));
        }
        if draft.phone.trim().is_empty() {
            return Err(DomainError::validation("courier phone must not be empty"));
        }

        Ok(Self {
            id,
            name: draft.name,
            phone: draft.phone,
            plate: draft.plate,
            status: CourierStatus::Available,
            deliveries_completed: 0,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn set_status(&mut self, status: CourierStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = now;
    }

    /// Credit a finished run and return the courier to the pool.
    pub fn complete_delivery(&mut self, now: DateTime<Utc>) {
        self.deliveries_completed += 1;
        self.status = CourierStatus::Available;
        self.updated_at = now;
    }
}
