use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};
use forno_orders::OrderId;

use crate::courier::CourierId;

/// Delivery identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeliveryId(pub RecordId);

record_id_newtype!(DeliveryId, "delivery id");

/// Delivery run lifecycle. `Delivered` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    PickedUp,
    InTransit,
    Delivered,
    Failed,
}

impl DeliveryStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, DeliveryStatus::Delivered | DeliveryStatus::Failed)
    }
}

/// Fields supplied when dispatching a delivery for an order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryDraft {
    pub order_id: OrderId,
    pub customer_name: String,
    pub address: String,
    #[serde(default)]
    pub neighborhood: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub total_cents: u64,
    #[serde(default)]
    pub courier_id: Option<CourierId>,
}

/// A delivery run record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delivery {
    pub id: DeliveryId,
    pub order_id: OrderId,
    pub customer_name: String,
    pub address: String,
    pub neighborhood: Option<String>,
    pub phone: Option<String>,
    pub total_cents: u64,
    pub courier_id: Option<CourierId>,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Delivery {
    pub fn dispatch(id: DeliveryId, draft: DeliveryDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.customer_name.trim().is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }
        if draft.address.trim().is_empty() {
            return Err(DomainError::validation("delivery address must not be empty"));
        }

        Ok(Self {
            id,
            order_id: draft.order_id,
            customer_name: draft.customer_name,
            address: draft.address,
            neighborhood: draft.neighborhood,
            phone: draft.phone,
            total_cents: draft.total_cents,
            courier_id: draft.courier_id,
            status: DeliveryStatus::Pending,
            created_at: now,
            updated_at: now,
        })
    }

    /// Move the run to `status`, optionally (re)assigning the courier.
    ///
    /// Leaving a terminal status is an invariant violation.
    pub fn set_status(
        &mut self,
        status: DeliveryStatus,
        courier_id: Option<CourierId>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        if self.status.is_terminal() && status != self.status {
            return Err(DomainError::invariant(
                "delivery has already finished and cannot change status",
            ));
        }
        if let Some(courier) = courier_id {
            self.courier_id = Some(courier);
        }
        self.status = status;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn run() -> Delivery {
        Delivery::dispatch(
            DeliveryId::generate(),
            DeliveryDraft {
                order_id: OrderId::generate(),
                customer_name: "ana costa".into(),
                address: "av. paulista, 1000".into(),
                neighborhood: Some("bela vista".into()),
                phone: Some("11 96666-0000".into()),
                total_cents: 9_500,
                courier_id: None,
            },
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn dispatch_starts_pending_and_unassigned() {
        let delivery = run();
        assert_eq!(delivery.status, DeliveryStatus::Pending);
        assert!(delivery.courier_id.is_none());
    }

    #[test]
    fn dispatch_rejects_empty_address() {
        let err = Delivery::dispatch(
            DeliveryId::generate(),
            DeliveryDraft {
                order_id: OrderId::generate(),
                customer_name: "ana".into(),
                address: " ".into(),
                neighborhood: None,
                phone: None,
                total_cents: 0,
                courier_id: None,
            },
            test_time(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn status_update_can_assign_a_courier() {
        let mut delivery = run();
        let courier = CourierId::generate();

        delivery
            .set_status(DeliveryStatus::PickedUp, Some(courier), test_time())
            .unwrap();

        assert_eq!(delivery.status, DeliveryStatus::PickedUp);
        assert_eq!(delivery.courier_id, Some(courier));
    }

    #[test]
    fn finished_run_cannot_be_reopened() {
        let mut delivery = run();
        delivery
            .set_status(DeliveryStatus::Failed, None, test_time())
            .unwrap();

        let err = delivery
            .set_status(DeliveryStatus::InTransit, None, test_time())
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(delivery.status, DeliveryStatus::Failed);
    }
}
