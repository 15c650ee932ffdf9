use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};

/// Customer identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub RecordId);

record_id_newtype!(CustomerId, "customer id");

/// Fields supplied when registering a customer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDraft {
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub loyalty_points: i64,
    #[serde(default)]
    pub total_spent_cents: u64,
    #[serde(default)]
    pub orders_count: u64,
}

/// A customer record with a loyalty-points counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub loyalty_points: i64,
    /// Lifetime spend in centavos.
    pub total_spent_cents: u64,
    pub orders_count: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    pub fn create(id: CustomerId, draft: CustomerDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("customer name must not be empty"));
        }
        if draft.loyalty_points < 0 {
            return Err(DomainError::validation("loyalty points must not be negative"));
        }

        Ok(Self {
            id,
            name: draft.name,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
            loyalty_points: draft.loyalty_points,
            total_spent_cents: draft.total_spent_cents,
            orders_count: draft.orders_count,
            created_at: now,
            updated_at: now,
        })
    }

    /// Record a visit: accrue (or redeem) loyalty points, add the purchase
    /// amount to the lifetime spend, and bump the order counter.
    ///
    /// Negative `points` redeem; the balance can never go below zero.
    pub fn accrue(
        &mut self,
        points: i64,
        purchase_cents: Option<u64>,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        let balance = self.loyalty_points.checked_add(points).ok_or_else(|| {
            DomainError::validation("loyalty points adjustment overflows the balance")
        })?;
        if balance < 0 {
            return Err(DomainError::invariant(
                "loyalty balance cannot go negative",
            ));
        }

        self.loyalty_points = balance;
        self.total_spent_cents = self
            .total_spent_cents
            .saturating_add(purchase_cents.unwrap_or(0));
        self.orders_count += 1;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn maria() -> Customer {
        Customer::create(
            CustomerId::generate(),
            CustomerDraft {
                name: "maria santos".into(),
                phone: Some("11 98888-0000".into()),
                email: None,
                address: Some("rua a, 123".into()),
                loyalty_points: 0,
                total_spent_cents: 0,
                orders_count: 0,
            },
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn create_rejects_empty_name() {
        let err = Customer::create(
            CustomerId::generate(),
            CustomerDraft {
                name: "".into(),
                phone: None,
                email: None,
                address: None,
                loyalty_points: 0,
                total_spent_cents: 0,
                orders_count: 0,
            },
            test_time(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn accrue_adds_points_spend_and_order_count() {
        let mut customer = maria();
        customer.accrue(12, Some(12_000), test_time()).unwrap();

        assert_eq!(customer.loyalty_points, 12);
        assert_eq!(customer.total_spent_cents, 12_000);
        assert_eq!(customer.orders_count, 1);
    }

    #[test]
    fn accrue_without_purchase_only_moves_points() {
        let mut customer = maria();
        customer.accrue(5, None, test_time()).unwrap();

        assert_eq!(customer.loyalty_points, 5);
        assert_eq!(customer.total_spent_cents, 0);
        assert_eq!(customer.orders_count, 1);
    }

    #[test]
    fn redeeming_below_zero_is_rejected() {
        let mut customer = maria();
        customer.accrue(10, None, test_time()).unwrap();

        let err = customer.accrue(-11, None, test_time()).unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
        assert_eq!(customer.loyalty_points, 10);
    }

    proptest! {
        #[test]
        fn balance_never_goes_negative(moves in proptest::collection::vec(-50i64..50, 0..20)) {
            let mut customer = maria();
            for points in moves {
                let _ = customer.accrue(points, None, test_time());
                prop_assert!(customer.loyalty_points >= 0);
            }
        }

        #[test]
        fn lifetime_spend_is_monotonic(purchases in proptest::collection::vec(0u64..100_000, 0..20)) {
            let mut customer = maria();
            let mut last = customer.total_spent_cents;
            for cents in purchases {
                customer.accrue(1, Some(cents), test_time()).unwrap();
                prop_assert!(customer.total_spent_cents >= last);
                last = customer.total_spent_cents;
            }
        }
    }
}
