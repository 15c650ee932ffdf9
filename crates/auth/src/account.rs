//! Staff account records.
//!
//! Each account carries an opaque `api_key` minted at creation; presenting
//! that key as a bearer token authenticates the account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use forno_core::{DomainError, DomainResult, RecordId, record_id_newtype};

use crate::permissions::Permission;
use crate::roles::StaffRole;

/// Staff account identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaffAccountId(pub RecordId);

record_id_newtype!(StaffAccountId, "staff account id");

/// Fields supplied when inviting a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAccountDraft {
    pub name: String,
    pub email: String,
    pub role: StaffRole,
}

/// A staff account record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffAccount {
    pub id: StaffAccountId,
    pub name: String,
    pub email: String,
    pub role: StaffRole,
    /// Opaque bearer credential for this account.
    pub api_key: String,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StaffAccount {
    pub fn create(
        id: StaffAccountId,
        draft: StaffAccountDraft,
        now: DateTime<Utc>,
    ) -> DomainResult<Self> {
        if draft.name.trim().is_empty() {
            return Err(DomainError::validation("staff name must not be empty"));
        }
        if !draft.email.contains('@') {
            return Err(DomainError::validation("staff email is not valid"));
        }

        Ok(Self {
            id,
            name: draft.name,
            email: draft.email,
            role: draft.role,
            api_key: Uuid::now_v7().simple().to_string(),
            active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Permissions this account currently holds (none when deactivated).
    pub fn permissions(&self) -> Vec<Permission> {
        if self.active {
            self.role.permissions()
        } else {
            Vec::new()
        }
    }

    pub fn set_role(&mut self, role: StaffRole, now: DateTime<Utc>) {
        self.role = role;
        self.updated_at = now;
    }

    pub fn deactivate(&mut self, now: DateTime<Utc>) {
        self.active = false;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn cook_account() -> StaffAccount {
        StaffAccount::create(
            StaffAccountId::generate(),
            StaffAccountDraft {
                name: "rafael cozinheiro".into(),
                email: "rafael@pizzaria.example".into(),
                role: StaffRole::Cook,
            },
            test_time(),
        )
        .unwrap()
    }

    #[test]
    fn create_mints_an_api_key_and_activates() {
        let account = cook_account();
        assert!(!account.api_key.is_empty());
        assert!(account.active);
    }

    #[test]
    fn api_keys_are_unique_per_account() {
        assert_ne!(cook_account().api_key, cook_account().api_key);
    }

    #[test]
    fn create_rejects_invalid_email() {
        let err = StaffAccount::create(
            StaffAccountId::generate(),
            StaffAccountDraft {
                name: "sem email".into(),
                email: "not-an-email".into(),
                role: StaffRole::Operator,
            },
            test_time(),
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn set_role_changes_granted_permissions() {
        let mut account = cook_account();
        assert!(!account.permissions().iter().any(|p| p.as_str() == "menu.write"));

        account.set_role(StaffRole::Manager, test_time());
        assert!(account.permissions().iter().any(|p| p.as_str() == "menu.write"));
    }

    #[test]
    fn deactivated_account_holds_no_permissions() {
        let mut account = cook_account();
        account.deactivate(test_time());
        assert!(account.permissions().is_empty());
    }
}
