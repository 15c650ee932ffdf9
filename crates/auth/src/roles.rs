use serde::{Deserialize, Serialize};

use crate::permissions::Permission;

/// Staff roles of the back office.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffRole {
    Admin,
    Manager,
    Cook,
    Operator,
}

impl StaffRole {
    pub fn as_str(self) -> &'static str {
        match self {
            StaffRole::Admin => "admin",
            StaffRole::Manager => "manager",
            StaffRole::Cook => "cook",
            StaffRole::Operator => "operator",
        }
    }

    /// Permissions granted by this role.
    ///
    /// Read endpoints are unauthenticated within the back office; the table
    /// covers mutations plus a read marker per module for clients that want
    /// to grey out screens.
    pub fn permissions(self) -> Vec<Permission> {
        let names: &[&'static str] = match self {
            StaffRole::Admin => &["*"],
            StaffRole::Manager => &[
                "orders.read",
                "orders.create",
                "orders.update_status",
                "menu.read",
                "menu.write",
                "inventory.read",
                "inventory.write",
                "customers.read",
                "customers.create",
                "customers.update",
                "invoices.read",
                "invoices.issue",
                "invoices.cancel",
                "deliveries.read",
                "deliveries.create",
                "deliveries.update_status",
                "deliveries.manage_couriers",
                "reports.read",
                "staff.read",
            ],
            StaffRole::Cook => &[
                "orders.read",
                "orders.update_status",
                "inventory.read",
            ],
            StaffRole::Operator => &[
                "orders.read",
                "orders.create",
                "menu.read",
                "customers.read",
                "customers.create",
                "deliveries.read",
            ],
        };
        names.iter().map(|n| Permission::new(*n)).collect()
    }
}

impl core::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_gets_the_wildcard() {
        let perms = StaffRole::Admin.permissions();
        assert!(perms.iter().any(|p| p.is_wildcard()));
    }

    #[test]
    fn cook_can_work_the_kitchen_but_not_the_menu() {
        let perms = StaffRole::Cook.permissions();
        assert!(perms.iter().any(|p| p.as_str() == "orders.update_status"));
        assert!(!perms.iter().any(|p| p.as_str() == "menu.write"));
    }

    #[test]
    fn operator_cannot_manage_staff() {
        let perms = StaffRole::Operator.permissions();
        assert!(!perms.iter().any(|p| p.as_str() == "staff.manage"));
        assert!(!perms.iter().any(|p| p.is_wildcard()));
    }
}
