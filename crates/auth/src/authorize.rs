use std::collections::HashSet;

use thiserror::Error;

use crate::permissions::Permission;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),
}

/// Authorize a set of granted permissions against a required one.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(granted: &[Permission], required: &Permission) -> Result<(), AuthzError> {
    let perms: HashSet<&str> = granted.iter().map(|p| p.as_str()).collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roles::StaffRole;

    #[test]
    fn wildcard_grants_everything() {
        let granted = StaffRole::Admin.permissions();
        assert!(authorize(&granted, &Permission::new("staff.manage")).is_ok());
        assert!(authorize(&granted, &Permission::new("anything.at_all")).is_ok());
    }

    #[test]
    fn exact_match_grants() {
        let granted = StaffRole::Cook.permissions();
        assert!(authorize(&granted, &Permission::new("orders.update_status")).is_ok());
    }

    #[test]
    fn missing_permission_is_forbidden_with_its_name() {
        let granted = StaffRole::Operator.permissions();
        let err = authorize(&granted, &Permission::new("menu.write")).unwrap_err();
        assert_eq!(err, AuthzError::Forbidden("menu.write".to_string()));
    }

    #[test]
    fn empty_grant_set_denies() {
        let err = authorize(&[], &Permission::new("orders.read")).unwrap_err();
        assert!(matches!(err, AuthzError::Forbidden(_)));
    }
}
