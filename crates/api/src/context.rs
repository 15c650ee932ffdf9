use forno_auth::{Permission, StaffAccount, StaffRole};

/// The authenticated principal for a request.
///
/// Resolved by the auth middleware and injected as a request extension; must
/// be present on every route behind the middleware.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    subject: String,
    role: Option<StaffRole>,
    permissions: Vec<Permission>,
}

impl PrincipalContext {
    /// The development principal (anon key or no token): full access.
    pub fn development() -> Self {
        Self {
            subject: "dev".to_string(),
            role: None,
            permissions: vec![Permission::new("*")],
        }
    }

    /// Principal resolved from a staff account's api key.
    pub fn staff(account: &StaffAccount) -> Self {
        Self {
            subject: account.id.to_string(),
            role: Some(account.role),
            permissions: account.permissions(),
        }
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn role(&self) -> Option<StaffRole> {
        self.role
    }

    pub fn permissions(&self) -> &[Permission] {
        &self.permissions
    }
}
