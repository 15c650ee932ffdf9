use axum::http::StatusCode;

use forno_auth::Permission;

use crate::app::errors;
use crate::context::PrincipalContext;

/// Enforce a named permission for the request's principal.
///
/// Mutating handlers call this before touching the store; read endpoints
/// stay open to any resolved principal.
pub fn require_permission(
    principal: &PrincipalContext,
    name: &'static str,
) -> Result<(), axum::response::Response> {
    forno_auth::authorize(principal.permissions(), &Permission::new(name))
        .map_err(|e| errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
}
