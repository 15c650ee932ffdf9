use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::app::services::AppServices;
use crate::context::PrincipalContext;

#[derive(Clone)]
pub struct AuthState {
    pub anon_key: Arc<str>,
    pub services: Arc<AppServices>,
}

/// Resolve the request's principal from its bearer token.
///
/// - No token, or the configured anon key: the development principal
///   (wildcard permission). This is the original deployment's open door for
///   the bundled dashboard.
/// - Anything else must match an active staff account's api key.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let principal = match extract_bearer(req.headers())? {
        None => PrincipalContext::development(),
        Some(token) if token == &*state.anon_key => PrincipalContext::development(),
        Some(token) => {
            let account = state
                .services
                .staff_by_api_key(token)
                .map_err(|e| {
                    tracing::error!("staff lookup failed during auth: {e}");
                    StatusCode::INTERNAL_SERVER_ERROR
                })?
                .ok_or(StatusCode::UNAUTHORIZED)?;

            if !account.active {
                return Err(StatusCode::UNAUTHORIZED);
            }
            PrincipalContext::staff(&account)
        }
    };

    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

/// A missing Authorization header is anonymous; a present but malformed one
/// is rejected.
fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, StatusCode> {
    let Some(header) = headers.get(axum::http::header::AUTHORIZATION) else {
        return Ok(None);
    };

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?
        .trim();

    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(Some(token))
}
