use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use crate::context::PrincipalContext;

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(serde_json::json!({ "status": "ok" })))
}

pub async fn whoami(Extension(principal): Extension<PrincipalContext>) -> impl IntoResponse {
    Json(serde_json::json!({
        "subject": principal.subject(),
        "role": principal.role().map(|r| r.as_str()),
        "permissions": principal
            .permissions()
            .iter()
            .map(|p| p.as_str())
            .collect::<Vec<_>>(),
    }))
}
