use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{post, put},
};
use chrono::Utc;
use serde_json::json;

use forno_auth::{StaffAccount, StaffAccountDraft, StaffAccountId};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_staff).get(list_staff))
        .route("/:id/role", put(set_staff_role))
}

pub async fn list_staff(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.staff.list() {
        Ok(accounts) => {
            let items: Vec<_> = accounts.iter().map(dto::staff_to_json).collect();
            (StatusCode::OK, Json(json!({ "usuarios": items }))).into_response()
        }
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn create_staff(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(draft): Json<StaffAccountDraft>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "staff.manage") {
        return resp;
    }

    let account = match StaffAccount::create(StaffAccountId::generate(), draft, Utc::now()) {
        Ok(account) => account,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.staff.put(&account.id.to_string(), &account) {
        return errors::kv_error_to_response(e);
    }

    // The api key is handed over exactly once, on creation.
    let mut body = dto::staff_to_json(&account);
    body["apiKey"] = json!(account.api_key);
    (StatusCode::CREATED, Json(json!({ "usuario": body }))).into_response()
}

pub async fn set_staff_role(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetStaffRoleRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "staff.manage") {
        return resp;
    }

    let mut account = match services.staff.get(&id) {
        Ok(Some(account)) => account,
        Ok(None) => return errors::not_found("usuário"),
        Err(e) => return errors::kv_error_to_response(e),
    };

    account.set_role(body.role, Utc::now());
    if let Err(e) = services.staff.put(&id, &account) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "usuario": dto::staff_to_json(&account) }))).into_response()
}
