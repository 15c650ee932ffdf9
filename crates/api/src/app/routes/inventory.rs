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

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(upsert_stock_item).get(list_stock))
        .route("/:id/quantidade", put(set_quantity))
}

pub async fn list_stock(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.stock.list() {
        Ok(items) => (StatusCode::OK, Json(json!({ "estoque": items }))).into_response(),
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn upsert_stock_item(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(body): Json<dto::UpsertStockItemRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "inventory.write") {
        return resp;
    }

    match services.upsert_stock_item(body.id, body.draft, Utc::now()) {
        Ok(item) => (StatusCode::CREATED, Json(json!({ "item": item }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn set_quantity(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetStockQuantityRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "inventory.write") {
        return resp;
    }

    let mut item = match services.stock.get(&id) {
        Ok(Some(item)) => item,
        Ok(None) => return errors::not_found("item de estoque"),
        Err(e) => return errors::kv_error_to_response(e),
    };

    if let Err(e) = item.set_quantity(body.quantity, Utc::now()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.stock.put(&id, &item) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "item": item }))).into_response()
}
