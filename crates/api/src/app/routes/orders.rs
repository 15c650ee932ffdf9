use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use forno_orders::{OrderDraft, OrderStatus};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_order).get(list_orders))
        .route("/:id", get(get_order))
        .route("/:id/status", put(set_order_status))
}

#[derive(Debug, Deserialize)]
pub struct ListOrdersQuery {
    /// Optional status filter; the kitchen queue asks for `pendente`-class
    /// statuses one at a time.
    pub status: Option<OrderStatus>,
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<ListOrdersQuery>,
) -> axum::response::Response {
    let orders = match services.orders.list() {
        Ok(orders) => orders,
        Err(e) => return errors::kv_error_to_response(e),
    };

    let orders: Vec<_> = match query.status {
        Some(status) => orders.into_iter().filter(|o| o.status == status).collect(),
        None => orders,
    };

    (StatusCode::OK, Json(json!({ "pedidos": orders }))).into_response()
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match services.orders.get(&id) {
        Ok(Some(order)) => (StatusCode::OK, Json(json!({ "pedido": order }))).into_response(),
        Ok(None) => errors::not_found("pedido"),
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(draft): Json<OrderDraft>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "orders.create") {
        return resp;
    }

    match services.create_order(draft, Utc::now()) {
        Ok(order) => (StatusCode::CREATED, Json(json!({ "pedido": order }))).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn set_order_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetOrderStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "orders.update_status") {
        return resp;
    }

    let mut order = match services.orders.get(&id) {
        Ok(Some(order)) => order,
        Ok(None) => return errors::not_found("pedido"),
        Err(e) => return errors::kv_error_to_response(e),
    };

    if let Err(e) = order.set_status(body.status, Utc::now()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.orders.put(&id, &order) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "pedido": order }))).into_response()
}
