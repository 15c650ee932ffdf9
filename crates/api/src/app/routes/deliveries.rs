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

use forno_deliveries::{Courier, CourierDraft, CourierId, Delivery, DeliveryDraft, DeliveryId};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(dispatch_delivery).get(list_deliveries))
        .route("/:id/status", put(set_delivery_status))
}

pub fn couriers_router() -> Router {
    Router::new()
        .route("/", post(register_courier).get(list_couriers))
        .route("/:id/status", put(set_courier_status))
}

pub async fn list_deliveries(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.deliveries.list() {
        Ok(deliveries) => (StatusCode::OK, Json(json!({ "entregas": deliveries }))).into_response(),
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn dispatch_delivery(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(draft): Json<DeliveryDraft>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "deliveries.create") {
        return resp;
    }

    let delivery = match Delivery::dispatch(DeliveryId::generate(), draft, Utc::now()) {
        Ok(delivery) => delivery,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.deliveries.put(&delivery.id.to_string(), &delivery) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::CREATED, Json(json!({ "entrega": delivery }))).into_response()
}

pub async fn set_delivery_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetDeliveryStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "deliveries.update_status") {
        return resp;
    }

    match services.update_delivery_status(&id, body.status, body.courier_id, Utc::now()) {
        Ok(Some(delivery)) => (StatusCode::OK, Json(json!({ "entrega": delivery }))).into_response(),
        Ok(None) => errors::not_found("entrega"),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_couriers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.couriers.list() {
        Ok(couriers) => (StatusCode::OK, Json(json!({ "motoboys": couriers }))).into_response(),
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn register_courier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(draft): Json<CourierDraft>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "deliveries.manage_couriers") {
        return resp;
    }

    let courier = match Courier::register(CourierId::generate(), draft, Utc::now()) {
        Ok(courier) => courier,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.couriers.put(&courier.id.to_string(), &courier) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::CREATED, Json(json!({ "motoboy": courier }))).into_response()
}

pub async fn set_courier_status(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::SetCourierStatusRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "deliveries.manage_couriers") {
        return resp;
    }

    let mut courier = match services.couriers.get(&id) {
        Ok(Some(courier)) => courier,
        Ok(None) => return errors::not_found("motoboy"),
        Err(e) => return errors::kv_error_to_response(e),
    };

    courier.set_status(body.status, Utc::now());
    if let Err(e) = services.couriers.put(&id, &courier) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "motoboy": courier }))).into_response()
}
