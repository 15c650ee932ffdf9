use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
};
use chrono::Utc;
use serde_json::json;

use forno_customers::{Customer, CustomerDraft, CustomerId};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(register_customer).get(list_customers))
        .route("/telefone/:telefone", get(get_customer_by_phone))
        .route("/:id/pontos", put(add_loyalty_points))
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.customers.list() {
        Ok(customers) => (StatusCode::OK, Json(json!({ "clientes": customers }))).into_response(),
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn register_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(draft): Json<CustomerDraft>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "customers.create") {
        return resp;
    }

    let customer = match Customer::create(CustomerId::generate(), draft, Utc::now()) {
        Ok(customer) => customer,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.customers.put(&customer.id.to_string(), &customer) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::CREATED, Json(json!({ "cliente": customer }))).into_response()
}

/// Phone lookup used by the order-taking screen: linear scan, first match.
pub async fn get_customer_by_phone(
    Extension(services): Extension<Arc<AppServices>>,
    Path(telefone): Path<String>,
) -> axum::response::Response {
    let customers = match services.customers.list() {
        Ok(customers) => customers,
        Err(e) => return errors::kv_error_to_response(e),
    };

    match customers
        .into_iter()
        .find(|c| c.phone.as_deref() == Some(telefone.as_str()))
    {
        Some(customer) => (StatusCode::OK, Json(json!({ "cliente": customer }))).into_response(),
        None => errors::not_found("cliente"),
    }
}

pub async fn add_loyalty_points(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(body): Json<dto::AddLoyaltyPointsRequest>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "customers.update") {
        return resp;
    }

    let mut customer = match services.customers.get(&id) {
        Ok(Some(customer)) => customer,
        Ok(None) => return errors::not_found("cliente"),
        Err(e) => return errors::kv_error_to_response(e),
    };

    if let Err(e) = customer.accrue(body.points, body.purchase_total_cents, Utc::now()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.customers.put(&id, &customer) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "cliente": customer }))).into_response()
}
