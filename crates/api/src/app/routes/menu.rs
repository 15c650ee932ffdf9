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

use forno_menu::{Product, ProductDraft, ProductId, ProductUpdate};

use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", put(update_product))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products.list() {
        Ok(products) => (StatusCode::OK, Json(json!({ "produtos": products }))).into_response(),
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(draft): Json<ProductDraft>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "menu.write") {
        return resp;
    }

    let product = match Product::create(ProductId::generate(), draft, Utc::now()) {
        Ok(product) => product,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.products.put(&product.id.to_string(), &product) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::CREATED, Json(json!({ "produto": product }))).into_response()
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
    Json(update): Json<ProductUpdate>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "menu.write") {
        return resp;
    }

    let mut product = match services.products.get(&id) {
        Ok(Some(product)) => product,
        Ok(None) => return errors::not_found("produto"),
        Err(e) => return errors::kv_error_to_response(e),
    };

    if let Err(e) = product.apply_update(update, Utc::now()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.products.put(&id, &product) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "produto": product }))).into_response()
}
