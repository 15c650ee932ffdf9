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

use forno_invoicing::{Invoice, InvoiceDraft, InvoiceId};

use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(issue_invoice).get(list_invoices))
        .route("/:id/cancelar", put(cancel_invoice))
}

pub async fn list_invoices(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.invoices.list() {
        Ok(invoices) => (StatusCode::OK, Json(json!({ "notas": invoices }))).into_response(),
        Err(e) => errors::kv_error_to_response(e),
    }
}

pub async fn issue_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(draft): Json<InvoiceDraft>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "invoices.issue") {
        return resp;
    }

    let series = draft.series.clone().unwrap_or_else(|| "1".to_string());
    let number = match services.next_invoice_number(&series) {
        Ok(number) => number,
        Err(e) => return errors::service_error_to_response(e),
    };

    let invoice = match Invoice::issue(InvoiceId::generate(), number, draft, Utc::now()) {
        Ok(invoice) => invoice,
        Err(e) => return errors::domain_error_to_response(e),
    };
    if let Err(e) = services.invoices.put(&invoice.id.to_string(), &invoice) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::CREATED, Json(json!({ "nota": invoice }))).into_response()
}

pub async fn cancel_invoice(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(resp) = common::require_permission(&principal, "invoices.cancel") {
        return resp;
    }

    let mut invoice = match services.invoices.get(&id) {
        Ok(Some(invoice)) => invoice,
        Ok(None) => return errors::not_found("nota fiscal"),
        Err(e) => return errors::kv_error_to_response(e),
    };

    if let Err(e) = invoice.cancel(Utc::now()) {
        return errors::domain_error_to_response(e);
    }
    if let Err(e) = services.invoices.put(&id, &invoice) {
        return errors::kv_error_to_response(e);
    }

    (StatusCode::OK, Json(json!({ "nota": invoice }))).into_response()
}
