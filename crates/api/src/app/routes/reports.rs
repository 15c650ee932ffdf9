use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use forno_reports::{ReportPeriod, financial_summary, low_stock, popular_products, sales_summary};

use crate::app::errors;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/vendas", get(sales))
        .route("/produtos-populares", get(popular))
        .route("/estoque-baixo", get(low_stock_alerts))
        .route("/financeiro", get(financial))
}

#[derive(Debug, Deserialize)]
pub struct PeriodQuery {
    #[serde(default)]
    pub periodo: Option<ReportPeriod>,
}

pub async fn sales(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<PeriodQuery>,
) -> axum::response::Response {
    let orders = match services.orders.list() {
        Ok(orders) => orders,
        Err(e) => return errors::kv_error_to_response(e),
    };

    let summary = sales_summary(&orders, query.periodo.unwrap_or_default(), Utc::now());
    (StatusCode::OK, Json(summary)).into_response()
}

pub async fn popular(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let orders = match services.orders.list() {
        Ok(orders) => orders,
        Err(e) => return errors::kv_error_to_response(e),
    };

    let ranking = popular_products(&orders);
    (StatusCode::OK, Json(json!({ "produtosPopulares": ranking }))).into_response()
}

pub async fn low_stock_alerts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = match services.stock.list() {
        Ok(items) => items,
        Err(e) => return errors::kv_error_to_response(e),
    };

    let alerts = low_stock(&items);
    (StatusCode::OK, Json(json!({ "alertas": alerts }))).into_response()
}

pub async fn financial(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<PeriodQuery>,
) -> axum::response::Response {
    let orders = match services.orders.list() {
        Ok(orders) => orders,
        Err(e) => return errors::kv_error_to_response(e),
    };

    let summary = financial_summary(&orders, query.periodo.unwrap_or_default(), Utc::now());
    (StatusCode::OK, Json(summary)).into_response()
}
