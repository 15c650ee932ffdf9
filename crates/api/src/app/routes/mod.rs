use axum::{Router, routing::get};

pub mod common;
pub mod customers;
pub mod deliveries;
pub mod inventory;
pub mod invoices;
pub mod menu;
pub mod orders;
pub mod reports;
pub mod staff;
pub mod system;

/// Router for all authenticated endpoints.
///
/// Paths keep the published Portuguese surface the dashboard calls.
pub fn router() -> Router {
    Router::new()
        .route("/whoami", get(system::whoami))
        .nest("/pedidos", orders::router())
        .nest("/produtos", menu::router())
        .nest("/estoque", inventory::router())
        .nest("/clientes", customers::router())
        .nest("/relatorios", reports::router())
        .nest("/notas", invoices::router())
        .nest("/entregas", deliveries::router())
        .nest("/motoboys", deliveries::couriers_router())
        .nest("/usuarios", staff::router())
}
