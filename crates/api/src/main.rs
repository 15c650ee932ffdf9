#[tokio::main]
async fn main() {
    forno_observability::init();

    let config = forno_api::config::Config::load();
    let app = forno_api::app::build_app(config.anon_key);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{}: {e}", config.port));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
