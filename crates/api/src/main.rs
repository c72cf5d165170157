#[tokio::main]
async fn main() {
    packtrack_observability::init();

    let config = packtrack_api::config::AppConfig::from_env();

    let app = packtrack_api::app::build_app(&config)
        .expect("failed to initialize application state");

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
