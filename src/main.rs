use std::sync::Arc;

use weatherlog_api::{build_router, config::Config, store::Store, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weatherlog_api=debug,tower_http=debug".into()),
        )
        .init();

    let config = Arc::new(Config::from_env());

    let store = Store::connect(&config.db_file).await?;
    store.init_schema().await?;
    tracing::info!(db_file = %config.db_file, "schema ready");

    let state = AppState {
        store: store.clone(),
        config: config.clone(),
    };
    let app = build_router(state);

    let addr = config.listen_addr();
    tracing::info!("Weather tracker running on http://{}", addr);

    // Release the connection whether the server exits cleanly or not.
    let result = serve(&addr, app).await;
    store.close().await;
    result
}

async fn serve(addr: &str, app: axum::Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
