//! Catalog server: reads config from env (and `.env`), opens the SQLite store, mounts all routes.

use library_catalog::{app_router, AppConfig, AppState, CatalogStore};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("library_catalog=info,tower_http=info")),
        )
        .init();

    let config = AppConfig::from_env()?;
    let store = CatalogStore::connect(&config.database_url).await?;
    tracing::info!(database = %config.database_url, "catalog store ready");

    let state = AppState::from_config(store, &config)?;
    if !config.cover.enabled {
        tracing::info!("cover lookup disabled");
    }

    let app = app_router(state);
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
