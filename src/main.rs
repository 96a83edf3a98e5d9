//! Products bridge server: loads config from the environment, connects the datastore, serves the API.

use products_bridge::{app, AppState, Datastore, MemoryStore, PgStore, ServerConfig};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("products_bridge=info,tower_http=info")),
        )
        .init();

    let config = ServerConfig::from_env()?;
    let store: Arc<dyn Datastore> = if config.uses_memory_store() {
        tracing::warn!("DATABASE_URL=memory: rows live in this process only");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(PgStore::connect(&config.database_url, config.max_connections).await?)
    };
    let state = AppState::new(store, config.pretty_json);
    let router = app(state, &config);

    let listener = TcpListener::bind(config.bind_addr()).await?;
    tracing::info!(
        "listening on {}{}/products",
        listener.local_addr()?,
        config.context_path
    );
    axum::serve(listener, router).await?;
    Ok(())
}
