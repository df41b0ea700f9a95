use anyhow::Context;
use tracing_subscriber::EnvFilter;

use cinecluster_api::{
    config::Config,
    routes::{create_router, AppState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;

    // A missing or broken catalog leaves the server up in no-data mode
    let state = AppState::from_config(&config);
    if let Some(store) = state.catalog.get() {
        tracing::info!(total_movies = store.len(), "Movie catalog ready");
    }

    let app = create_router(state);

    let address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    tracing::info!(
        address = %address,
        static_dir = %config.static_dir.display(),
        "Server running"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
