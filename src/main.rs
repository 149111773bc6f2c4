use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use larder_api::{
    config::Config,
    services::{EmbeddingStore, RecommendationEngine},
    state::AppState,
    stores::memory,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env()?;

    // In-memory demo stores; a deployment swaps in real CatalogStore /
    // UserStore implementations here.
    let (catalog, users, demo_user_id) = memory::demo_stores().await;
    tracing::info!(%demo_user_id, "Seeded demo catalog and user");

    let engine = Arc::new(RecommendationEngine::new(
        catalog,
        users,
        EmbeddingStore::new(&config.embeddings_path),
        config.index_batch_size,
    ));

    // Missing or corrupt embedding artifact is startup-fatal
    engine.warm_up().await?;

    let state = AppState::new(engine);
    let app = larder_api::create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
