use std::sync::Arc;

use nasa_media_search::{
    config::Config,
    routes::{create_router, AppState},
    services::{MediaSearchService, NasaImagesClient},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("nasa_media_search=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    let transport = Arc::new(NasaImagesClient::new(&config)?);
    let search_service = MediaSearchService::from_config(transport, &config);
    let app = create_router(Arc::new(AppState::new(search_service)));

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        addr = %addr,
        api_url = %config.nasa_api_url,
        max_concurrent_fetches = ?config.max_concurrent_fetches,
        "Server running"
    );
    axum::serve(listener, app).await?;

    Ok(())
}
