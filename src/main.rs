use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use storefront::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    db::create_pool,
    services::{AccountStore, InMemoryAccountStore, PgAccountStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;

    // Without a catalog there is nothing to serve
    let catalog = Catalog::load(&config.catalog_path)?;
    let trending = Catalog::load(&config.trending_path)?;

    let accounts: Arc<dyn AccountStore> = match &config.database_url {
        Some(url) => Arc::new(PgAccountStore::new(create_pool(url).await?)),
        None => {
            tracing::warn!("DATABASE_URL not set, accounts will not survive a restart");
            Arc::new(InMemoryAccountStore::new())
        }
    };

    let state =
        AppState::new(catalog, trending, accounts).with_trending_count(config.trending_count);
    state.recommender.warm();

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "Storefront listening");
    axum::serve(listener, app).await?;

    Ok(())
}
