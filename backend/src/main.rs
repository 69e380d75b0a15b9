use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

use backend::collection::Collector;
use backend::store::{MemoryStore, PgStore, Store};

// Only log events of the workspace crates and the request tracing
const LOG_TARGETS: [&str; 4] = ["backend", "cs2stats", "analysis", "tower_http"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = backend::config::Config::parse();

    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::LevelFilter::from_level(config.log_level))
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            LOG_TARGETS.iter().any(|t| meta.target().starts_with(t))
        }));
    tracing::subscriber::set_global_default(registry)?;

    tracing::info!("Starting...");

    let store: Arc<dyn Store> = match config.database_url.as_deref() {
        Some(url) => Arc::new(PgStore::connect(url, config.database_pool_size).await?),
        None => {
            tracing::warn!("No database configured, data is kept in memory only");
            Arc::new(MemoryStore::new())
        }
    };

    let provider = Arc::new(backend::hltv::Client::new(&config.hltv_api_url)?);
    let collector = Arc::new(Collector::new(
        store.clone(),
        provider,
        config.pacing(),
        config.limits(),
    ));

    let router = axum::Router::new()
        .nest(
            "/api",
            backend::api::router(backend::api::AppState { store, collector }),
        )
        .fallback_service(tower_http::services::ServeDir::new(&config.dashboard_dir))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    tracing::info!("Listening on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
