use double_santa::{
    config::Config,
    database::setup_database,
    router::{AppState, create_router, shutdown_signal},
    sheet::setup_templates,
    source::build_sources,
    store::{DbStore, ExchangeStore},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let db = setup_database(&config.database_url).await?;
    let store: Arc<dyn ExchangeStore> = Arc::new(DbStore::new(db));
    let sources = build_sources(&config, store.clone())?;
    match &config.snapshot_url {
        Some(url) => info!("Published snapshot expected at {}", url),
        None => info!("No SNAPSHOT_URL set, serving from the local store only"),
    }

    let state = AppState {
        store,
        sources: Arc::new(sources),
        templates: Arc::new(setup_templates()?),
    };
    let app = create_router(state);

    let listener = TcpListener::bind(config.bind_addr).await?;
    info!("Listening on {}", config.bind_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
