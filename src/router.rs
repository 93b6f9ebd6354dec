use crate::{
    routes::{
        manage::{codes_sheet, export_snapshot, reset},
        reveal::reveal,
        setup::{setup, status},
    },
    source::SnapshotSource,
    store::ExchangeStore,
};
use axum::{
    Router,
    routing::{get, post},
};
use minijinja::Environment;
use std::sync::Arc;
use tokio::signal;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ExchangeStore>,
    /// Tried in order whenever the current table is needed.
    pub sources: Arc<Vec<SnapshotSource>>,
    pub templates: Arc<Environment<'static>>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .route("/api/setup", post(setup))
        .route("/api/reveal", post(reveal))
        .route("/api/reset", post(reset))
        .route("/data.json", get(export_snapshot))
        .route("/codes.txt", get(codes_sheet))
        .with_state(state)
        // The reveal page may be served from a different origin.
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
