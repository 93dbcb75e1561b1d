use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use mysqlexec::exec::QueryExecutor;
use sqlgen::translate::Translator;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::handlers;

/// State that's passed to all handlers.
///
/// Read-only after startup; safe for unlimited concurrent requests.
pub struct ServerState {
    /// Turns questions into candidate SQL.
    pub translator: Translator,
    /// Runs gated statements against the store.
    pub executor: Arc<dyn QueryExecutor>,
}

/// Build the service router.
///
/// CORS is wide open, the browser widget calls from the CRM's origin.
pub fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/query", post(handlers::query))
        .route("/health", get(handlers::health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve requests on the listener until it fails.
pub async fn serve(listener: TcpListener, state: Arc<ServerState>) -> std::io::Result<()> {
    info!(addr = %listener.local_addr()?, "query service listening");
    axum::serve(listener, router(state)).await
}
