use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::TomlConfig;
use crate::server::handlers;

/// Shared state for the import routes.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<TomlConfig>,
}

impl AppState {
    pub fn new(config: TomlConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }
}

/// Build the service router.
///
/// - POST /api/import
/// - GET  /api/health
/// - GET  /api/template
pub fn import_router(state: AppState) -> Router {
    let body_limit = state.config.server.max_upload_bytes;

    Router::new()
        .route("/api/import", post(handlers::import_customers))
        .route("/api/health", get(handlers::health_check))
        .route("/api/template", get(handlers::download_template))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
