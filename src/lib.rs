//! Weather daily-log API.
//!
//! Modules:
//! - `config`: environment-driven settings
//! - `error`: error taxonomy and HTTP mapping
//! - `store`: SQLite storage accessor
//! - `models`: persisted rows and request shapes
//! - `handlers`: Axum route handlers

use std::path::Path;
use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod store;

use config::Config;
use store::Store;

#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub config: Arc<Config>,
}

/// Assemble the full router: JSON API plus the static front end, which
/// catches every non-API path and falls back to `index.html`.
pub fn build_router(state: AppState) -> Router {
    let static_dir = Path::new(&state.config.static_dir);
    let front_end =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .route("/api/health", get(handlers::health::health_check))
        .route("/api/logs", get(handlers::logs::list_logs))
        .route("/api/logs", post(handlers::logs::create_log))
        .route("/api/logs/:id", get(handlers::logs::get_log))
        .route("/api/logs/:id", put(handlers::logs::update_log))
        .route("/api/logs/:id", delete(handlers::logs::delete_log))
        .fallback_service(front_end)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
