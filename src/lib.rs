//! Textdedup Server library
//!
//! Exposes the application modules and router assembly for the server
//! binary, the integration tests, and the benchmarks.
//!
//! # Modules
//!
//! - `dedup`: normalization, fingerprinting, and duplicate classification
//! - `extract`: plain-text extraction from text/PDF/DOCX uploads
//! - `session`: per-login sessions owning upload history and ledger
//! - `auth` / `db`: registration, login, and the persisted credential store
//! - `routes`: HTTP surface

pub mod auth;
pub mod config;
pub mod db;
pub mod dedup;
pub mod error;
pub mod extract;
pub mod routes;
pub mod session;
pub mod state;

use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use state::AppState;

/// Assemble the full application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Leave headroom above the file cap for multipart framing
    let body_limit = state.config().upload.max_file_size as usize + 64 * 1024;

    Router::new()
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1/auth", routes::auth::router())
        .nest("/api/v1/uploads", routes::uploads::router())
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
