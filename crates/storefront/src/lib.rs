//! Pehenava storefront library.
//!
//! This crate provides the storefront server as a library, allowing it to be
//! tested and reused by the CLI.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod data;
pub mod error;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the full application router: API routes, health check and the SPA
/// fallback, with request tracing.
pub fn app(state: AppState) -> Router {
    let spa = routes::spa::service(&state.config().static_dir);

    Router::new()
        .merge(routes::routes())
        .fallback_service(spa)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
