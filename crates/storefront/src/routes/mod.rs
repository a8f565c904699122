//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # API
//! POST /api/send-application   - Seller application (two emails)
//! GET  /api/products           - Catalog filtered by ?gender= and ?occasion=
//! GET  /api/markets            - Traditional markets and locator stats
//! GET  /api/shops/{id}         - Shop detail
//!
//! # SPA
//! GET  /*                      - Built assets, falling back to index.html
//! ```

pub mod applications;
pub mod catalog;
pub mod markets;
pub mod spa;

use axum::{
    Router,
    routing::{get, post},
};

use crate::error::AppError;
use crate::state::AppState;

/// Create the JSON API router.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/send-application", post(applications::send_application))
        .route("/products", get(catalog::products))
        .route("/markets", get(markets::markets))
        .route("/shops/{id}", get(markets::shop))
        // Unknown API paths must not fall through to the SPA shell
        .fallback(api_not_found)
}

/// Create all routes for the storefront, minus the SPA fallback.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/api", api_routes())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

async fn api_not_found() -> AppError {
    AppError::NotFound("Not found".to_string())
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;

    #[tokio::test]
    async fn test_health() {
        assert_eq!(health().await, "ok");
    }

    #[tokio::test]
    async fn test_api_not_found_status() {
        assert_eq!(
            api_not_found().await.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }
}
