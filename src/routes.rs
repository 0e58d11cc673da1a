//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`              - Health check: store + hit queue (public)
//! - `/api/urls*`                - REST API (Bearer token required)
//! - `GET  /{owner_id}/{slug}`   - Short link redirect (public)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (stricter on the API)
//! - **Path normalization** - Trailing slash handling

use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
///
/// The redirect route is registered last so `/health` and `/api` take
/// precedence over the `/{owner_id}/{slug}` wildcard.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes().layer(rate_limit::secure_layer());

    let redirect_router = Router::new()
        .route("/{owner_id}/{slug}", get(redirect_handler))
        .layer(rate_limit::layer());

    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .merge(redirect_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
