//! API route configuration.
//!
//! Every endpoint here authenticates the caller via the [`AuthContext`]
//! extractor; identity is resolved before a handler body runs.
//!
//! [`AuthContext`]: crate::domain::identity::AuthContext

use axum::{Router, routing::get};

use crate::api::handlers::{
    create_url_handler, delete_url_handler, get_url_handler, list_urls_handler,
    update_url_handler,
};
use crate::state::AppState;

/// All authenticated API routes.
///
/// # Endpoints
///
/// - `GET    /urls`        - List the caller's short links
/// - `POST   /urls`        - Create a short link
/// - `GET    /urls/{slug}` - Fetch one short link
/// - `PUT    /urls/{slug}` - Update destination/description
/// - `DELETE /urls/{slug}` - Delete a short link
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route(
            "/urls/{slug}",
            get(get_url_handler)
                .put(update_url_handler)
                .delete(delete_url_handler),
        )
}
