//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short URL to its destination.
///
/// # Endpoint
///
/// `GET /{owner_id}/{slug}` (public, no authentication)
///
/// # Request Flow
///
/// 1. Read the record at the owner-scoped key
/// 2. Respond `302 Found` with the destination in `Location`
/// 3. The hit (access count + last-accessed timestamp) is queued for the
///    background worker; the response never waits on that write and a failed
///    write is logged, not surfaced
///
/// # Errors
///
/// Returns 404 `URL_NOT_FOUND` if no record exists; nothing is written in
/// that case.
pub async fn redirect_handler(
    Path((owner_id, slug)): Path<(String, String)>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let record = state.redirect_service.resolve(&owner_id, &slug).await?;

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, record.original_url)],
    )
        .into_response())
}
