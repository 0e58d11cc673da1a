//! Handlers for short link management endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};

use crate::api::dto::urls::{CreateUrlRequest, UpdateUrlRequest, UrlListResponse, UrlResponse};
use crate::domain::identity::AuthContext;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::origin::resolve_origin;

/// Lists the caller's short links, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// # Response
///
/// ```json
/// {"urls": [{"shortUrl": "...", "originalUrl": "...", ...}], "total": 2}
/// ```
///
/// # Errors
///
/// Returns 401 if the bearer credential is missing or invalid.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ctx: AuthContext,
) -> Result<Json<UrlListResponse>, AppError> {
    let origin = resolve_origin(state.public_origin.as_deref(), &headers)?;

    let records = state.link_service.list(&ctx).await?;

    let urls: Vec<UrlResponse> = records
        .into_iter()
        .map(|record| UrlResponse::from_record(record, &origin))
        .collect();
    let total = urls.len();

    Ok(Json(UrlListResponse { urls, total }))
}

/// Creates a new short link.
///
/// # Endpoint
///
/// `POST /api/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "originalUrl": "https://github.com/example/repo",
///   "slug": "github",
///   "description": "GitHub repository"   // optional
/// }
/// ```
///
/// # Errors
///
/// - 400 `INVALID_URL` / `INVALID_SLUG` - validation failure
/// - 401 `AUTHENTICATION_FAILED` - bad credential
/// - 409 `SLUG_EXISTS` - the caller already uses this slug
pub async fn create_url_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    ctx: AuthContext,
    Json(payload): Json<CreateUrlRequest>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    let origin = resolve_origin(state.public_origin.as_deref(), &headers)?;

    let record = state
        .link_service
        .create(&ctx, payload.original_url, payload.slug, payload.description)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(UrlResponse::from_record(record, &origin)),
    ))
}

/// Retrieves a single short link by slug.
///
/// # Endpoint
///
/// `GET /api/urls/{slug}`
///
/// # Errors
///
/// - 401 `AUTHENTICATION_FAILED` - bad credential
/// - 403 `ACCESS_DENIED` - record belongs to another owner
/// - 404 `URL_NOT_FOUND` - no such slug for this caller
pub async fn get_url_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ctx: AuthContext,
) -> Result<Json<UrlResponse>, AppError> {
    let origin = resolve_origin(state.public_origin.as_deref(), &headers)?;

    let record = state.link_service.get(&ctx, &slug).await?;

    Ok(Json(UrlResponse::from_record(record, &origin)))
}

/// Updates the destination and/or description of a short link.
///
/// # Endpoint
///
/// `PUT /api/urls/{slug}`
///
/// # Request Body
///
/// Only provided fields change; the slug itself is immutable.
///
/// ```json
/// {
///   "originalUrl": "https://new-destination.example.com",
///   "description": null    // null clears, absent leaves unchanged
/// }
/// ```
///
/// # Errors
///
/// - 400 `INVALID_URL` - replacement destination is not absolute
/// - 401 `AUTHENTICATION_FAILED` - bad credential
/// - 403 `ACCESS_DENIED` - record belongs to another owner
/// - 404 `URL_NOT_FOUND` - no such slug for this caller
pub async fn update_url_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ctx: AuthContext,
    Json(payload): Json<UpdateUrlRequest>,
) -> Result<Json<UrlResponse>, AppError> {
    let origin = resolve_origin(state.public_origin.as_deref(), &headers)?;

    let record = state
        .link_service
        .update(&ctx, &slug, payload.into())
        .await?;

    Ok(Json(UrlResponse::from_record(record, &origin)))
}

/// Deletes a short link.
///
/// # Endpoint
///
/// `DELETE /api/urls/{slug}`
///
/// # Errors
///
/// - 401 `AUTHENTICATION_FAILED` - bad credential
/// - 403 `ACCESS_DENIED` - record belongs to another owner
/// - 404 `URL_NOT_FOUND` - no such slug for this caller
pub async fn delete_url_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<StatusCode, AppError> {
    state.link_service.delete(&ctx, &slug).await?;

    Ok(StatusCode::NO_CONTENT)
}
