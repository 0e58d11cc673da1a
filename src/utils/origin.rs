//! Response-time origin resolution for computed short URLs.

use axum::http::{HeaderMap, header};

use crate::error::AppError;

/// Resolves the public origin used to build `shortUrl` values.
///
/// A configured origin (from `PUBLIC_ORIGIN`) wins; otherwise the origin is
/// derived from the request's `Host` header assuming HTTPS. The result never
/// carries a trailing slash.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if no origin is configured and the `Host`
/// header is missing or not valid UTF-8.
pub fn resolve_origin(
    configured: Option<&str>,
    headers: &HeaderMap,
) -> Result<String, AppError> {
    if let Some(origin) = configured {
        return Ok(origin.trim_end_matches('/').to_string());
    }

    let host = headers
        .get(header::HOST)
        .ok_or_else(|| AppError::internal("Missing Host header"))?
        .to_str()
        .map_err(|_| AppError::internal("Invalid Host header"))?;

    Ok(format!("https://{host}"))
}
