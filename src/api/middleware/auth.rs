//! Bearer token authentication extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBearer;

use crate::domain::identity::AuthContext;
use crate::error::AppError;
use crate::state::AppState;

/// Extracts and verifies the caller's identity before a handler runs.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <id token>
/// ```
///
/// # Flow
///
/// 1. Pull the token from the `Authorization` header
/// 2. Verify it against the configured identity provider
/// 3. Hand the handler an [`AuthContext`] carrying the verified owner id
///
/// A missing or malformed header fails here, before any business logic or
/// store access. All failures map to `401 AUTHENTICATION_FAILED`.
impl FromRequestParts<AppState> for AuthContext {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let AuthBearer(token) = AuthBearer::from_request_parts(parts, &())
            .await
            .map_err(|_| {
                AppError::authentication_failed("Authorization header is missing or invalid")
            })?;

        let user = state.verifier.verify(&token).await?;

        Ok(AuthContext::from(user))
    }
}
