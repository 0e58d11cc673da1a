//! Application error taxonomy.
//!
//! Every failure the service can surface is one of the variants below. The
//! wire format is `{"error": "<KIND>", "message": "<human text>"}` with the
//! HTTP status implied by the kind, so clients can match on `error`
//! exhaustively instead of string-sniffing messages.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

/// JSON error body: `{"error": "...", "message": "..."}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

/// Closed set of service errors.
///
/// Variants map 1:1 onto wire kinds and HTTP statuses:
///
/// | variant | kind | status |
/// |---|---|---|
/// | `AuthenticationFailed` | `AUTHENTICATION_FAILED` | 401 |
/// | `AccessDenied` | `ACCESS_DENIED` | 403 |
/// | `InvalidUrl` | `INVALID_URL` | 400 |
/// | `InvalidSlug` | `INVALID_SLUG` | 400 |
/// | `SlugAlreadyExists` | `SLUG_EXISTS` | 409 |
/// | `UrlNotFound` | `URL_NOT_FOUND` | 404 |
/// | `Internal` | `INTERNAL_ERROR` | 500 |
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    AuthenticationFailed { message: String },

    #[error("{message}")]
    AccessDenied { message: String },

    #[error("{message}")]
    InvalidUrl { message: String },

    #[error("{message}")]
    InvalidSlug { message: String },

    #[error("{message}")]
    SlugAlreadyExists { message: String },

    #[error("{message}")]
    UrlNotFound { message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn authentication_failed(message: impl Into<String>) -> Self {
        Self::AuthenticationFailed {
            message: message.into(),
        }
    }

    pub fn access_denied(message: impl Into<String>) -> Self {
        Self::AccessDenied {
            message: message.into(),
        }
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl {
            message: message.into(),
        }
    }

    pub fn invalid_slug(message: impl Into<String>) -> Self {
        Self::InvalidSlug {
            message: message.into(),
        }
    }

    pub fn slug_already_exists(message: impl Into<String>) -> Self {
        Self::SlugAlreadyExists {
            message: message.into(),
        }
    }

    pub fn url_not_found(message: impl Into<String>) -> Self {
        Self::UrlNotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// The wire kind string for the `error` field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed { .. } => "AUTHENTICATION_FAILED",
            Self::AccessDenied { .. } => "ACCESS_DENIED",
            Self::InvalidUrl { .. } => "INVALID_URL",
            Self::InvalidSlug { .. } => "INVALID_SLUG",
            Self::SlugAlreadyExists { .. } => "SLUG_EXISTS",
            Self::UrlNotFound { .. } => "URL_NOT_FOUND",
            Self::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// The HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::AuthenticationFailed { .. } => StatusCode::UNAUTHORIZED,
            Self::AccessDenied { .. } => StatusCode::FORBIDDEN,
            Self::InvalidUrl { .. } | Self::InvalidSlug { .. } => StatusCode::BAD_REQUEST,
            Self::SlugAlreadyExists { .. } => StatusCode::CONFLICT,
            Self::UrlNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(kind = body.error, message = %body.message, "Request failed");
        }

        (status, Json(body)).into_response()
    }
}

/// Maps a storage-layer serialization failure to [`AppError::Internal`].
///
/// Stored records are JSON; a record that no longer deserializes is treated
/// as an internal fault, never as "not found".
pub fn map_serde_error(e: serde_json::Error) -> AppError {
    AppError::internal(format!("Corrupt stored record: {e}"))
}
