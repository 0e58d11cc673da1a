//! DTOs for the short link management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use crate::domain::entities::{RecordPatch, ShortLinkRecord};

/// Request body for `POST /api/urls`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUrlRequest {
    /// Destination; must be an absolute URL.
    pub original_url: String,

    /// User-chosen slug, `[A-Za-z0-9_-]`, 1-50 characters.
    pub slug: String,

    pub description: Option<String>,
}

/// Request body for `PUT /api/urls/{slug}`.
///
/// All fields are optional — only provided fields are changed.
///
/// # `description` semantics
///
/// - **Absent** (`description` not in JSON) → leave existing value unchanged
/// - **`null`** → clear the description
/// - **String** → set new text
#[serde_as]
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUrlRequest {
    /// New destination URL for this link.
    pub original_url: Option<String>,

    /// Description. Absent = no change, null = clear, value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,
}

impl From<UpdateUrlRequest> for RecordPatch {
    fn from(request: UpdateUrlRequest) -> Self {
        Self {
            original_url: request.original_url,
            description: request.description,
        }
    }
}

/// Public projection of a record returned by the API.
///
/// Excludes the owner id; `short_url` is computed per response from the
/// request origin and never stored.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlResponse {
    pub short_url: String,
    pub original_url: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
    pub access_count: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UrlResponse {
    /// Projects a stored record into its public view.
    pub fn from_record(record: ShortLinkRecord, origin: &str) -> Self {
        let short_url = format!("{origin}/{}/{}", record.owner_id, record.slug);

        Self {
            short_url,
            original_url: record.original_url,
            slug: record.slug,
            created_at: record.created_at,
            access_count: record.access_count,
            description: record.description,
        }
    }
}

/// Response body for `GET /api/urls`.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub urls: Vec<UrlResponse>,
    pub total: usize,
}
