//! Short link record, the sole persistent entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored short link, serialized as JSON under its owner-scoped key.
///
/// `(owner_id, slug)` identifies the record; both are fixed at creation and
/// never mutated afterwards. `access_count` and `last_accessed` are touched
/// only by the redirect path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortLinkRecord {
    pub original_url: String,
    pub slug: String,
    pub owner_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed: Option<DateTime<Utc>>,
    #[serde(default)]
    pub access_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ShortLinkRecord {
    /// Creates a fresh record with a zero access count.
    pub fn new(
        original_url: String,
        slug: String,
        owner_id: String,
        created_at: DateTime<Utc>,
        description: Option<String>,
    ) -> Self {
        Self {
            original_url,
            slug,
            owner_id,
            created_at,
            last_accessed: None,
            access_count: 0,
            description,
        }
    }

    /// Returns a copy with the access counter advanced by one and
    /// `last_accessed` stamped to `now`.
    pub fn with_hit(&self, now: DateTime<Utc>) -> Self {
        Self {
            access_count: self.access_count + 1,
            last_accessed: Some(now),
            ..self.clone()
        }
    }
}

/// Partial update for an existing record.
///
/// `None` fields are left unchanged. For `description`,
/// `Some(None)` clears the text and `Some(Some(s))` replaces it.
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub original_url: Option<String>,
    pub description: Option<Option<String>>,
}

impl RecordPatch {
    /// Applies the patch to `record`, leaving slug, owner and creation time
    /// untouched.
    pub fn apply(self, record: &mut ShortLinkRecord) {
        if let Some(url) = self.original_url {
            record.original_url = url;
        }
        if let Some(description) = self.description {
            record.description = description;
        }
    }
}
