//! Slug registry service: create, read, list, update, delete.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{RecordPatch, ShortLinkRecord};
use crate::domain::identity::AuthContext;
use crate::domain::keys::{owner_prefix, record_key};
use crate::domain::repositories::RecordStore;
use crate::error::{AppError, map_serde_error};
use crate::utils::validate::{validate_destination_url, validate_slug};

/// Service managing one owner's short link records.
///
/// Ownership isolation is enforced structurally: every storage key is derived
/// from the [`AuthContext`]'s owner id, so no operation can reach another
/// owner's records. On top of that, mutating reads re-check the deserialized
/// record's owner as belt and suspenders.
pub struct LinkService {
    store: Arc<dyn RecordStore>,
}

impl LinkService {
    /// Creates a new registry over the given record store.
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Creates a new short link.
    ///
    /// Validation order: destination URL, then slug, then uniqueness at the
    /// owner's key. The existence check and subsequent write are two store
    /// calls, not one atomic operation — two concurrent creates of the same
    /// slug can both pass the check and the second write wins. The store
    /// exposes no conditional-write primitive, so this race is accepted and
    /// documented rather than hidden.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] - destination is not an absolute URL
    /// - [`AppError::InvalidSlug`] - slug fails character or length rules
    /// - [`AppError::SlugAlreadyExists`] - owner already uses this slug
    /// - [`AppError::Internal`] - store failure
    pub async fn create(
        &self,
        ctx: &AuthContext,
        original_url: String,
        slug: String,
        description: Option<String>,
    ) -> Result<ShortLinkRecord, AppError> {
        validate_destination_url(&original_url)?;
        validate_slug(&slug)?;

        let key = record_key(&ctx.owner_id, &slug);
        if self.store.get(&key).await?.is_some() {
            return Err(AppError::slug_already_exists(format!(
                "Slug '{slug}' is already in use"
            )));
        }

        let record = ShortLinkRecord::new(
            original_url,
            slug,
            ctx.owner_id.clone(),
            Utc::now(),
            description,
        );

        self.persist(&key, &record).await?;

        Ok(record)
    }

    /// Retrieves a single record by slug.
    ///
    /// # Errors
    ///
    /// - [`AppError::UrlNotFound`] - no record at the owner's key
    /// - [`AppError::AccessDenied`] - stored record names a different owner
    /// - [`AppError::Internal`] - store failure or corrupt record
    pub async fn get(&self, ctx: &AuthContext, slug: &str) -> Result<ShortLinkRecord, AppError> {
        let key = record_key(&ctx.owner_id, slug);
        let record = self.load_required(&key).await?;
        ensure_owner(ctx, &record)?;

        Ok(record)
    }

    /// Lists every record belonging to the owner, newest first.
    ///
    /// Keys that vanish between enumeration and the per-key read are skipped;
    /// the store is eventually consistent and a concurrent delete is not an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store failure or corrupt records.
    pub async fn list(&self, ctx: &AuthContext) -> Result<Vec<ShortLinkRecord>, AppError> {
        let prefix = owner_prefix(&ctx.owner_id);
        let keys = self.store.list_keys(&prefix).await?;

        let mut records = Vec::with_capacity(keys.len());
        for key in keys {
            if let Some(record) = self.load(&key).await? {
                records.push(record);
            }
        }

        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(records)
    }

    /// Merges the provided fields into an existing record.
    ///
    /// Slug, owner, creation time, and access statistics are never altered
    /// here. A provided destination URL is revalidated before any write.
    ///
    /// # Errors
    ///
    /// - [`AppError::UrlNotFound`] - no record at the owner's key
    /// - [`AppError::AccessDenied`] - stored record names a different owner
    /// - [`AppError::InvalidUrl`] - replacement destination is not absolute
    /// - [`AppError::Internal`] - store failure or corrupt record
    pub async fn update(
        &self,
        ctx: &AuthContext,
        slug: &str,
        patch: RecordPatch,
    ) -> Result<ShortLinkRecord, AppError> {
        let key = record_key(&ctx.owner_id, slug);
        let mut record = self.load_required(&key).await?;
        ensure_owner(ctx, &record)?;

        if let Some(url) = &patch.original_url {
            validate_destination_url(url)?;
        }

        patch.apply(&mut record);
        self.persist(&key, &record).await?;

        Ok(record)
    }

    /// Removes a record.
    ///
    /// # Errors
    ///
    /// - [`AppError::UrlNotFound`] - no record at the owner's key
    /// - [`AppError::AccessDenied`] - stored record names a different owner
    /// - [`AppError::Internal`] - store failure
    pub async fn delete(&self, ctx: &AuthContext, slug: &str) -> Result<(), AppError> {
        let key = record_key(&ctx.owner_id, slug);
        let record = self.load_required(&key).await?;
        ensure_owner(ctx, &record)?;

        self.store.delete(&key).await
    }

    async fn load(&self, key: &str) -> Result<Option<ShortLinkRecord>, AppError> {
        match self.store.get(key).await? {
            Some(bytes) => {
                let record = serde_json::from_slice(&bytes).map_err(map_serde_error)?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn load_required(&self, key: &str) -> Result<ShortLinkRecord, AppError> {
        self.load(key)
            .await?
            .ok_or_else(|| AppError::url_not_found("Short link not found"))
    }

    async fn persist(&self, key: &str, record: &ShortLinkRecord) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(record).map_err(map_serde_error)?;
        self.store.put(key, bytes).await
    }
}

/// Re-checks that the stored record belongs to the caller.
///
/// Key scoping already guarantees this; the check catches records written
/// under a mismatched key by an earlier bug.
fn ensure_owner(ctx: &AuthContext, record: &ShortLinkRecord) -> Result<(), AppError> {
    if record.owner_id != ctx.owner_id {
        return Err(AppError::access_denied(
            "You do not have access to this short link",
        ));
    }
    Ok(())
}
