//! Public redirect resolution with asynchronous hit counting.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::warn;

use crate::domain::entities::ShortLinkRecord;
use crate::domain::hit_event::HitEvent;
use crate::domain::keys::record_key;
use crate::domain::repositories::RecordStore;
use crate::error::{AppError, map_serde_error};

/// Resolves `(owner_id, slug)` pairs for visitors and queues hit events.
///
/// The redirect response never waits on the counter write: a [`HitEvent`]
/// with the incremented record is handed to the bounded channel and the
/// caller gets the destination immediately. If the queue is full the hit is
/// dropped with a warning.
pub struct RedirectService {
    store: Arc<dyn RecordStore>,
    hit_tx: mpsc::Sender<HitEvent>,
}

impl RedirectService {
    /// Creates a redirect service over the record store and hit queue.
    pub fn new(store: Arc<dyn RecordStore>, hit_tx: mpsc::Sender<HitEvent>) -> Self {
        Self { store, hit_tx }
    }

    /// Looks up the record for a short URL and enqueues its hit.
    ///
    /// Returns the record as read; the access counter observed by the caller
    /// is the pre-hit value, matching what the visitor was served.
    ///
    /// # Errors
    ///
    /// - [`AppError::UrlNotFound`] - no record for this owner and slug;
    ///   nothing is written
    /// - [`AppError::Internal`] - store failure or corrupt record
    pub async fn resolve(&self, owner_id: &str, slug: &str) -> Result<ShortLinkRecord, AppError> {
        let key = record_key(owner_id, slug);

        let bytes = self
            .store
            .get(&key)
            .await?
            .ok_or_else(|| AppError::url_not_found("Short link not found"))?;

        let record: ShortLinkRecord = serde_json::from_slice(&bytes).map_err(map_serde_error)?;

        let hit = HitEvent::new(key, record.with_hit(Utc::now()));
        if let Err(e) = self.hit_tx.try_send(hit) {
            warn!(owner_id, slug, error = %e, "Dropping hit: queue unavailable");
        }

        Ok(record)
    }
}
