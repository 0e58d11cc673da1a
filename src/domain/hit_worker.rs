//! Background worker persisting access-counter updates.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::hit_event::HitEvent;
use crate::domain::repositories::RecordStore;
use crate::error::map_serde_error;

/// Drains the hit channel and writes each updated record back to the store.
///
/// Counter writes are at-most-effort: a failed put is logged and dropped,
/// never retried, and never visible to the visitor who was already
/// redirected. Concurrent hits on the same slug may overwrite each other
/// (last write wins) — an accepted weak-counting tradeoff, since the store
/// offers no transactional primitive.
///
/// Runs until the sending side of the channel is closed.
pub async fn run_hit_worker(mut rx: mpsc::Receiver<HitEvent>, store: Arc<dyn RecordStore>) {
    while let Some(event) = rx.recv().await {
        let bytes = match serde_json::to_vec(&event.record).map_err(map_serde_error) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(key = %event.key, error = %e, "Dropping hit: record failed to serialize");
                continue;
            }
        };

        match store.put(&event.key, bytes).await {
            Ok(()) => {
                debug!(
                    key = %event.key,
                    access_count = event.record.access_count,
                    "Recorded hit"
                );
            }
            Err(e) => {
                warn!(key = %event.key, error = %e, "Dropping hit: store write failed");
            }
        }
    }

    debug!("Hit worker stopped: channel closed");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortLinkRecord;
    use crate::domain::repositories::record_store::MockRecordStore;
    use chrono::Utc;

    fn hit_event(key: &str) -> HitEvent {
        let record = ShortLinkRecord::new(
            "https://example.com".to_string(),
            "ex".to_string(),
            "alice".to_string(),
            Utc::now(),
            None,
        );
        HitEvent::new(key.to_string(), record.with_hit(Utc::now()))
    }

    #[tokio::test]
    async fn test_worker_persists_events() {
        let mut store = MockRecordStore::new();
        store
            .expect_put()
            .withf(|key, _| key == "url:alice:ex")
            .times(1)
            .returning(|_, _| Ok(()));

        let (tx, rx) = mpsc::channel(4);
        let handle = tokio::spawn(run_hit_worker(rx, Arc::new(store)));

        tx.send(hit_event("url:alice:ex")).await.unwrap();
        drop(tx);

        handle.await.unwrap();
    }

    #[tokio::test]
    async fn test_worker_survives_store_failure() {
        let mut store = MockRecordStore::new();
        store
            .expect_put()
            .times(2)
            .returning(|_, _| Err(crate::error::AppError::internal("store down")));

        let (tx, rx) = mpsc::channel(4);
        let handle = tokio::spawn(run_hit_worker(rx, Arc::new(store)));

        // Both events are attempted; neither failure kills the worker.
        tx.send(hit_event("url:alice:a")).await.unwrap();
        tx.send(hit_event("url:alice:b")).await.unwrap();
        drop(tx);

        handle.await.unwrap();
    }
}
