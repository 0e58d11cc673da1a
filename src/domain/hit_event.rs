//! Hit event model for asynchronous access counting.

use crate::domain::entities::ShortLinkRecord;

/// A pending access-counter write, produced by the redirect path.
///
/// The record carried here is already incremented (`access_count + 1`,
/// `last_accessed` stamped) at redirect time; the worker only has to persist
/// it. This keeps the redirect response independent of the write and mirrors
/// the visitor-observed ordering: the redirect happened, the count follows.
///
/// # Usage Flow
///
/// 1. Redirect handler resolves the record and builds the event
/// 2. Event is sent to a bounded channel (non-blocking; full queue drops)
/// 3. [`crate::domain::hit_worker::run_hit_worker`] writes it back
#[derive(Debug, Clone)]
pub struct HitEvent {
    /// Storage key of the record, precomputed by the sender.
    pub key: String,
    /// The record with the counter already advanced.
    pub record: ShortLinkRecord,
}

impl HitEvent {
    pub fn new(key: String, record: ShortLinkRecord) -> Self {
        Self { key, record }
    }
}
