#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::mpsc;

use shortlinks::domain::entities::ShortLinkRecord;
use shortlinks::domain::hit_event::HitEvent;
use shortlinks::domain::identity::{AuthenticatedUser, IdentityVerifier};
use shortlinks::domain::keys::record_key;
use shortlinks::domain::repositories::RecordStore;
use shortlinks::error::AppError;
use shortlinks::infrastructure::persistence::MemoryStore;
use shortlinks::state::AppState;

/// Origin configured for all test states, so `shortUrl` assertions do not
/// depend on the test client's Host header.
pub const TEST_ORIGIN: &str = "https://s.example.com";

/// Verifier accepting tokens of the form `token-<owner>`.
///
/// Any other token is rejected the way the real verifier rejects a bad
/// credential.
pub struct FakeVerifier;

#[async_trait]
impl IdentityVerifier for FakeVerifier {
    async fn verify(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        match token.strip_prefix("token-") {
            Some(owner) if !owner.is_empty() => Ok(AuthenticatedUser {
                owner_id: owner.to_string(),
                email: format!("{owner}@example.ac.jp"),
                email_domain: "example.ac.jp".to_string(),
            }),
            _ => Err(AppError::authentication_failed("Token rejected")),
        }
    }
}

/// Store wrapper counting every call, for asserting "the store was never
/// touched".
pub struct CountingStore {
    inner: Arc<dyn RecordStore>,
    calls: AtomicUsize,
}

impl CountingStore {
    pub fn new(inner: Arc<dyn RecordStore>) -> Self {
        Self {
            inner,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl RecordStore for CountingStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.put(key, value).await
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.delete(key).await
    }

    async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.list_keys(prefix).await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

/// Builds an [`AppState`] over the given store with the fake verifier.
///
/// The receiving half of the hit channel is returned so tests can either
/// inspect queued events or feed them to a worker.
pub fn create_test_state(store: Arc<dyn RecordStore>) -> (AppState, mpsc::Receiver<HitEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(
        store,
        Arc::new(FakeVerifier),
        tx,
        Some(TEST_ORIGIN.to_string()),
    );

    (state, rx)
}

/// Builds a test state over a fresh [`MemoryStore`].
pub fn create_memory_state() -> (AppState, Arc<MemoryStore>, mpsc::Receiver<HitEvent>) {
    let store = Arc::new(MemoryStore::new());
    let (state, rx) = create_test_state(store.clone());
    (state, store, rx)
}

/// Inserts a record directly into the store, bypassing the API.
pub async fn seed_record(
    store: &dyn RecordStore,
    owner: &str,
    slug: &str,
    url: &str,
) -> ShortLinkRecord {
    let record = ShortLinkRecord::new(
        url.to_string(),
        slug.to_string(),
        owner.to_string(),
        Utc::now(),
        None,
    );

    store
        .put(
            &record_key(owner, slug),
            serde_json::to_vec(&record).unwrap(),
        )
        .await
        .unwrap();

    record
}

/// Reads a record straight from the store.
pub async fn read_record(store: &dyn RecordStore, owner: &str, slug: &str) -> Option<ShortLinkRecord> {
    store
        .get(&record_key(owner, slug))
        .await
        .unwrap()
        .map(|bytes| serde_json::from_slice(&bytes).unwrap())
}

/// Bearer header value for the fake verifier.
pub fn bearer(owner: &str) -> String {
    format!("Bearer token-{owner}")
}
