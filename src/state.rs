//! Shared application state injected into all handlers.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{LinkService, RedirectService};
use crate::domain::hit_event::HitEvent;
use crate::domain::identity::IdentityVerifier;
use crate::domain::repositories::RecordStore;

/// Application state shared across requests.
///
/// Everything in here is cheaply cloneable; axum clones the state per
/// request. The identity verifier and record store are trait objects so
/// tests can substitute fakes without touching the wiring.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub redirect_service: Arc<RedirectService>,
    pub verifier: Arc<dyn IdentityVerifier>,
    /// Direct store handle, used by the health check.
    pub store: Arc<dyn RecordStore>,
    /// Hit queue sender, used by the health check to report queue status.
    pub hit_sender: mpsc::Sender<HitEvent>,
    /// Configured origin for computed short URLs; `None` falls back to the
    /// request's Host header.
    pub public_origin: Option<String>,
}

impl AppState {
    /// Assembles the state from its collaborators.
    pub fn new(
        store: Arc<dyn RecordStore>,
        verifier: Arc<dyn IdentityVerifier>,
        hit_sender: mpsc::Sender<HitEvent>,
        public_origin: Option<String>,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(store.clone())),
            redirect_service: Arc::new(RedirectService::new(store.clone(), hit_sender.clone())),
            verifier,
            store,
            hit_sender,
            public_origin,
        }
    }
}
