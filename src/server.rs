//! HTTP server initialization and runtime setup.
//!
//! Handles record store connection, identity verifier construction, hit
//! worker spawning, and Axum server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::domain::hit_worker::run_hit_worker;
use crate::domain::identity::IdentityVerifier;
use crate::domain::repositories::RecordStore;
use crate::infrastructure::identity::GoogleIdentityVerifier;
use crate::infrastructure::persistence::RedisStore;
use crate::routes::app_router;
use crate::state::AppState;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis record store (connection validated with PING)
/// - Google identity verifier
/// - Background hit worker
/// - Axum HTTP server with graceful shutdown on ctrl-c
///
/// # Errors
///
/// Returns an error if:
/// - Record store connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store: Arc<dyn RecordStore> = Arc::new(RedisStore::connect(&config.redis_url).await?);
    tracing::info!("Connected to record store");

    let verifier: Arc<dyn IdentityVerifier> = Arc::new(GoogleIdentityVerifier::new(
        config.google_client_id.clone(),
    ));

    let (hit_tx, hit_rx) = mpsc::channel(config.hit_queue_capacity);
    tokio::spawn(run_hit_worker(hit_rx, store.clone()));
    tracing::info!("Hit worker started");

    let state = AppState::new(store, verifier, hit_tx, config.public_origin.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        return;
    }
    tracing::info!("Shutdown signal received");
}
