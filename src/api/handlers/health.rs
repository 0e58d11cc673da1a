//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health` (public)
///
/// # Response Codes
///
/// - **200 OK**: all components healthy
/// - **503 Service Unavailable**: one or more components degraded
///
/// # Components Checked
///
/// 1. **Store**: record store reachability (PING for Redis)
/// 2. **Hit queue**: whether the background worker's channel is still open
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state).await;
    let queue_check = check_hit_queue(&state);

    let all_healthy = store_check.status == "ok" && queue_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            store: store_check,
            hit_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_store(state: &AppState) -> CheckStatus {
    if state.store.health_check().await {
        CheckStatus {
            status: "ok".to_string(),
            message: None,
        }
    } else {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Record store unreachable".to_string()),
        }
    }
}

fn check_hit_queue(state: &AppState) -> CheckStatus {
    if state.hit_sender.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Hit worker channel closed".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", state.hit_sender.max_capacity())),
        }
    }
}
