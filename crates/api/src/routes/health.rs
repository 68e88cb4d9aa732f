//! Liveness and readiness checks for load balancers.
//!
//! `/health` answers as long as the process serves requests. `/health/ready`
//! also pings the database, so a replica that lost its pool drops out of
//! rotation without being restarted.

use axum::{Json, Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tracing::warn;

use crate::AppState;

/// Body of both health routes.
#[derive(Debug, Serialize)]
pub struct HealthStatus {
    /// `healthy`, `ready` or `unavailable`.
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Crate version of the running binary.
    pub version: &'static str,
    /// Database reachability, only reported by the readiness route.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<&'static str>,
}

impl HealthStatus {
    const fn new(status: &'static str, database: Option<&'static str>) -> Self {
        Self {
            status,
            service: "komisi",
            version: env!("CARGO_PKG_VERSION"),
            database,
        }
    }
}

/// GET /health - Liveness; never touches the database.
async fn liveness() -> Json<HealthStatus> {
    Json(HealthStatus::new("healthy", None))
}

/// GET /health/ready - 503 while the database is unreachable.
async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<HealthStatus>) {
    match state.db.ping().await {
        Ok(()) => (StatusCode::OK, Json(HealthStatus::new("ready", Some("up")))),
        Err(e) => {
            warn!(error = %e, "Readiness check failed: database unreachable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthStatus::new("unavailable", Some("down"))),
            )
        }
    }
}

/// Creates the unauthenticated health routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(liveness))
        .route("/health/ready", get(readiness))
}
