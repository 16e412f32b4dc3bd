//! Liveness endpoint, mounted at the root rather than under `/api/v1`.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `"ok"` when the catalog can reach its movie store, `"degraded"` otherwise.
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the movie store answered its round trip (`SELECT 1` on PostgreSQL).
    pub db_healthy: bool,
}

impl HealthResponse {
    fn from_store_reachable(db_healthy: bool) -> Self {
        Self {
            status: if db_healthy { "ok" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            db_healthy,
        }
    }
}

/// GET /health
///
/// Answers 200 even while the movie store is unreachable. The outage is
/// reported in the body and logged.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = match state.service.health_check().await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Movie store unreachable");
            false
        }
    };

    Json(HealthResponse::from_store_reachable(db_healthy))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
