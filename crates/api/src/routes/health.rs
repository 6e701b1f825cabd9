use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Payload of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    /// `ok` when the database and the settings store both answer,
    /// `degraded` otherwise. The display keeps working while degraded.
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Whether the settings document could be read.
    pub settings_healthy: bool,
    /// Prayer time providers in fallback order.
    pub sources: Vec<&'static str>,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = masjid_db::health_check(&state.pool).await.is_ok();
    let settings_healthy = match state.settings.get().await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Settings store unreachable during health check");
            false
        }
    };

    let sources = state
        .resolver
        .tiers()
        .iter()
        .map(|tier| tier.source.name())
        .collect();

    Json(HealthResponse {
        status: if db_healthy && settings_healthy { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        settings_healthy,
        sources,
    })
}

/// `/health` sits at the root, outside `/api`.
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
