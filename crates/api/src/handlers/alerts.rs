use axum::extract::State;
use axum::Json;
use masjid_core::alert::{gather_alerts, AlertEvent};

use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/alerts
///
/// Seismic and severe-weather alerts relevant to the site. Feed failures
/// simply contribute no alerts.
pub async fn get_alerts(State(state): State<AppState>) -> Json<DataResponse<Vec<AlertEvent>>> {
    let settings = state.display_settings().await;
    let alerts = gather_alerts(state.hazards.as_ref(), &settings.alert_site(), settings.locale).await;

    if !alerts.is_empty() {
        tracing::info!(count = alerts.len(), "Active alerts");
    }

    Json(DataResponse { data: alerts })
}
