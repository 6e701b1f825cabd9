//! Read-only routes polled by the display.

use axum::routing::get;
use axum::Router;

use crate::handlers::{alerts, prayer_times, weather};
use crate::state::AppState;

/// ```text
/// GET /prayer-times  -> get_prayer_times
/// GET /weather       -> get_weather
/// GET /alerts        -> get_alerts
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/prayer-times", get(prayer_times::get_prayer_times))
        .route("/weather", get(weather::get_weather))
        .route("/alerts", get(alerts::get_alerts))
}
