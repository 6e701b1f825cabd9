use axum::extract::State;
use axum::Json;
use masjid_core::weather::{current_or_fallback, CurrentWeather};

use crate::state::AppState;

/// GET /api/weather
///
/// Current conditions at the site, or the static fallback.
pub async fn get_weather(State(state): State<AppState>) -> Json<CurrentWeather> {
    let settings = state.display_settings().await;
    let weather = current_or_fallback(state.weather.as_ref(), settings.coordinates(), settings.locale).await;
    Json(weather)
}
