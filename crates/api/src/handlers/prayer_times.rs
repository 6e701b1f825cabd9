//! Handler for the display's main poll.

use axum::extract::State;
use axum::Json;
use masjid_core::clock::resolve_timezone;
use masjid_core::display::{build_view, PrayerTimesView};

use crate::state::AppState;

/// GET /api/prayer-times
///
/// Today's schedule at the site plus the live countdown. Always answers:
/// upstream and storage failures degrade to fallbacks.
pub async fn get_prayer_times(State(state): State<AppState>) -> Json<PrayerTimesView> {
    let settings = state.display_settings().await;
    let now = state.clock.now_local(resolve_timezone(&settings.timezone));

    let resolved = state.resolver.resolve(&settings.location(), now.date()).await;

    Json(build_view(
        &resolved,
        &settings.grace_periods,
        now,
        settings.locale,
    ))
}
