//! Handlers for the site settings document.

use axum::extract::State;
use axum::Json;
use masjid_core::settings::{MosqueSettings, UpdateSettings};
use serde_json::Value;

use crate::error::AppResult;
use crate::middleware::passphrase::RequirePassphrase;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Serialized settings without the admin passphrase.
pub fn public_settings(settings: &MosqueSettings) -> Value {
    let mut value = serde_json::to_value(settings).unwrap_or_default();
    if let Some(fields) = value.as_object_mut() {
        fields.remove("admin_password");
    }
    value
}

/// GET /api/settings
///
/// The stored settings, or the defaults when nothing has been saved.
pub async fn get_settings(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let settings = state.settings.get_or_default().await?;
    Ok(Json(public_settings(&settings)))
}

/// PUT /api/settings
///
/// Merge a partial update into the stored settings, creating them on first
/// save.
pub async fn update_settings(
    _: RequirePassphrase,
    State(state): State<AppState>,
    Json(input): Json<UpdateSettings>,
) -> AppResult<Json<SuccessResponse>> {
    let saved = state.settings.put(input).await?;

    tracing::info!(
        mosque_name = %saved.mosque_name,
        timezone = %saved.timezone,
        method = %saved.calculation_method,
        manual = saved.use_manual_times,
        "Settings updated",
    );

    Ok(Json(SuccessResponse::with_message("Settings updated")))
}
