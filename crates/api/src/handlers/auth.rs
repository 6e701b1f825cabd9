//! Passphrase verification for the admin panel login.

use axum::extract::State;
use axum::Json;
use masjid_core::error::CoreError;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::response::SuccessResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct VerifyPassword {
    pub password: String,
}

/// POST /api/verify-password
pub async fn verify_password(
    State(state): State<AppState>,
    Json(input): Json<VerifyPassword>,
) -> AppResult<Json<SuccessResponse>> {
    let settings = state.settings.get_or_default().await?;

    if input.password != settings.admin_password {
        tracing::warn!("Admin passphrase rejected");
        return Err(AppError::Core(CoreError::Unauthorized(
            "Invalid password".into(),
        )));
    }

    Ok(Json(SuccessResponse::with_message("Password verified")))
}
