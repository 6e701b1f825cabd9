//! Shared-passphrase guard for administrative routes.
//!
//! The passphrase travels in the [`PASSPHRASE_HEADER`] header and is compared
//! with the `admin_password` in the stored settings (or the default).

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use masjid_core::error::CoreError;

use crate::error::AppError;
use crate::state::AppState;

pub const PASSPHRASE_HEADER: &str = "x-admin-password";

/// Rejects with 401 unless the request carries the admin passphrase.
///
/// ```ignore
/// async fn admin_only(_: RequirePassphrase, State(state): State<AppState>) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequirePassphrase;

impl FromRequestParts<AppState> for RequirePassphrase {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get(PASSPHRASE_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {PASSPHRASE_HEADER} header"
                )))
            })?;

        let settings = state.settings.get_or_default().await?;
        if supplied != settings.admin_password {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid password".into(),
            )));
        }
        Ok(RequirePassphrase)
    }
}
