//! Handlers for ticker announcements.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use masjid_core::error::CoreError;
use masjid_core::types::DbId;
use masjid_db::models::announcement::CreateAnnouncement;
use masjid_db::repositories::AnnouncementRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::passphrase::RequirePassphrase;
use crate::query::ActiveOnlyParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/announcements
///
/// Highest priority first; inactive entries only with `?active_only=false`.
pub async fn list_announcements(
    State(state): State<AppState>,
    Query(params): Query<ActiveOnlyParams>,
) -> AppResult<impl IntoResponse> {
    let announcements = AnnouncementRepo::list(&state.pool, params.active_only).await?;
    Ok(Json(announcements))
}

/// POST /api/announcements
pub async fn create_announcement(
    _: RequirePassphrase,
    State(state): State<AppState>,
    Json(input): Json<CreateAnnouncement>,
) -> AppResult<impl IntoResponse> {
    let announcement = AnnouncementRepo::create(&state.pool, &input).await?;

    tracing::info!(
        announcement_id = announcement.id,
        priority = announcement.priority,
        "Announcement created",
    );

    Ok((StatusCode::CREATED, Json(announcement)))
}

/// DELETE /api/announcements/{id}
pub async fn delete_announcement(
    _: RequirePassphrase,
    State(state): State<AppState>,
    Path(announcement_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = AnnouncementRepo::delete(&state.pool, announcement_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Announcement",
            id: announcement_id,
        }));
    }

    tracing::info!(announcement_id, "Announcement deleted");
    Ok(Json(SuccessResponse::ok()))
}
