//! Handlers for rotating Quran verses.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use masjid_core::error::CoreError;
use masjid_core::types::DbId;
use masjid_db::models::quran_verse::CreateQuranVerse;
use masjid_db::repositories::QuranVerseRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::passphrase::RequirePassphrase;
use crate::query::ActiveOnlyParams;
use crate::response::SuccessResponse;
use crate::state::AppState;

/// GET /api/quran-verses
pub async fn list_quran_verses(
    State(state): State<AppState>,
    Query(params): Query<ActiveOnlyParams>,
) -> AppResult<impl IntoResponse> {
    let verses = QuranVerseRepo::list(&state.pool, params.active_only).await?;
    Ok(Json(verses))
}

/// POST /api/quran-verses
pub async fn create_quran_verse(
    _: RequirePassphrase,
    State(state): State<AppState>,
    Json(input): Json<CreateQuranVerse>,
) -> AppResult<impl IntoResponse> {
    let verse = QuranVerseRepo::create(&state.pool, &input).await?;

    tracing::info!(verse_id = verse.id, reference = %verse.reference, "Quran verse created");

    Ok((StatusCode::CREATED, Json(verse)))
}

/// DELETE /api/quran-verses/{id}
pub async fn delete_quran_verse(
    _: RequirePassphrase,
    State(state): State<AppState>,
    Path(verse_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !QuranVerseRepo::delete(&state.pool, verse_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "QuranVerse",
            id: verse_id,
        }));
    }

    tracing::info!(verse_id, "Quran verse deleted");
    Ok(Json(SuccessResponse::ok()))
}
