//! Repository for the single-row `site_settings` table.

use masjid_core::settings::MosqueSettings;
use masjid_core::types::{Timestamp, SETTINGS_ROW_ID};
use sqlx::postgres::PgConnection;
use sqlx::types::Json;
use sqlx::PgExecutor;

pub struct SettingsRepo;

impl SettingsRepo {
    /// The stored document, or `None` when nothing has been saved yet.
    pub async fn get<'e>(executor: impl PgExecutor<'e>) -> Result<Option<MosqueSettings>, sqlx::Error> {
        let row: Option<(Json<MosqueSettings>, Timestamp)> =
            sqlx::query_as("SELECT document, updated_at FROM site_settings WHERE id = $1")
                .bind(SETTINGS_ROW_ID)
                .fetch_optional(executor)
                .await?;

        Ok(row.map(|(Json(mut settings), updated_at)| {
            settings.updated_at = Some(updated_at);
            settings
        }))
    }

    /// Lock the settings row for the rest of the transaction on `conn` and
    /// return its document, or `None` when nothing had been saved yet.
    ///
    /// The row is created first if missing, so concurrent first saves
    /// serialize on it too.
    pub async fn lock(conn: &mut PgConnection) -> Result<Option<MosqueSettings>, sqlx::Error> {
        let created = sqlx::query(
            "INSERT INTO site_settings (id) VALUES ($1) ON CONFLICT (id) DO NOTHING",
        )
        .bind(SETTINGS_ROW_ID)
        .execute(&mut *conn)
        .await?
        .rows_affected()
            > 0;

        let (Json(settings),): (Json<MosqueSettings>,) =
            sqlx::query_as("SELECT document FROM site_settings WHERE id = $1 FOR UPDATE")
                .bind(SETTINGS_ROW_ID)
                .fetch_one(&mut *conn)
                .await?;

        Ok((!created).then_some(settings))
    }

    /// Insert or overwrite the document, returning it with the new timestamp.
    pub async fn upsert<'e>(
        executor: impl PgExecutor<'e>,
        settings: &MosqueSettings,
    ) -> Result<MosqueSettings, sqlx::Error> {
        let (Json(mut saved), updated_at): (Json<MosqueSettings>, Timestamp) = sqlx::query_as(
            "INSERT INTO site_settings (id, document, updated_at)
             VALUES ($1, $2, NOW())
             ON CONFLICT (id) DO UPDATE SET document = EXCLUDED.document, updated_at = NOW()
             RETURNING document, updated_at",
        )
        .bind(SETTINGS_ROW_ID)
        .bind(Json(settings))
        .fetch_one(executor)
        .await?;

        saved.updated_at = Some(updated_at);
        Ok(saved)
    }
}
