//! Repository for the `quran_verses` table.

use masjid_core::types::DbId;
use sqlx::PgPool;

use crate::models::quran_verse::{CreateQuranVerse, QuranVerse};

const COLUMNS: &str = "id, arabic, translation, reference, active, created_at";

pub struct QuranVerseRepo;

impl QuranVerseRepo {
    /// List verses in insertion order.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<QuranVerse>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM quran_verses
             WHERE ($1 = false OR active = true)
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, QuranVerse>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn create(pool: &PgPool, input: &CreateQuranVerse) -> Result<QuranVerse, sqlx::Error> {
        let query = format!(
            "INSERT INTO quran_verses (arabic, translation, reference, active)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuranVerse>(&query)
            .bind(&input.arabic)
            .bind(&input.translation)
            .bind(&input.reference)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Delete a verse by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quran_verses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
