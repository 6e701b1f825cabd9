//! Repository for the `announcements` table.

use masjid_core::types::DbId;
use sqlx::PgPool;

use crate::models::announcement::{Announcement, CreateAnnouncement};

/// Column list for announcements queries.
const COLUMNS: &str = "id, text, priority, active, created_at";

pub struct AnnouncementRepo;

impl AnnouncementRepo {
    /// List announcements, highest priority first.
    pub async fn list(pool: &PgPool, active_only: bool) -> Result<Vec<Announcement>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM announcements
             WHERE ($1 = false OR active = true)
             ORDER BY priority DESC, created_at DESC"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(active_only)
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Announcement>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM announcements WHERE id = $1");
        sqlx::query_as::<_, Announcement>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Create an announcement, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateAnnouncement,
    ) -> Result<Announcement, sqlx::Error> {
        let query = format!(
            "INSERT INTO announcements (text, priority, active)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Announcement>(&query)
            .bind(&input.text)
            .bind(input.priority)
            .bind(input.active)
            .fetch_one(pool)
            .await
    }

    /// Delete an announcement by ID. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
