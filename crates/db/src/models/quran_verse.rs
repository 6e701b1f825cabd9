use masjid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `quran_verses` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct QuranVerse {
    pub id: DbId,
    pub arabic: String,
    pub translation: String,
    /// Surah and ayah, e.g. `"QS. Al-Baqarah: 153"`.
    pub reference: String,
    pub active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a verse.
#[derive(Debug, Deserialize)]
pub struct CreateQuranVerse {
    pub arabic: String,
    pub translation: String,
    pub reference: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}
