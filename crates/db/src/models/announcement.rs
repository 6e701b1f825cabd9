//! Ticker announcements.

use masjid_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `announcements` table.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Announcement {
    pub id: DbId,
    pub text: String,
    /// Higher values are shown first.
    pub priority: i32,
    pub active: bool,
    pub created_at: Timestamp,
}

/// DTO for creating an announcement.
#[derive(Debug, Deserialize)]
pub struct CreateAnnouncement {
    pub text: String,
    #[serde(default = "default_priority")]
    pub priority: i32,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_priority() -> i32 {
    1
}

fn default_active() -> bool {
    true
}
