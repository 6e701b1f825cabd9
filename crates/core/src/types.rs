//! Identifier and timestamp types shared by the content tables and the
//! settings document.

/// Row id of announcements, Quran verses and financial reports (`BIGSERIAL`).
pub type DbId = i64;

/// `created_at` / `updated_at` instants, stored as `TIMESTAMPTZ`.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The settings document is a single row with this id.
pub const SETTINGS_ROW_ID: i16 = 1;
