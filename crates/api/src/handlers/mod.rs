pub mod alerts;
pub mod announcements;
pub mod auth;
pub mod financial_reports;
pub mod prayer_times;
pub mod quran_verses;
pub mod settings;
pub mod weather;
