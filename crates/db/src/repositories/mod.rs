//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod announcement_repo;
pub mod financial_report_repo;
pub mod quran_verse_repo;
pub mod settings_repo;

pub use announcement_repo::AnnouncementRepo;
pub use financial_report_repo::FinancialReportRepo;
pub use quran_verse_repo::QuranVerseRepo;
pub use settings_repo::SettingsRepo;
