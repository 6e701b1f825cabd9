//! Route definitions for display content managed from the admin panel.

use axum::routing::{delete, get};
use axum::Router;

use crate::handlers::{announcements, financial_reports, quran_verses};
use crate::state::AppState;

/// Mounted at `/announcements`.
///
/// ```text
/// GET    /      -> list_announcements
/// POST   /      -> create_announcement
/// DELETE /{id}  -> delete_announcement
/// ```
pub fn announcements_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(announcements::list_announcements).post(announcements::create_announcement),
        )
        .route("/{id}", delete(announcements::delete_announcement))
}

/// Mounted at `/quran-verses`.
///
/// ```text
/// GET    /      -> list_quran_verses
/// POST   /      -> create_quran_verse
/// DELETE /{id}  -> delete_quran_verse
/// ```
pub fn quran_verses_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(quran_verses::list_quran_verses).post(quran_verses::create_quran_verse),
        )
        .route("/{id}", delete(quran_verses::delete_quran_verse))
}

/// Mounted at `/financial-reports`.
///
/// ```text
/// GET    /      -> list_financial_reports
/// POST   /      -> create_financial_report
/// DELETE /{id}  -> delete_financial_report
/// ```
pub fn financial_reports_router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(financial_reports::list_financial_reports)
                .post(financial_reports::create_financial_report),
        )
        .route("/{id}", delete(financial_reports::delete_financial_report))
}
