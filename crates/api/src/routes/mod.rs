pub mod content;
pub mod display;
pub mod health;
pub mod settings;

use axum::routing::post;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /settings                         get, update (passphrase)
///
/// /prayer-times                     display payload
/// /weather                          current conditions
/// /alerts                           seismic + severe weather
///
/// /announcements                    list, create (passphrase)
/// /announcements/{id}               delete (passphrase)
/// /quran-verses                     list, create (passphrase)
/// /quran-verses/{id}                delete (passphrase)
/// /financial-reports                list, create (passphrase)
/// /financial-reports/{id}           delete (passphrase)
///
/// /verify-password                  passphrase check (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/settings", settings::router())
        .merge(display::router())
        .nest("/announcements", content::announcements_router())
        .nest("/quran-verses", content::quran_verses_router())
        .nest("/financial-reports", content::financial_reports_router())
        .route("/verify-password", post(handlers::auth::verify_password))
}
