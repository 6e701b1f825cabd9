use std::sync::Arc;

use masjid_core::alert::HazardFeed;
use masjid_core::clock::Clock;
use masjid_core::resolver::ScheduleResolver;
use masjid_core::weather::WeatherFeed;
use masjid_db::SettingsStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything is behind `Arc` or is already `Clone`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool (content tables).
    pub pool: masjid_db::DbPool,
    pub config: Arc<ServerConfig>,
    /// Settings document store.
    pub settings: Arc<dyn SettingsStore>,
    /// Source of "now" for countdowns.
    pub clock: Arc<dyn Clock>,
    pub resolver: Arc<ScheduleResolver>,
    pub weather: Arc<dyn WeatherFeed>,
    /// Seismic and forecast feeds for the alert ticker.
    pub hazards: Arc<dyn HazardFeed>,
}

impl AppState {
    /// Settings for a display read path: stored document or defaults.
    ///
    /// A store error is logged and answered with defaults so the display
    /// keeps running while the database is unavailable.
    pub async fn display_settings(&self) -> masjid_core::settings::MosqueSettings {
        match self.settings.get_or_default().await {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "Settings unavailable, using defaults");
                Default::default()
            }
        }
    }
}
