//! Disaster and severe-weather alerts for the display ticker.
//!
//! Two independent checks run per request:
//! - **Seismic**: the latest reported earthquake is kept only if its
//!   magnitude and its great-circle distance from the mosque jointly clear
//!   one of [`SEISMIC_THRESHOLDS`].
//! - **Severe weather**: the site city's current forecast code is looked up
//!   in [`WEATHER_CODES`]; only codes flagged severe raise an alert.
//!
//! Neither check is fatal. A failed feed yields no alert from that feed.

use async_trait::async_trait;
use serde::Serialize;

use crate::calendar::Locale;
use crate::error::SourceFailure;
use crate::geo::{haversine_km, parse_coordinates, Coordinates};

/// `(minimum magnitude, maximum distance km)` pairs. Any satisfied pair
/// raises an alert.
pub const SEISMIC_THRESHOLDS: [(f64, f64); 3] = [(5.5, 500.0), (4.5, 300.0), (3.5, 100.0)];

/// Magnitude that raises an alert when the epicenter cannot be located.
pub const UNLOCATED_MIN_MAGNITUDE: f64 = 5.5;

// ---------------------------------------------------------------------------
// Feed types
// ---------------------------------------------------------------------------

/// The latest earthquake as reported by the seismic agency.
#[derive(Debug, Clone, PartialEq)]
pub struct SeismicReport {
    pub magnitude: f64,
    /// Depth as reported, e.g. `"10 km"`.
    pub depth: String,
    /// Epicenter as a `"lat,lon"` string.
    pub epicenter: String,
    /// Human description of the epicenter region.
    pub region: String,
    /// Reported local date/time string.
    pub occurred_at: String,
}

/// Forecast weather codes for one named area, nearest period first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaForecast {
    pub city: String,
    pub codes: Vec<i32>,
}

/// Source of seismic and forecast data.
#[async_trait]
pub trait HazardFeed: Send + Sync {
    async fn latest_earthquake(&self) -> Result<SeismicReport, SourceFailure>;

    /// Area forecasts for a province feed (e.g. `"JawaTimur"`).
    async fn area_forecasts(&self, province: &str) -> Result<Vec<AreaForecast>, SourceFailure>;
}

/// Where the mosque is, for alert evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertSite {
    pub coordinates: Coordinates,
    pub province: String,
    pub city: String,
}

// ---------------------------------------------------------------------------
// Alert events
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AlertEvent {
    Seismic {
        magnitude: f64,
        depth: String,
        epicenter: String,
        region: String,
        occurred_at: String,
        /// `None` when the epicenter could not be parsed.
        distance_km: Option<f64>,
        advisory: String,
    },
    SevereWeather {
        city: String,
        code: i32,
        advisory: String,
    },
}

// ---------------------------------------------------------------------------
// Seismic
// ---------------------------------------------------------------------------

/// Decide whether an earthquake warrants an alert at the site.
pub fn evaluate_seismic(
    report: &SeismicReport,
    site: Coordinates,
    locale: Locale,
) -> Option<AlertEvent> {
    let magnitude = report.magnitude;

    let distance_km = match parse_coordinates(&report.epicenter) {
        Ok(epicenter) => {
            let distance = haversine_km(epicenter, site);
            let felt = SEISMIC_THRESHOLDS
                .iter()
                .any(|&(min_mag, max_km)| magnitude >= min_mag && distance <= max_km);
            if !felt {
                return None;
            }
            Some(distance)
        }
        Err(e) => {
            tracing::debug!(error = %e, "Epicenter unparsable, using magnitude-only threshold");
            if magnitude < UNLOCATED_MIN_MAGNITUDE {
                return None;
            }
            None
        }
    };

    let advisory = seismic_advisory(magnitude, distance_km, &report.region, locale);

    Some(AlertEvent::Seismic {
        magnitude,
        depth: report.depth.clone(),
        epicenter: report.epicenter.clone(),
        region: report.region.clone(),
        occurred_at: report.occurred_at.clone(),
        distance_km: distance_km.map(|d| (d * 10.0).round() / 10.0),
        advisory,
    })
}

fn seismic_advisory(magnitude: f64, distance_km: Option<f64>, region: &str, locale: Locale) -> String {
    match (locale, distance_km) {
        (Locale::En, Some(d)) => {
            format!("Earthquake M{magnitude:.1} about {d:.0} km from the mosque. {region}")
        }
        (Locale::En, None) => format!("Earthquake M{magnitude:.1}. {region}"),
        (Locale::Id, Some(d)) => {
            format!("Gempa M{magnitude:.1} sekitar {d:.0} km dari masjid. {region}")
        }
        (Locale::Id, None) => format!("Gempa M{magnitude:.1}. {region}"),
    }
}

// ---------------------------------------------------------------------------
// Severe weather
// ---------------------------------------------------------------------------

/// One entry of the forecast weather-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCode {
    pub code: i32,
    pub label_en: &'static str,
    pub label_id: &'static str,
    pub severe: bool,
}

impl WeatherCode {
    pub fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => self.label_en,
            Locale::Id => self.label_id,
        }
    }
}

const fn code(code: i32, label_en: &'static str, label_id: &'static str, severe: bool) -> WeatherCode {
    WeatherCode {
        code,
        label_en,
        label_id,
        severe,
    }
}

/// Forecast weather codes published by the meteorological agency.
pub const WEATHER_CODES: [WeatherCode; 16] = [
    code(0, "Clear skies", "Cerah", false),
    code(1, "Partly cloudy", "Cerah berawan", false),
    code(2, "Partly cloudy", "Cerah berawan", false),
    code(3, "Mostly cloudy", "Berawan", false),
    code(4, "Overcast", "Berawan tebal", false),
    code(5, "Haze", "Udara kabur", false),
    code(10, "Smoke", "Asap", false),
    code(45, "Fog", "Kabut", false),
    code(60, "Light rain", "Hujan ringan", false),
    code(61, "Rain", "Hujan sedang", false),
    code(63, "Heavy rain", "Hujan lebat", true),
    code(80, "Isolated shower", "Hujan lokal", false),
    code(95, "Severe thunderstorm", "Hujan petir", true),
    code(97, "Severe thunderstorm", "Hujan petir", true),
    code(100, "Clear skies", "Cerah", false),
    code(101, "Partly cloudy", "Cerah berawan", false),
];

pub fn describe_weather_code(value: i32) -> Option<&'static WeatherCode> {
    WEATHER_CODES.iter().find(|entry| entry.code == value)
}

/// Alert if the site city's nearest forecast period is severe.
///
/// A city missing from the feed, an empty forecast or an unknown code yields
/// no alert.
pub fn evaluate_weather(forecasts: &[AreaForecast], city: &str, locale: Locale) -> Option<AlertEvent> {
    let area = forecasts
        .iter()
        .find(|area| area.city.trim().eq_ignore_ascii_case(city.trim()))?;
    let current = *area.codes.first()?;
    let entry = describe_weather_code(current)?;

    if !entry.severe {
        return None;
    }

    let advisory = match locale {
        Locale::En => format!("Weather advisory for {}: {}", area.city, entry.label(locale)),
        Locale::Id => format!("Peringatan cuaca {}: {}", area.city, entry.label(locale)),
    };

    Some(AlertEvent::SevereWeather {
        city: area.city.clone(),
        code: current,
        advisory,
    })
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Run both checks against the feed. Feed failures are logged and skipped.
pub async fn gather_alerts(feed: &dyn HazardFeed, site: &AlertSite, locale: Locale) -> Vec<AlertEvent> {
    let (quake, forecasts) = tokio::join!(
        feed.latest_earthquake(),
        feed.area_forecasts(&site.province)
    );

    let mut alerts = Vec::new();

    match quake {
        Ok(report) => alerts.extend(evaluate_seismic(&report, site.coordinates, locale)),
        Err(e) => tracing::warn!(error = %e, "Seismic feed unavailable"),
    }

    match forecasts {
        Ok(areas) => alerts.extend(evaluate_weather(&areas, &site.city, locale)),
        Err(e) => tracing::warn!(error = %e, province = %site.province, "Forecast feed unavailable"),
    }

    alerts
}
