//! Current-conditions widget data.

use async_trait::async_trait;
use serde::Serialize;

use crate::calendar::Locale;
use crate::error::SourceFailure;
use crate::geo::Coordinates;

/// Current conditions at the site, metric units.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub temperature: f64,
    pub feels_like: f64,
    /// Relative humidity, percent.
    pub humidity: u8,
    pub description: String,
    /// Provider icon id, e.g. `"02d"`.
    pub icon: String,
    /// Metres per second.
    pub wind_speed: f64,
}

impl CurrentWeather {
    /// Placeholder shown when no provider is configured or it fails.
    pub fn fallback(locale: Locale) -> Self {
        let description = match locale {
            Locale::En => "cloudy",
            Locale::Id => "berawan",
        };
        Self {
            temperature: 28.0,
            feels_like: 30.0,
            humidity: 75,
            description: description.to_string(),
            icon: "02d".to_string(),
            wind_speed: 2.5,
        }
    }
}

#[async_trait]
pub trait WeatherFeed: Send + Sync {
    async fn current(&self, at: Coordinates, locale: Locale) -> Result<CurrentWeather, SourceFailure>;
}

/// Fetch current conditions, substituting [`CurrentWeather::fallback`] on
/// any failure.
pub async fn current_or_fallback(
    feed: &dyn WeatherFeed,
    at: Coordinates,
    locale: Locale,
) -> CurrentWeather {
    match feed.current(at, locale).await {
        Ok(weather) => weather,
        Err(e) => {
            tracing::warn!(error = %e, "Weather unavailable, using fallback");
            CurrentWeather::fallback(locale)
        }
    }
}
