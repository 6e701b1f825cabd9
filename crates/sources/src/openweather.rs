//! OpenWeatherMap current conditions.
//!
//! `GET {base}/data/2.5/weather?lat&lon&appid&units=metric&lang`

use async_trait::async_trait;
use masjid_core::calendar::Locale;
use masjid_core::error::SourceFailure;
use masjid_core::geo::Coordinates;
use masjid_core::weather::{CurrentWeather, WeatherFeed};
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{fetch_text, join_url};

pub const SOURCE_NAME: &str = "openweather";
pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";

pub struct OpenWeatherFeed {
    client: reqwest::Client,
    base_url: String,
    /// Without a key every call fails and the display shows the fallback.
    api_key: Option<String>,
}

impl OpenWeatherFeed {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            api_key,
        }
    }

    async fn fetch_current(&self, at: Coordinates, locale: Locale) -> Result<CurrentWeather, SourceError> {
        let api_key = self.api_key.as_deref().ok_or(SourceError::MissingApiKey)?;

        let request = self
            .client
            .get(join_url(&self.base_url, "data/2.5/weather"))
            .query(&[
                ("lat", at.latitude.to_string()),
                ("lon", at.longitude.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
                ("lang", locale.as_str().to_string()),
            ]);

        let body = fetch_text(request).await?;
        parse_current(&body)
    }
}

#[async_trait]
impl WeatherFeed for OpenWeatherFeed {
    async fn current(&self, at: Coordinates, locale: Locale) -> Result<CurrentWeather, SourceFailure> {
        self.fetch_current(at, locale)
            .await
            .map_err(|e| e.into_failure(SOURCE_NAME))
    }
}

#[derive(Deserialize)]
struct Reply {
    #[serde(default)]
    weather: Vec<Condition>,
    main: Main,
    #[serde(default)]
    wind: Wind,
}

#[derive(Deserialize)]
struct Condition {
    description: String,
    icon: String,
}

#[derive(Deserialize)]
struct Main {
    temp: f64,
    feels_like: f64,
    humidity: f64,
}

#[derive(Deserialize, Default)]
struct Wind {
    #[serde(default)]
    speed: f64,
}

/// Parse a `/data/2.5/weather` body. Temperatures are rounded to whole
/// degrees.
pub fn parse_current(body: &str) -> Result<CurrentWeather, SourceError> {
    let reply: Reply = serde_json::from_str(body)?;
    let condition = reply
        .weather
        .into_iter()
        .next()
        .ok_or_else(|| SourceError::Rejected("reply has no weather conditions".to_string()))?;

    Ok(CurrentWeather {
        temperature: reply.main.temp.round(),
        feels_like: reply.main.feels_like.round(),
        humidity: reply.main.humidity.clamp(0.0, 100.0).round() as u8,
        description: condition.description,
        icon: condition.icon,
        wind_speed: reply.wind.speed,
    })
}
