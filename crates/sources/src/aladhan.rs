//! Aladhan timings API (primary prayer-time source).
//!
//! `GET {base}/v1/timings/{DD-MM-YYYY}?latitude&longitude&method&school&timezonestring`

use async_trait::async_trait;
use masjid_core::error::SourceFailure;
use masjid_core::method::CalculationMethod;
use masjid_core::prayer::Schedule;
use masjid_core::resolver::{LocationQuery, PrayerTimeSource};
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{fetch_text, join_url};
use crate::times::{normalize, RawTimes};

pub const SOURCE_NAME: &str = "aladhan";
pub const DEFAULT_BASE_URL: &str = "https://api.aladhan.com";

/// Aladhan's numeric id for a calculation method.
pub fn method_id(method: CalculationMethod) -> u8 {
    match method {
        CalculationMethod::Karachi => 1,
        CalculationMethod::Isna => 2,
        CalculationMethod::Mwl => 3,
        CalculationMethod::Makkah => 4,
        CalculationMethod::Egyptian => 5,
        CalculationMethod::Tehran => 7,
        CalculationMethod::Singapore => 11,
        CalculationMethod::Jakim => 17,
        CalculationMethod::Kemenag => 20,
    }
}

pub struct AladhanSource {
    client: reqwest::Client,
    base_url: String,
}

impl AladhanSource {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_schedule(
        &self,
        query: &LocationQuery,
        method: CalculationMethod,
    ) -> Result<Schedule, SourceError> {
        let url = join_url(
            &self.base_url,
            &format!("v1/timings/{}", query.date.format("%d-%m-%Y")),
        );
        let request = self.client.get(url).query(&[
            ("latitude", query.latitude.to_string()),
            ("longitude", query.longitude.to_string()),
            ("method", method_id(method).to_string()),
            ("school", "0".to_string()),
            ("timezonestring", query.timezone.clone()),
        ]);

        let body = fetch_text(request).await?;
        parse_timings(&body, query)
    }
}

#[async_trait]
impl PrayerTimeSource for AladhanSource {
    fn name(&self) -> &'static str {
        SOURCE_NAME
    }

    async fn fetch(
        &self,
        query: &LocationQuery,
        method: CalculationMethod,
    ) -> Result<Schedule, SourceFailure> {
        self.fetch_schedule(query, method)
            .await
            .map_err(|e| e.into_failure(SOURCE_NAME))
    }
}

// ---------------------------------------------------------------------------
// Response parsing
// ---------------------------------------------------------------------------

/// Only `code` is read first: on errors Aladhan puts a message string in
/// `data` instead of the timings object.
#[derive(Deserialize)]
struct Envelope {
    code: u16,
    #[serde(default)]
    status: String,
    #[serde(default)]
    data: serde_json::Value,
}

#[derive(Deserialize)]
struct TimingsData {
    timings: Timings,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Timings {
    imsak: Option<String>,
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

/// Parse a `/v1/timings` body into a schedule for `query`.
pub fn parse_timings(body: &str, query: &LocationQuery) -> Result<Schedule, SourceError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.code != 200 {
        let detail = envelope
            .data
            .as_str()
            .map(str::to_string)
            .unwrap_or(envelope.status);
        return Err(SourceError::Rejected(format!("code {}: {detail}", envelope.code)));
    }

    let TimingsData { timings } = serde_json::from_value(envelope.data)?;

    Ok(normalize(
        RawTimes {
            imsak: timings.imsak.as_deref(),
            fajr: &timings.fajr,
            sunrise: &timings.sunrise,
            dhuhr: &timings.dhuhr,
            asr: &timings.asr,
            maghrib: &timings.maghrib,
            isha: &timings.isha,
        },
        query,
    )?)
}
