//! PrayZone times API (secondary source, legacy `school` convention).
//!
//! `GET {base}/v2/times/today.json?latitude&longitude&elevation=0&school=<id>`
//!
//! The service only knows the legacy numeric school ids, so the requested
//! method is mapped through [`CalculationMethod::legacy_school`].

use async_trait::async_trait;
use masjid_core::error::SourceFailure;
use masjid_core::method::CalculationMethod;
use masjid_core::prayer::Schedule;
use masjid_core::resolver::{LocationQuery, PrayerTimeSource};
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{fetch_text, join_url};
use crate::times::{normalize, RawTimes};

pub const SOURCE_NAME: &str = "prayzone";
pub const DEFAULT_BASE_URL: &str = "https://api.pray.zone";

pub struct PrayZoneSource {
    client: reqwest::Client,
    base_url: String,
}

impl PrayZoneSource {
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
        let request = self
            .client
            .get(join_url(&self.base_url, "v2/times/today.json"))
            .query(&[
                ("latitude", query.latitude.to_string()),
                ("longitude", query.longitude.to_string()),
                ("elevation", "0".to_string()),
                ("school", method.legacy_school().to_string()),
            ]);

        let body = fetch_text(request).await?;
        parse_today(&body, query)
    }
}

#[async_trait]
impl PrayerTimeSource for PrayZoneSource {
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

#[derive(Deserialize)]
struct Envelope {
    #[serde(default)]
    status: String,
    #[serde(default)]
    results: Option<Results>,
}

#[derive(Deserialize)]
struct Results {
    #[serde(default)]
    datetime: Vec<Day>,
}

#[derive(Deserialize)]
struct Day {
    times: Times,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Times {
    imsak: Option<String>,
    fajr: String,
    sunrise: String,
    dhuhr: String,
    asr: String,
    maghrib: String,
    isha: String,
}

/// Parse a `/v2/times/today.json` body into a schedule for `query`.
pub fn parse_today(body: &str, query: &LocationQuery) -> Result<Schedule, SourceError> {
    let envelope: Envelope = serde_json::from_str(body)?;
    if envelope.status != "OK" {
        return Err(SourceError::Rejected(format!("status '{}'", envelope.status)));
    }

    let times = envelope
        .results
        .and_then(|r| r.datetime.into_iter().next())
        .map(|day| day.times)
        .ok_or_else(|| SourceError::Rejected("reply has no datetime entries".to_string()))?;

    Ok(normalize(
        RawTimes {
            imsak: times.imsak.as_deref(),
            fajr: &times.fajr,
            sunrise: &times.sunrise,
            dhuhr: &times.dhuhr,
            asr: &times.asr,
            maghrib: &times.maghrib,
            isha: &times.isha,
        },
        query,
    )?)
}
