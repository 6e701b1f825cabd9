//! BMKG (Indonesian meteorological agency) open data feeds.
//!
//! - `{base}/DataMKG/TEWS/autogempa.xml`: the latest felt earthquake.
//! - `{base}/DataMKG/MEWS/DigitalForecast/DigitalForecast-{Province}.xml`:
//!   per-area forecasts, of which only the `weather` parameter is read.

use async_trait::async_trait;
use masjid_core::alert::{AreaForecast, HazardFeed, SeismicReport};
use masjid_core::error::{CoreError, SourceFailure};
use serde::Deserialize;

use crate::error::SourceError;
use crate::http::{fetch_text, join_url};

pub const SOURCE_NAME: &str = "bmkg";
pub const DEFAULT_BASE_URL: &str = "https://data.bmkg.go.id";

pub struct BmkgFeed {
    client: reqwest::Client,
    base_url: String,
}

impl BmkgFeed {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    async fn fetch_earthquake(&self) -> Result<SeismicReport, SourceError> {
        let url = join_url(&self.base_url, "DataMKG/TEWS/autogempa.xml");
        let body = fetch_text(self.client.get(url)).await?;
        parse_autogempa(&body)
    }

    async fn fetch_forecasts(&self, province: &str) -> Result<Vec<AreaForecast>, SourceError> {
        let province: String = province.chars().filter(|c| c.is_ascii_alphanumeric()).collect();
        if province.is_empty() {
            return Err(SourceError::Rejected("no forecast province configured".to_string()));
        }

        let url = join_url(
            &self.base_url,
            &format!("DataMKG/MEWS/DigitalForecast/DigitalForecast-{province}.xml"),
        );
        let body = fetch_text(self.client.get(url)).await?;
        parse_digital_forecast(&body)
    }
}

#[async_trait]
impl HazardFeed for BmkgFeed {
    async fn latest_earthquake(&self) -> Result<SeismicReport, SourceFailure> {
        self.fetch_earthquake()
            .await
            .map_err(|e| e.into_failure(SOURCE_NAME))
    }

    async fn area_forecasts(&self, province: &str) -> Result<Vec<AreaForecast>, SourceFailure> {
        self.fetch_forecasts(province)
            .await
            .map_err(|e| e.into_failure(SOURCE_NAME))
    }
}

// ---------------------------------------------------------------------------
// autogempa.xml
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct Infogempa {
    gempa: Gempa,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct Gempa {
    #[serde(default)]
    tanggal: String,
    #[serde(default)]
    jam: String,
    /// `"lat,lon"`.
    #[serde(default)]
    coordinates: String,
    magnitude: String,
    #[serde(default)]
    kedalaman: String,
    #[serde(default)]
    wilayah: String,
}

pub fn parse_autogempa(body: &str) -> Result<SeismicReport, SourceError> {
    let Infogempa { gempa } = quick_xml::de::from_str(body)?;

    let magnitude: f64 = gempa
        .magnitude
        .trim()
        .parse()
        .map_err(|_| CoreError::Parse(format!("invalid magnitude '{}'", gempa.magnitude)))?;

    let occurred_at = format!("{} {}", gempa.tanggal.trim(), gempa.jam.trim())
        .trim()
        .to_string();

    Ok(SeismicReport {
        magnitude,
        depth: gempa.kedalaman.trim().to_string(),
        epicenter: gempa.coordinates.trim().to_string(),
        region: gempa.wilayah.trim().to_string(),
        occurred_at,
    })
}

// ---------------------------------------------------------------------------
// DigitalForecast-<Province>.xml
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
struct ForecastDocument {
    forecast: Forecast,
}

#[derive(Deserialize)]
struct Forecast {
    #[serde(rename = "area", default)]
    areas: Vec<Area>,
}

#[derive(Deserialize)]
struct Area {
    #[serde(rename = "@description", default)]
    description: String,
    #[serde(rename = "parameter", default)]
    parameters: Vec<Parameter>,
}

#[derive(Deserialize)]
struct Parameter {
    #[serde(rename = "@id")]
    id: String,
    #[serde(rename = "timerange", default)]
    timeranges: Vec<TimeRange>,
}

#[derive(Deserialize)]
struct TimeRange {
    #[serde(rename = "value", default)]
    values: Vec<Value>,
}

#[derive(Deserialize)]
struct Value {
    #[serde(rename = "$text", default)]
    text: String,
}

const WEATHER_PARAMETER: &str = "weather";

/// Weather codes per area, in document (chronological) order.
///
/// Areas without a weather parameter are dropped; unparsable codes are
/// skipped.
pub fn parse_digital_forecast(body: &str) -> Result<Vec<AreaForecast>, SourceError> {
    let document: ForecastDocument = quick_xml::de::from_str(body)?;

    let forecasts = document
        .forecast
        .areas
        .into_iter()
        .filter_map(|area| {
            let weather = area
                .parameters
                .into_iter()
                .find(|p| p.id == WEATHER_PARAMETER)?;
            let codes = weather
                .timeranges
                .iter()
                .filter_map(|range| range.values.first())
                .filter_map(|value| value.text.trim().parse::<i32>().ok())
                .collect();
            Some(AreaForecast {
                city: area.description,
                codes,
            })
        })
        .collect();

    Ok(forecasts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    const AUTOGEMPA: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<Infogempa>
  <gempa>
    <Tanggal>14 Okt 2026</Tanggal>
    <Jam>10:22:01 WIB</Jam>
    <DateTime>2026-10-14T03:22:01+00:00</DateTime>
    <Coordinates>-8.47,110.46</Coordinates>
    <Lintang>8.47 LS</Lintang>
    <Bujur>110.46 BT</Bujur>
    <Magnitude>5.2</Magnitude>
    <Kedalaman>10 km</Kedalaman>
    <Wilayah>Pusat gempa berada di laut 85 km BaratDaya Gunungkidul</Wilayah>
    <Potensi>Tidak berpotensi tsunami</Potensi>
    <Dirasakan>III Yogyakarta</Dirasakan>
    <Shakemap>20261014102201.mmi.jpg</Shakemap>
  </gempa>
</Infogempa>"#;

    #[test]
    fn parses_latest_earthquake() {
        let report = parse_autogempa(AUTOGEMPA).unwrap();
        assert_eq!(report.magnitude, 5.2);
        assert_eq!(report.epicenter, "-8.47,110.46");
        assert_eq!(report.depth, "10 km");
        assert_eq!(report.occurred_at, "14 Okt 2026 10:22:01 WIB");
        assert!(report.region.starts_with("Pusat gempa"));
    }

    #[test]
    fn bad_magnitude_is_a_payload_error() {
        let body = AUTOGEMPA.replace("<Magnitude>5.2</Magnitude>", "<Magnitude>n/a</Magnitude>");
        assert_matches!(parse_autogempa(&body), Err(SourceError::Payload(CoreError::Parse(_))));
    }

    #[test]
    fn non_xml_body_is_an_xml_error() {
        assert_matches!(parse_autogempa("not xml at all"), Err(SourceError::Xml(_)));
    }

    const FORECAST: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<data source="meteofactory" productioncenter="BMKG">
  <forecast domain="JawaTimur">
    <issue>
      <timestamp>20261014060000</timestamp>
    </issue>
    <area id="501290" latitude="-7.98" longitude="112.63" type="land" level="1" description="Malang" domain="Jawa Timur">
      <name xml:lang="en_US">Malang</name>
      <name xml:lang="id_ID">Malang</name>
      <parameter id="hu" description="Humidity" type="hourly">
        <timerange type="hourly" h="0" datetime="202610140000"><value unit="%">85</value></timerange>
      </parameter>
      <parameter id="weather" description="Weather" type="hourly">
        <timerange type="hourly" h="0" datetime="202610140000"><value unit="icon">95</value></timerange>
        <timerange type="hourly" h="6" datetime="202610140600"><value unit="icon">3</value></timerange>
      </parameter>
    </area>
    <area id="501300" latitude="-7.25" longitude="112.75" type="land" level="1" description="Surabaya" domain="Jawa Timur">
      <name xml:lang="en_US">Surabaya</name>
      <parameter id="weather" description="Weather" type="hourly">
        <timerange type="hourly" h="0" datetime="202610140000"><value unit="icon">1</value></timerange>
      </parameter>
    </area>
    <area id="501400" description="Laut Jawa" type="sea">
      <name xml:lang="en_US">Java Sea</name>
    </area>
  </forecast>
</data>"#;

    #[test]
    fn parses_weather_codes_per_area() {
        let forecasts = parse_digital_forecast(FORECAST).unwrap();
        assert_eq!(
            forecasts,
            vec![
                AreaForecast {
                    city: "Malang".into(),
                    codes: vec![95, 3],
                },
                AreaForecast {
                    city: "Surabaya".into(),
                    codes: vec![1],
                },
            ]
        );
    }

    #[test]
    fn forecast_without_areas_is_empty() {
        let body = r#"<data><forecast domain="X"></forecast></data>"#;
        assert!(parse_digital_forecast(body).unwrap().is_empty());
    }
}
