//! Integration tests for the weather widget and alert ticker endpoints.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_app, get, StubHazards, TestApp};
use masjid_core::alert::{AreaForecast, SeismicReport};
use masjid_core::weather::CurrentWeather;

fn quake(magnitude: f64, epicenter: &str) -> SeismicReport {
    SeismicReport {
        magnitude,
        depth: "10 km".into(),
        epicenter: epicenter.into(),
        region: "Selat Malaka".into(),
        occurred_at: "14 Okt 2026 04:12:09 WIB".into(),
    }
}

// ---------------------------------------------------------------------------
// Test: GET /api/weather
// ---------------------------------------------------------------------------

#[tokio::test]
async fn weather_reports_current_conditions() {
    let app = build_app(TestApp {
        weather: Some(CurrentWeather {
            temperature: 31.0,
            feels_like: 35.0,
            humidity: 64,
            description: "few clouds".into(),
            icon: "02d".into(),
            wind_speed: 1.8,
        }),
        ..Default::default()
    });

    let response = get(app, "/api/weather").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["temperature"], 31.0);
    assert_eq!(json["humidity"], 64);
    assert_eq!(json["description"], "few clouds");
}

#[tokio::test]
async fn weather_outage_serves_fallback() {
    let app = common::build_test_app();
    let response = get(app, "/api/weather").await;

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["temperature"], 28.0);
    assert_eq!(json["humidity"], 75);
    assert_eq!(json["description"], "cloudy");
    assert_eq!(json["icon"], "02d");
}

// ---------------------------------------------------------------------------
// Test: GET /api/alerts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn feed_outage_yields_empty_alert_list() {
    let app = common::build_test_app();
    let response = get(app, "/api/alerts").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"], serde_json::json!([]));
}

#[tokio::test]
async fn nearby_quake_and_severe_forecast_both_alert() {
    let app = build_app(TestApp {
        hazards: StubHazards {
            quake: Some(quake(5.0, "3.5,101.5")),
            forecasts: Some(vec![
                AreaForecast {
                    city: "Surabaya".into(),
                    codes: vec![3],
                },
                AreaForecast {
                    city: "Malang".into(),
                    codes: vec![97, 3],
                },
            ]),
        },
        ..Default::default()
    });

    let json = body_json(get(app, "/api/alerts").await).await;
    let alerts = json["data"].as_array().unwrap();
    assert_eq!(alerts.len(), 2);

    assert_eq!(alerts[0]["type"], "seismic");
    assert_eq!(alerts[0]["magnitude"], 5.0);
    assert!(alerts[0]["distance_km"].as_f64().unwrap() < 100.0);
    assert!(alerts[0]["advisory"]
        .as_str()
        .unwrap()
        .starts_with("Earthquake M5.0 about"));

    assert_eq!(alerts[1]["type"], "severe_weather");
    assert_eq!(alerts[1]["city"], "Malang");
    assert_eq!(alerts[1]["code"], 97);
}

#[tokio::test]
async fn distant_moderate_quake_is_ignored() {
    // Papua, thousands of kilometres from the default site.
    let app = build_app(TestApp {
        hazards: StubHazards {
            quake: Some(quake(5.0, "-2.5,140.7")),
            forecasts: Some(vec![]),
        },
        ..Default::default()
    });

    let json = body_json(get(app, "/api/alerts").await).await;
    assert_eq!(json["data"], serde_json::json!([]));
}
