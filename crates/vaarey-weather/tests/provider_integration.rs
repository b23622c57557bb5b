//! Integration tests for RainfallProvider against a mocked Open-Meteo.

use chrono::NaiveDate;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaarey_weather::{RainfallError, RainfallProvider, TodayFallback};

/// A realistic 14-day Open-Meteo daily payload for Malé.
fn male_payload() -> serde_json::Value {
    serde_json::json!({
        "latitude": 4.25,
        "longitude": 73.5,
        "utc_offset_seconds": 18000,
        "timezone": "Indian/Maldives",
        "daily_units": { "time": "iso8601", "precipitation_sum": "mm" },
        "daily": {
            "time": [
                "2026-08-23", "2026-08-24", "2026-08-25", "2026-08-26",
                "2026-08-27", "2026-08-28", "2026-08-29", "2026-08-30",
                "2026-08-31", "2026-09-01", "2026-09-02", "2026-09-03",
                "2026-09-04", "2026-09-05"
            ],
            "precipitation_sum": [
                1.0, 0.0, 3.5, 0.0, 2.0, 0.0, 0.0, 4.0,
                null, 0.0, 0.0, 0.0, 0.0, 0.0
            ]
        }
    })
}

#[tokio::test]
async fn test_fetch_parses_full_series() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("daily", "precipitation_sum"))
        .and(query_param("past_days", "7"))
        .and(query_param("forecast_days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(male_payload()))
        .mount(&server)
        .await;

    let provider = RainfallProvider::with_base_url(server.uri()).unwrap();
    let report = provider.fetch(4.1755, 73.5093).await.unwrap();

    assert_eq!(report.series.len(), 14);
    assert_eq!(report.utc_offset_seconds, 18000);
    // The null entry coerces to a dry day.
    assert_eq!(report.series.amounts()[8], 0.0);
    assert_eq!(
        report.series.dates()[0],
        NaiveDate::parse_from_str("2026-08-23", "%Y-%m-%d").unwrap()
    );
}

#[tokio::test]
async fn test_fetch_then_derive_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(male_payload()))
        .mount(&server)
        .await;

    let provider = RainfallProvider::with_base_url(server.uri()).unwrap();
    let report = provider.fetch(4.1755, 73.5093).await.unwrap();

    let today = NaiveDate::parse_from_str("2026-08-30", "%Y-%m-%d").unwrap();
    let derived = vaarey_weather::derive(
        &report.series,
        today,
        TodayFallback::PastDaysIndex,
        provider.past_days() as usize,
    )
    .unwrap();

    assert_eq!(derived.today_index, 7);
    assert_eq!(derived.stats.today, 4.0);
    assert_eq!(derived.stats.peak, 4.0);
}

#[tokio::test]
async fn test_fetch_missing_daily_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "utc_offset_seconds": 18000 })),
        )
        .mount(&server)
        .await;

    let provider = RainfallProvider::with_base_url(server.uri()).unwrap();
    let err = provider.fetch(4.1755, 73.5093).await.unwrap_err();
    assert!(matches!(err, RainfallError::MalformedPayload(_)));
}

#[tokio::test]
async fn test_fetch_surfaces_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let provider = RainfallProvider::with_base_url(server.uri()).unwrap();
    let err = provider.fetch(4.1755, 73.5093).await.unwrap_err();
    assert!(matches!(err, RainfallError::UpstreamStatus(429)));
}

#[tokio::test]
async fn test_fetch_transport_failure_is_network_error() {
    // Nothing listens here.
    let provider = RainfallProvider::with_base_url("http://127.0.0.1:1").unwrap();
    let err = provider.fetch(4.1755, 73.5093).await.unwrap_err();
    assert!(matches!(err, RainfallError::Network(_)));
}

#[tokio::test]
async fn test_custom_window_is_sent_upstream() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("past_days", "3"))
        .and(query_param("forecast_days", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(male_payload()))
        .mount(&server)
        .await;

    let provider = RainfallProvider::with_base_url(server.uri())
        .unwrap()
        .with_window(3, 5);
    assert!(provider.fetch(4.1755, 73.5093).await.is_ok());
}
