//! Open-Meteo fetch collaborator.
//!
//! Fetches the daily precipitation series for a location and validates it
//! into a [`RainfallReport`]. Network policy lives here: a 10 second
//! timeout, no internal retries, no de-duplication of concurrent refreshes
//! (last-write-wins is the caller's concern).

use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;

use crate::types::{City, DailySeries, RainfallError, RainfallReport};

pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com";
pub const DEFAULT_PAST_DAYS: u32 = 7;
pub const DEFAULT_FORECAST_DAYS: u32 = 7;
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Raw upstream response shape. Optional fields stay optional here so the
/// provider, not serde, decides what counts as malformed.
#[derive(Debug, Deserialize)]
struct ForecastResponse {
    utc_offset_seconds: Option<i32>,
    daily: Option<DailyBlock>,
}

#[derive(Debug, Deserialize)]
struct DailyBlock {
    time: Option<Vec<String>>,
    /// Null entries mean the provider has no value for that day.
    precipitation_sum: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Clone)]
pub struct RainfallProvider {
    client: Arc<Client>,
    base_url: String,
    past_days: u32,
    forecast_days: u32,
}

impl RainfallProvider {
    /// Provider against the public Open-Meteo endpoint with the default
    /// 7 past + 7 forecast day window.
    ///
    /// # Errors
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn new() -> Result<Self, RainfallError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Provider against a custom base URL (tests point this at a mock).
    ///
    /// # Errors
    /// Fails only if the underlying HTTP client cannot be constructed.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, RainfallError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.into(),
            past_days: DEFAULT_PAST_DAYS,
            forecast_days: DEFAULT_FORECAST_DAYS,
        })
    }

    /// Override the past/forecast day window.
    pub fn with_window(mut self, past_days: u32, forecast_days: u32) -> Self {
        self.past_days = past_days;
        self.forecast_days = forecast_days;
        self
    }

    /// Override the per-request timeout (default 10 seconds).
    ///
    /// # Errors
    /// Fails only if the underlying HTTP client cannot be rebuilt.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, RainfallError> {
        self.client = Arc::new(Client::builder().timeout(timeout).build()?);
        Ok(self)
    }

    /// Number of past days requested; feeds the today-fallback policy.
    pub fn past_days(&self) -> u32 {
        self.past_days
    }

    /// Fetch and validate the rainfall series for a coordinate pair.
    ///
    /// # Errors
    /// `Network` on transport failure or timeout, `UpstreamStatus` on a
    /// non-success response, `MalformedPayload` when the expected fields are
    /// missing or undecodable.
    pub async fn fetch(&self, latitude: f64, longitude: f64) -> Result<RainfallReport, RainfallError> {
        let url = format!(
            "{}/v1/forecast?latitude={}&longitude={}&daily=precipitation_sum&timezone=auto&past_days={}&forecast_days={}",
            self.base_url, latitude, longitude, self.past_days, self.forecast_days
        );

        tracing::debug!("Fetching rainfall series: {}", url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Rainfall fetch returned status {}", status);
            return Err(RainfallError::UpstreamStatus(status.as_u16()));
        }

        let body: ForecastResponse = response
            .json()
            .await
            .map_err(|e| RainfallError::MalformedPayload(e.to_string()))?;

        let report = Self::validate(body, latitude, longitude)?;
        tracing::info!(
            "Fetched {} rainfall days for {}, {}",
            report.series.len(),
            latitude,
            longitude
        );
        Ok(report)
    }

    /// Fetch for a catalog city.
    ///
    /// # Errors
    /// Same as [`RainfallProvider::fetch`].
    pub async fn fetch_city(&self, city: &City) -> Result<RainfallReport, RainfallError> {
        self.fetch(city.latitude, city.longitude).await
    }

    fn validate(
        body: ForecastResponse,
        latitude: f64,
        longitude: f64,
    ) -> Result<RainfallReport, RainfallError> {
        let utc_offset_seconds = body
            .utc_offset_seconds
            .ok_or_else(|| RainfallError::MalformedPayload("missing utc_offset_seconds".into()))?;
        let daily = body
            .daily
            .ok_or_else(|| RainfallError::MalformedPayload("missing daily block".into()))?;
        let time = daily
            .time
            .ok_or_else(|| RainfallError::MalformedPayload("missing daily.time".into()))?;
        let sums = daily.precipitation_sum.ok_or_else(|| {
            RainfallError::MalformedPayload("missing daily.precipitation_sum".into())
        })?;

        let dates = time
            .iter()
            .map(|raw| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                    RainfallError::MalformedPayload(format!("unparseable date: {raw}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Open-Meteo emits null for days it has no value; treat those as dry.
        let amounts: Vec<f64> = sums.into_iter().map(|a| a.unwrap_or(0.0)).collect();

        let series = DailySeries::new(dates, amounts)?;

        Ok(RainfallReport {
            latitude,
            longitude,
            utc_offset_seconds,
            series,
            fetched_at: Utc::now(),
        })
    }
}
