//! Derived-statistics endpoint: fetch, derive, and return in one round trip.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use vaarey_core::AppError;
use vaarey_weather::{cities, derive, local_date, local_time, DayRecord, RainfallError, Statistics};

use crate::routes::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub city: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub atoll: Option<&'static str>,
    pub latitude: f64,
    pub longitude: f64,
    pub utc_offset_seconds: i32,
    /// RFC 3339 wall-clock time at the location when the request was served.
    pub local_time: String,
    pub days: Vec<DayRecord>,
    pub stats: Statistics,
    pub today_index: usize,
}

pub async fn stats(
    State(state): State<Arc<AppState>>,
    Query(params): Query<StatsParams>,
) -> Response {
    let (city, latitude, longitude) = match resolve_location(&params) {
        Ok(resolved) => resolved,
        Err(response) => return response,
    };

    let report = match state.provider.fetch(latitude, longitude).await {
        Ok(report) => report,
        Err(e) => return rainfall_error_response(e),
    };

    let now = Utc::now();
    let today = match local_date(now, report.utc_offset_seconds) {
        Ok(date) => date,
        Err(e) => return rainfall_error_response(e),
    };

    let derived = match derive(
        &report.series,
        today,
        state.config.weather.today_fallback,
        state.config.weather.past_days as usize,
    ) {
        Ok(derived) => derived,
        Err(e) => return rainfall_error_response(e),
    };

    // Infallible here: local_date above already range-checked the offset.
    let local = match local_time(now, report.utc_offset_seconds) {
        Ok(local) => local,
        Err(e) => return rainfall_error_response(e),
    };

    Json(StatsResponse {
        city: city.map(|c| c.name),
        atoll: city.map(|c| c.atoll),
        latitude,
        longitude,
        utc_offset_seconds: report.utc_offset_seconds,
        local_time: local.to_rfc3339(),
        days: derived.days,
        stats: derived.stats,
        today_index: derived.today_index,
    })
    .into_response()
}

fn resolve_location(
    params: &StatsParams,
) -> Result<(Option<&'static vaarey_weather::City>, f64, f64), Response> {
    if let Some(name) = &params.city {
        let city = cities::find(name).ok_or_else(|| {
            rainfall_error_response(RainfallError::UnknownCity(name.clone()))
        })?;
        return Ok((Some(city), city.latitude, city.longitude));
    }
    match (params.latitude, params.longitude) {
        (Some(latitude), Some(longitude))
            if (-90.0..=90.0).contains(&latitude) && (-180.0..=180.0).contains(&longitude) =>
        {
            Ok((None, latitude, longitude))
        }
        _ => Err(error_response(
            StatusCode::BAD_REQUEST,
            "invalid location",
            "supply either city or latitude and longitude",
        )),
    }
}

/// Map rainfall failures onto HTTP statuses: empty data and unknown cities
/// are 404, everything upstream-shaped is 502.
fn rainfall_error_response(error: RainfallError) -> Response {
    let status = match &error {
        RainfallError::EmptySeries | RainfallError::UnknownCity(_) => StatusCode::NOT_FOUND,
        _ => StatusCode::BAD_GATEWAY,
    };
    let details = error.to_string();
    let app_error = AppError::Rainfall(error);
    error_response(status, app_error.user_message(), details)
}
