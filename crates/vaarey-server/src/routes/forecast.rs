//! Pass-through proxy to the upstream weather provider.
//!
//! The browser cannot call the provider directly, so this route forwards the
//! query and returns the upstream JSON verbatim with the upstream status
//! code. Transport failures become a 500 with the shared error envelope.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::Response;
use serde::Deserialize;

use vaarey_core::{AppError, ReqwestErrorExt};

use crate::routes::{error_response, passthrough_response};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ForecastParams {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub past_days: Option<u32>,
    pub forecast_days: Option<u32>,
}

impl ForecastParams {
    fn coordinates(&self) -> Result<(f64, f64), String> {
        let latitude = self.latitude.ok_or("missing latitude")?;
        let longitude = self.longitude.ok_or("missing longitude")?;
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(format!("latitude {latitude} out of range"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(format!("longitude {longitude} out of range"));
        }
        Ok((latitude, longitude))
    }
}

pub async fn forecast(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ForecastParams>,
) -> Response {
    let (latitude, longitude) = match params.coordinates() {
        Ok(coords) => coords,
        Err(details) => {
            return error_response(StatusCode::BAD_REQUEST, "invalid coordinates", details)
        }
    };
    let past_days = params.past_days.unwrap_or(state.config.weather.past_days);
    let forecast_days = params
        .forecast_days
        .unwrap_or(state.config.weather.forecast_days);

    let url = format!(
        "{}/v1/forecast?latitude={}&longitude={}&daily=precipitation_sum&timezone=auto&past_days={}&forecast_days={}",
        state.config.upstream.base_url, latitude, longitude, past_days, forecast_days
    );

    let upstream = match state.http.get(&url).send().await {
        Ok(response) => response,
        Err(e) => {
            tracing::warn!("Forecast proxy transport failure: {}", e);
            return transport_failure_response(e);
        }
    };

    let status = upstream.status().as_u16();
    match upstream.bytes().await {
        Ok(body) => passthrough_response(status, body),
        Err(e) => transport_failure_response(e),
    }
}

fn transport_failure_response(e: reqwest::Error) -> Response {
    let error = AppError::Network(e.into_network_error());
    error_response(StatusCode::INTERNAL_SERVER_ERROR, error.user_message(), error)
}
