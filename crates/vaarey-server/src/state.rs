use std::time::Duration;

use reqwest::Client;

use vaarey_core::{AppError, Config};
use vaarey_weather::RainfallProvider;

/// Shared per-request state: configuration plus the two HTTP clients.
///
/// `provider` does typed fetches for the stats route; `http` is the plain
/// client the proxy route forwards through verbatim.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub provider: RainfallProvider,
    pub http: Client,
}

impl AppState {
    /// Build state from a validated configuration.
    ///
    /// # Errors
    /// Fails when either HTTP client cannot be constructed.
    pub fn from_config(config: Config) -> Result<Self, AppError> {
        let provider = RainfallProvider::with_base_url(&config.upstream.base_url)
            .and_then(|p| p.with_timeout(Duration::from_secs(config.upstream.timeout_secs)))
            .map(|p| p.with_window(config.weather.past_days, config.weather.forecast_days))
            .map_err(AppError::Rainfall)?;

        let http = Client::builder()
            .timeout(Duration::from_secs(config.upstream.timeout_secs))
            .build()
            .map_err(|e| AppError::Rainfall(e.into()))?;

        Ok(Self {
            config,
            provider,
            http,
        })
    }
}
