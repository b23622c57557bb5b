use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;
use vaarey_weather::TodayFallback;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Upstream weather provider settings
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Derivation settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Local clock settings
    #[serde(default)]
    pub clock: ClockConfig,

    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamConfig {
    /// Base URL of the Open-Meteo-compatible provider
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    vaarey_weather::provider::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Past days requested from the provider
    #[serde(default = "default_past_days")]
    pub past_days: u32,

    /// Forecast days requested from the provider
    #[serde(default = "default_forecast_days")]
    pub forecast_days: u32,

    /// Where "today" lands when the reference date is absent from the series
    #[serde(default)]
    pub today_fallback: TodayFallback,
}

fn default_past_days() -> u32 {
    7
}

fn default_forecast_days() -> u32 {
    7
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            past_days: default_past_days(),
            forecast_days: default_forecast_days(),
            today_fallback: TodayFallback::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Local-time refresh cadence in seconds. The server never ticks a clock
    /// itself; the dashboard UI reads this and re-derives the wall-clock time
    /// on each tick.
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

fn default_refresh_secs() -> u64 {
    1
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            refresh_secs: default_refresh_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API server binds to
    #[serde(default = "default_listen")]
    pub listen: String,
}

fn default_listen() -> String {
    "127.0.0.1:3971".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, or defaults when `path` is None.
    ///
    /// # Errors
    /// [`ConfigError::NotFound`] when the file cannot be read and
    /// [`ConfigError::ParseError`] when it is not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };

        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::NotFound(format!("{}: {}", path.display(), e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", path.display(), e)))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    ///
    /// # Errors
    /// The load errors above, plus [`ConfigError::Invalid`] when validation
    /// fails with critical errors.
    pub fn load_validated(path: Option<&Path>) -> Result<(Self, ValidationResult), ConfigError> {
        let config = Self::load(path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()));
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.upstream.base_url, "upstream.base_url", &mut result);

        if self.upstream.timeout_secs == 0 {
            result.add_error("upstream.timeout_secs", "Timeout must be greater than 0");
        } else if self.upstream.timeout_secs > 60 {
            result.add_warning(
                "upstream.timeout_secs",
                "Timeout is unusually long (>60 seconds)",
            );
        }

        // Open-Meteo caps at 92 past and 16 forecast days.
        if self.weather.past_days > 92 {
            result.add_error("weather.past_days", "Provider supports at most 92 past days");
        }
        if self.weather.forecast_days == 0 {
            result.add_error(
                "weather.forecast_days",
                "At least one forecast day is required (it carries today)",
            );
        } else if self.weather.forecast_days > 16 {
            result.add_error(
                "weather.forecast_days",
                "Provider supports at most 16 forecast days",
            );
        }

        if self.clock.refresh_secs == 0 {
            result.add_warning("clock.refresh_secs", "Clock refresh disabled (0 seconds)");
        }

        if self.server.listen.parse::<std::net::SocketAddr>().is_err() {
            result.add_error(
                "server.listen",
                format!("Not a valid socket address: {}", self.server.listen),
            );
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_default_config() {
        let config = Config::default();
        let result = config.validate();
        assert!(
            result.is_valid(),
            "Default config should be valid: {:?}",
            result.errors
        );
        assert_eq!(config.upstream.timeout_secs, 10);
        assert_eq!(config.weather.past_days, 7);
        assert_eq!(config.weather.forecast_days, 7);
        assert_eq!(config.clock.refresh_secs, 1);
    }

    #[test]
    fn test_invalid_url() {
        let mut config = Config::default();
        config.upstream.base_url = "not-a-url".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "upstream.base_url"));
    }

    #[test]
    fn test_invalid_url_scheme() {
        let mut config = Config::default();
        config.upstream.base_url = "ftp://localhost:8080".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.message.contains("http or https")));
    }

    #[test]
    fn test_zero_timeout_is_error() {
        let mut config = Config::default();
        config.upstream.timeout_secs = 0;
        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_zero_forecast_days_is_error() {
        let mut config = Config::default();
        config.weather.forecast_days = 0;
        let result = config.validate();
        assert!(!result.is_valid());
        assert!(result.errors.iter().any(|e| e.field == "weather.forecast_days"));
    }

    #[test]
    fn test_zero_clock_refresh_is_warning() {
        let mut config = Config::default();
        config.clock.refresh_secs = 0;
        let result = config.validate();
        assert!(result.is_valid());
        assert!(result.warnings.iter().any(|w| w.field == "clock.refresh_secs"));
    }

    #[test]
    fn test_bad_listen_address_is_error() {
        let mut config = Config::default();
        config.server.listen = "nowhere".to_string();
        let result = config.validate();
        assert!(!result.is_valid());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: Config = toml::from_str(
            r#"
            [weather]
            today_fallback = "last-entry"
            "#,
        )
        .unwrap();
        assert_eq!(config.weather.today_fallback, TodayFallback::LastEntry);
        assert_eq!(config.weather.past_days, 7);
        assert_eq!(config.upstream.timeout_secs, 10);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vaarey.toml");
        std::fs::write(
            &path,
            r#"
            [upstream]
            base_url = "http://localhost:9999"

            [server]
            listen = "0.0.0.0:8080"
            "#,
        )
        .unwrap();

        let (config, validation) = Config::load_validated(Some(&path)).unwrap();
        assert_eq!(config.upstream.base_url, "http://localhost:9999");
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert!(validation.is_valid());
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = Config::load(Some(Path::new("/nonexistent/vaarey.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
        assert!(err.to_string().contains("/nonexistent/vaarey.toml"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vaarey.toml");
        std::fs::write(&path, "[upstream\nbase_url = ").unwrap();

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_validated_rejects_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vaarey.toml");
        std::fs::write(
            &path,
            r#"
            [upstream]
            timeout_secs = 0
            "#,
        )
        .unwrap();

        let err = Config::load_validated(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
        assert!(err.to_string().contains("upstream.timeout_secs"));
    }

    #[test]
    fn test_validation_result_error_summary() {
        let mut result = ValidationResult::default();
        result.add_error("field1", "error1");
        result.add_error("field2", "error2");
        let summary = result.error_summary();
        assert!(summary.contains("field1"));
        assert!(summary.contains("field2"));
    }
}
