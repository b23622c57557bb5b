//! Centralized error types for the Vaarey application.
//!
//! This module provides a typed error hierarchy that:
//! - Enables precise error handling throughout the codebase
//! - Provides user-friendly messages suitable for UI display
//! - Preserves full error context for debugging/logging

use thiserror::Error;

use vaarey_weather::RainfallError;

/// Top-level application error type.
///
/// All errors in the Vaarey application should be convertible to this type.
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rainfall service error: {0}")]
    Rainfall(#[from] RainfallError),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    ///
    /// These messages are designed to be actionable and non-technical; the
    /// dashboard shows them next to its retry affordance.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Rainfall(e) => rainfall_user_message(e),
        }
    }
}

/// UI message for rainfall service failures.
fn rainfall_user_message(error: &RainfallError) -> &'static str {
    match error {
        RainfallError::Network(_) => "Unable to reach the weather service. Check your connection.",
        RainfallError::UpstreamStatus(status) if *status >= 500 => {
            "The weather service is experiencing issues. Please try again later."
        }
        RainfallError::UpstreamStatus(_) => "The weather request failed. Please try again.",
        RainfallError::MalformedPayload(_)
        | RainfallError::LengthMismatch { .. }
        | RainfallError::NegativeAmount { .. } => {
            "Received unexpected weather data. Please try again."
        }
        RainfallError::EmptySeries => "No rainfall data is available for this location.",
        RainfallError::OffsetOutOfRange(_) => "Received an invalid time zone for this location.",
        RainfallError::UnknownCity(_) => "That city is not in the catalog.",
    }
}

/// Network-related errors (HTTP, connectivity), classified from transport
/// failures by [`ReqwestErrorExt`].
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
        }
    }
}

/// Configuration errors, raised by `Config::load` and `load_validated`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_connect() {
            NetworkError::ConnectionFailed(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
