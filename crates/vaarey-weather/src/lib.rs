//! Rainfall service for Vaarey
//!
//! Fetches daily precipitation series for Maldivian cities from the
//! Open-Meteo API and derives the dashboard's display statistics.

pub mod cities;
pub mod provider;
pub mod stats;
pub mod types;

pub use provider::RainfallProvider;
pub use stats::{derive, local_date, local_time, Derived, TodayFallback, WEEKLY_WINDOW_DAYS};
pub use types::*;
