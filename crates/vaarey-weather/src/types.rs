use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A Maldivian city the dashboard can show rainfall for.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct City {
    pub name: &'static str,
    pub atoll: &'static str,
    pub latitude: f64,
    pub longitude: f64,
}

/// Raw daily precipitation series: parallel, index-aligned, ascending.
///
/// Construct through [`DailySeries::new`], which rejects length mismatches
/// and negative amounts so every downstream consumer can rely on the
/// invariants instead of re-checking them.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    dates: Vec<NaiveDate>,
    amounts: Vec<f64>,
}

impl DailySeries {
    /// Build a validated series from parallel date/amount vectors.
    ///
    /// # Errors
    /// Returns [`RainfallError::LengthMismatch`] when the vectors differ in
    /// length and [`RainfallError::NegativeAmount`] when any precipitation
    /// amount is below zero.
    pub fn new(dates: Vec<NaiveDate>, amounts: Vec<f64>) -> Result<Self, RainfallError> {
        if dates.len() != amounts.len() {
            return Err(RainfallError::LengthMismatch {
                dates: dates.len(),
                amounts: amounts.len(),
            });
        }
        if let Some(index) = amounts.iter().position(|a| *a < 0.0) {
            return Err(RainfallError::NegativeAmount {
                index,
                amount: amounts[index],
            });
        }
        Ok(Self { dates, amounts })
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }
}

/// One displayable day derived from the series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayRecord {
    pub date: NaiveDate,
    /// Precipitation in millimetres, always >= 0.
    pub amount: f64,
    /// Short display form, e.g. "30 Aug".
    pub display_date: String,
    /// Full weekday name, e.g. "Saturday".
    pub weekday: String,
}

/// Rainfall trend relative to yesterday. A tie counts as `Up`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

/// Aggregate statistics for the dashboard header cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    /// Rainfall on the reference day, in millimetres.
    pub today: f64,
    /// Exact sum over the weekly window ending at the reference day.
    pub weekly_total: f64,
    /// `weekly_total` divided by the window length.
    pub daily_average: f64,
    /// Maximum amount across the entire series, past and forecast.
    pub peak: f64,
    pub trend: Trend,
}

/// A fetched rainfall report for one location.
#[derive(Debug, Clone)]
pub struct RainfallReport {
    pub latitude: f64,
    pub longitude: f64,
    /// Signed seconds offset of the location's zone, from the data source.
    pub utc_offset_seconds: i32,
    pub series: DailySeries,
    pub fetched_at: DateTime<Utc>,
}

/// Rainfall service errors.
#[derive(Debug, thiserror::Error)]
pub enum RainfallError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
    #[error("Series length mismatch: {dates} dates vs {amounts} amounts")]
    LengthMismatch { dates: usize, amounts: usize },
    #[error("Negative precipitation amount {amount} at index {index}")]
    NegativeAmount { index: usize, amount: f64 },
    #[error("Empty series: no rainfall data to derive statistics from")]
    EmptySeries,
    #[error("UTC offset {0} seconds is out of range")]
    OffsetOutOfRange(i32),
    #[error("Unknown city: {0}")]
    UnknownCity(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_series_accepts_aligned_vectors() {
        let series =
            DailySeries::new(vec![date("2026-08-29"), date("2026-08-30")], vec![0.0, 2.5]).unwrap();
        assert_eq!(series.len(), 2);
        assert!(!series.is_empty());
        assert_eq!(series.amounts(), &[0.0, 2.5]);
    }

    #[test]
    fn test_series_rejects_length_mismatch() {
        let err = DailySeries::new(vec![date("2026-08-30")], vec![1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            RainfallError::LengthMismatch {
                dates: 1,
                amounts: 2
            }
        ));
    }

    #[test]
    fn test_series_rejects_negative_amount() {
        let err = DailySeries::new(
            vec![date("2026-08-29"), date("2026-08-30")],
            vec![1.0, -0.1],
        )
        .unwrap_err();
        assert!(matches!(err, RainfallError::NegativeAmount { index: 1, .. }));
    }

    #[test]
    fn test_empty_series_is_valid_but_empty() {
        let series = DailySeries::new(vec![], vec![]).unwrap();
        assert!(series.is_empty());
    }

    #[test]
    fn test_trend_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Trend::Down).unwrap(), "\"down\"");
    }

    #[test]
    fn test_statistics_serialization_shape() {
        let stats = Statistics {
            today: 4.0,
            weekly_total: 10.5,
            daily_average: 1.5,
            peak: 4.0,
            trend: Trend::Up,
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["weekly_total"], 10.5);
        assert_eq!(json["trend"], "up");
    }
}
