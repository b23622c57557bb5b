//! Rainfall statistics derivation.
//!
//! Pure, synchronous transformation of an already-fetched [`DailySeries`]
//! into display records and aggregate statistics. The reference "today" is
//! an explicit parameter so callers can evaluate against any instant without
//! a live clock.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{DailySeries, DayRecord, RainfallError, Statistics, Trend};

/// Length of the aggregate window ending at "today".
pub const WEEKLY_WINDOW_DAYS: usize = 7;

/// Policy for picking "today" when the reference date is absent from the
/// series, e.g. because the consumer's clock and the source zone disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum TodayFallback {
    /// Use the index right after the configured past days (position 7 for a
    /// 7 past + 7 forecast series); the upstream provider anchors the first
    /// forecast day at the current date.
    #[default]
    PastDaysIndex,
    /// Use the final entry of the series.
    LastEntry,
}

impl TodayFallback {
    /// Resolve the fallback to a concrete index into a series of `len` > 0.
    fn resolve(self, past_days: usize, len: usize) -> usize {
        match self {
            TodayFallback::PastDaysIndex => past_days.min(len - 1),
            TodayFallback::LastEntry => len - 1,
        }
    }
}

/// Everything the rendering layer needs for one location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Derived {
    pub days: Vec<DayRecord>,
    pub stats: Statistics,
    /// Index of the reference day within `days`.
    pub today_index: usize,
}

/// Derive display records and statistics from a daily series.
///
/// `today_key` identifies the reference day; when it is not present in the
/// series the explicit `fallback` policy picks the index instead.
/// `past_days` is the number of past days the series was requested with and
/// only feeds [`TodayFallback::PastDaysIndex`].
///
/// # Errors
/// Returns [`RainfallError::EmptySeries`] for an empty series; statistics
/// over no data are a refusal, not a zero.
pub fn derive(
    series: &DailySeries,
    today_key: NaiveDate,
    fallback: TodayFallback,
    past_days: usize,
) -> Result<Derived, RainfallError> {
    if series.is_empty() {
        return Err(RainfallError::EmptySeries);
    }

    let dates = series.dates();
    let amounts = series.amounts();

    let days: Vec<DayRecord> = dates
        .iter()
        .zip(amounts)
        .map(|(date, amount)| DayRecord {
            date: *date,
            amount: *amount,
            display_date: date.format("%-d %b").to_string(),
            weekday: date.format("%A").to_string(),
        })
        .collect();

    let today_index = dates
        .iter()
        .position(|d| *d == today_key)
        .unwrap_or_else(|| fallback.resolve(past_days, series.len()));

    // Window of up to 7 records ending at and including today, clamped at
    // the series start.
    let window_start = (today_index + 1).saturating_sub(WEEKLY_WINDOW_DAYS);
    let window = &amounts[window_start..=today_index];

    let weekly_total: f64 = window.iter().sum();
    let daily_average = weekly_total / window.len() as f64;
    let peak = amounts.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let today = amounts[today_index];
    let yesterday = if today_index == 0 {
        0.0
    } else {
        amounts[today_index - 1]
    };
    let trend = if today >= yesterday {
        Trend::Up
    } else {
        Trend::Down
    };

    Ok(Derived {
        days,
        stats: Statistics {
            today,
            weekly_total,
            daily_average,
            peak,
            trend,
        },
        today_index,
    })
}

/// Compute a location's wall-clock time from a reference instant and its
/// UTC offset in seconds.
///
/// Each call converts the supplied instant independently; callers that tick
/// every second pass a fresh `now` each time and cannot accumulate drift.
///
/// # Errors
/// Returns [`RainfallError::OffsetOutOfRange`] when `|offset| >= 86_400`.
pub fn local_time(
    now: DateTime<Utc>,
    utc_offset_seconds: i32,
) -> Result<DateTime<FixedOffset>, RainfallError> {
    let offset = FixedOffset::east_opt(utc_offset_seconds)
        .ok_or(RainfallError::OffsetOutOfRange(utc_offset_seconds))?;
    Ok(now.with_timezone(&offset))
}

/// The calendar date at a location for a given reference instant.
///
/// This is what the dashboard uses as `today_key` when deriving statistics,
/// so "today" is today in the target city rather than at the consumer.
///
/// # Errors
/// Same range check as [`local_time`].
pub fn local_date(now: DateTime<Utc>, utc_offset_seconds: i32) -> Result<NaiveDate, RainfallError> {
    local_time(now, utc_offset_seconds).map(|t| t.date_naive())
}
