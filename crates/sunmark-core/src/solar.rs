//! Sunrise/sunset computation on top of the NREL SPA implementation.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use solar_positioning::{spa, Horizon, SunriseResult};

use crate::error::CoreError;
use crate::types::{Coordinate, SunTimes};

/// Computes sunrise and sunset for `coord` on the UTC calendar `date`.
///
/// Times are absolute instants. For far western longitudes the sunset can
/// fall on the following UTC day; it is still after the sunrise.
///
/// # Errors
///
/// - [`CoreError::PolarDay`] / [`CoreError::PolarNight`] when the sun does not
///   cross the horizon on that date.
/// - [`CoreError::SunCalculation`] when the algorithm rejects the inputs.
pub fn sun_times(coord: Coordinate, date: NaiveDate) -> Result<SunTimes, CoreError> {
    let delta_t = solar_positioning::time::DeltaT::estimate_from_date(date.year(), date.month())
        .map_err(|e| CoreError::SunCalculation(format!("delta T estimate: {e}")))?;

    let result = spa::sunrise_sunset_utc_for_horizon(
        date.year(),
        date.month(),
        date.day(),
        coord.latitude,
        coord.longitude,
        delta_t,
        Horizon::SunriseSunset,
    )
    .map_err(|e| CoreError::SunCalculation(e.to_string()))?;

    match result {
        SunriseResult::RegularDay {
            sunrise, sunset, ..
        } => Ok(SunTimes {
            sunrise: at_hours(date, sunrise.hours()),
            sunset: at_hours(date, sunset.hours()),
        }),
        SunriseResult::AllDay { .. } => Err(CoreError::PolarDay { date }),
        SunriseResult::AllNight { .. } => Err(CoreError::PolarNight { date }),
    }
}

/// Convenience wrapper for [`sun_times`] on the UTC date of `now`.
///
/// # Errors
///
/// Same as [`sun_times`].
pub fn sun_times_now(coord: Coordinate, now: DateTime<Utc>) -> Result<SunTimes, CoreError> {
    sun_times(coord, now.date_naive())
}

/// Midnight UTC of `date` plus a fractional hour offset (which may be negative or past 24).
#[allow(clippy::cast_possible_truncation)]
fn at_hours(date: NaiveDate, hours: f64) -> DateTime<Utc> {
    let midnight = date.and_time(NaiveTime::default()).and_utc();
    let millis = (hours * 3_600_000.0).round() as i64;
    midnight + Duration::milliseconds(millis)
}

/// `2024-06-21 09:12:03 UTC`, the form used in request payloads.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// `9:12:03 AM`, the form shown in the popup and stored in records.
#[must_use]
pub fn format_time_of_day(instant: DateTime<Utc>) -> String {
    instant.format("%-I:%M:%S %p").to_string()
}
