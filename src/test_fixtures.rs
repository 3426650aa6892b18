//! Shared tables for unit tests.

use crate::config::WeatherConfig;
use crate::store::weather_table::WeatherTable;
use chrono::{Duration, NaiveDate};
use polars::prelude::*;

pub(crate) type TestResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

pub(crate) fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Four rows across two locations, deliberately out of date order.
pub(crate) fn sample_table() -> TestResult<WeatherTable> {
    let raw = df!(
        "Date" => ["2024-06-03", "2024-06-01", "2024-05-31", "2024-06-02"],
        "Location Name" => ["Hue", "Hanoi", "Hue", "Hanoi"],
        "Location Region" => ["Central", "North", "Central", "North"],
        "Day AvgTemp C" => [31.0, 29.0, 27.5, 30.5],
        "Day TotalPrecip MM" => [0.0, 120.0, 4.0, 0.5],
    )?;
    Ok(WeatherTable::from_raw(raw, WeatherConfig::default())?)
}

/// One row per consecutive day starting at `start`, with the given values
/// in the temperature and precipitation columns.
pub(crate) fn daily_table(
    start: NaiveDate,
    temperatures: &[f64],
    precipitation: &[f64],
) -> TestResult<WeatherTable> {
    let dates: Vec<String> = (0..temperatures.len())
        .map(|offset| (start + Duration::days(offset as i64)).to_string())
        .collect();
    let raw = df!(
        "date" => dates,
        "day_avgtemp_c" => temperatures,
        "day_totalprecip_mm" => precipitation,
    )?;
    Ok(WeatherTable::from_raw(raw, WeatherConfig::default())?)
}
