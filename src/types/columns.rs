//! Canonical column names of a cleaned weather table.
//!
//! These are the names that come out of the schema normalizer for the
//! usual daily-observation export, and the names [`crate::WeatherRecord`]
//! writes its typed fields to.

pub const DATE: &str = "date";
pub const MONTH: &str = "month";
pub const YEAR: &str = "year";
pub const LOCATION_NAME: &str = "location_name";
pub const LOCATION_REGION: &str = "location_region";

pub const AVG_TEMP_C: &str = "day_avgtemp_c";
pub const AVG_HUMIDITY: &str = "day_avghumidity";
pub const TOTAL_PRECIP_MM: &str = "day_totalprecip_mm";
pub const MAX_WIND_KPH: &str = "day_maxwind_kph";
pub const UV_INDEX: &str = "day_uv";
pub const AVG_VISIBILITY_KM: &str = "day_avgvis_km";
pub const CHANCE_OF_RAIN: &str = "day_daily_chance_of_rain";

/// Alternate spelling of the date key accepted in raw records and identifiers.
pub(crate) const DATE_KEY_ALT: &str = "Date";
/// Key that selects a row by its current position.
pub(crate) const POSITION_KEY: &str = "index";

/// The measurement columns that must hold numbers.
pub const MEASUREMENT_COLUMNS: [&str; 7] = [
    AVG_TEMP_C,
    AVG_HUMIDITY,
    TOTAL_PRECIP_MM,
    MAX_WIND_KPH,
    UV_INDEX,
    AVG_VISIBILITY_KM,
    CHANCE_OF_RAIN,
];

pub(crate) fn is_measurement(name: &str) -> bool {
    MEASUREMENT_COLUMNS.contains(&name)
}
