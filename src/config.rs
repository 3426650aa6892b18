//! Runtime configuration: which columns the analytics read and the default
//! detection thresholds.

use crate::error::ConfigError;
use crate::types::columns;
use crate::types::fill_strategy::FillStrategy;
use bon::Builder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by a [`crate::WeatherTable`] and its analytics.
///
/// Any key missing from a JSON configuration falls back to its default.
///
/// # Examples
///
/// ```
/// use weather_store::{FillStrategy, WeatherConfig};
///
/// let config = WeatherConfig::builder()
///     .heatwave_threshold_c(35.0)
///     .fill_strategy(FillStrategy::Median)
///     .build();
/// assert_eq!(config.heatwave_min_days, 3);
///
/// let from_json = WeatherConfig::from_json_str(r#"{ "heavy_rain_threshold_mm": 50.0 }"#).unwrap();
/// assert_eq!(from_json.heavy_rain_threshold_mm, 50.0);
/// assert_eq!(from_json.temperature_column, "day_avgtemp_c");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct WeatherConfig {
    /// Column holding the daily mean temperature in °C.
    #[builder(into, default = columns::AVG_TEMP_C.to_string())]
    pub temperature_column: String,
    /// Column holding the daily precipitation total in mm.
    #[builder(into, default = columns::TOTAL_PRECIP_MM.to_string())]
    pub precipitation_column: String,
    /// Column used to group rows by region.
    #[builder(into, default = columns::LOCATION_REGION.to_string())]
    pub region_column: String,
    /// A day at or above this temperature counts as hot.
    #[builder(default = 30.0)]
    pub heatwave_threshold_c: f64,
    /// Shortest run of hot days reported as a heatwave.
    #[builder(default = 3)]
    pub heatwave_min_days: usize,
    /// A day whose total precipitation reaches this counts as heavy rain.
    #[builder(default = 100.0)]
    pub heavy_rain_threshold_mm: f64,
    /// Strategy used when a raw table is prepared.
    #[builder(default = FillStrategy::Mean)]
    pub fill_strategy: FillStrategy,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        WeatherConfig::builder().build()
    }
}

impl WeatherConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: WeatherConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.to_path_buf(), e))?;
        Self::from_json_str(&json)
    }

    /// Rejects values no detection could use.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.heatwave_min_days == 0 {
            return Err(ConfigError::Invalid {
                field: "heatwave_min_days",
                reason: "must be at least 1".to_string(),
            });
        }
        if !self.heatwave_threshold_c.is_finite() {
            return Err(ConfigError::Invalid {
                field: "heatwave_threshold_c",
                reason: "must be a finite number".to_string(),
            });
        }
        if !self.heavy_rain_threshold_mm.is_finite() || self.heavy_rain_threshold_mm < 0.0 {
            return Err(ConfigError::Invalid {
                field: "heavy_rain_threshold_mm",
                reason: "must be a finite, non-negative number".to_string(),
            });
        }
        for (field, value) in [
            ("temperature_column", &self.temperature_column),
            ("precipitation_column", &self.precipitation_column),
            ("region_column", &self.region_column),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must name a column".to_string(),
                });
            }
        }
        Ok(())
    }
}
