//! Heavy-rain detection: days whose total precipitation reaches a threshold.

use crate::analysis::best_effort;
use crate::analysis::daily_series::{daily_series, zero_calendar_gaps, DailyAggregate};
use crate::analysis::error::AnalysisError;
use crate::store::weather_table::WeatherTable;
use bon::bon;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeavyRainDay {
    pub date: NaiveDate,
    /// Sum over every row observed on `date`, in mm.
    pub total_precipitation_mm: f64,
}

#[bon]
impl WeatherTable {
    /// Lists the days, ascending, whose summed precipitation is at least
    /// `threshold_mm`. Calendar days between the first and last observation
    /// that have no rows count as 0 mm. A table without the precipitation column has no
    /// heavy-rain days; that is not an error.
    ///
    /// # Errors
    ///
    /// Fails when the column is not numeric or the threshold is negative or
    /// not a finite number.
    #[builder]
    pub fn try_heavy_rain(
        &self,
        #[builder(into)] column: Option<String>,
        threshold_mm: Option<f64>,
    ) -> Result<Vec<HeavyRainDay>, AnalysisError> {
        let column = column.unwrap_or_else(|| self.config.precipitation_column.clone());
        let threshold = threshold_mm.unwrap_or(self.config.heavy_rain_threshold_mm);
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AnalysisError::InvalidParameter {
                name: "threshold_mm",
                reason: format!("{threshold} is not a non-negative amount"),
            });
        }
        if !self.has_column(&column) {
            debug!("No '{}' column, no heavy rain to report", column);
            return Ok(Vec::new());
        }

        let totals = zero_calendar_gaps(daily_series(&self.frame, &column, DailyAggregate::Sum)?);
        let days: Vec<HeavyRainDay> = totals
            .into_iter()
            .filter_map(|(date, total)| {
                total
                    .filter(|total| *total >= threshold)
                    .map(|total_precipitation_mm| HeavyRainDay {
                        date,
                        total_precipitation_mm,
                    })
            })
            .collect();
        debug!("Found {} heavy-rain day(s) (>= {} mm)", days.len(), threshold);
        Ok(days)
    }

    /// Best-effort [`WeatherTable::try_heavy_rain`]: any failure is logged
    /// and yields no days.
    #[builder]
    pub fn heavy_rain(
        &self,
        #[builder(into)] column: Option<String>,
        threshold_mm: Option<f64>,
    ) -> Vec<HeavyRainDay> {
        best_effort(
            "Heavy-rain detection",
            self.try_heavy_rain()
                .maybe_column(column)
                .maybe_threshold_mm(threshold_mm)
                .call(),
        )
    }
}
