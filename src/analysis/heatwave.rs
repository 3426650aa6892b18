//! Heatwave detection: runs of consecutive days at or above a temperature.

use crate::analysis::daily_series::{daily_series, fill_calendar_gaps, DailyAggregate};
use crate::analysis::error::AnalysisError;
use crate::analysis::best_effort;
use crate::store::weather_table::WeatherTable;
use bon::bon;
use chrono::NaiveDate;
use log::debug;
use serde::Serialize;

/// A run of consecutive hot days. `start` and `end` are both hot days, so
/// `length_days` is `end - start + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Heatwave {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub length_days: usize,
}

impl Heatwave {
    fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            start,
            end,
            length_days: ((end - start).num_days() + 1) as usize,
        }
    }
}

/// Scans a gap-free daily series in date order. A day is hot when its value
/// is at least `threshold`; a run is reported once it ends (or the series
/// ends) if it lasted at least `min_days`. Days without a value are not hot.
pub fn find_heatwaves(
    days: &[(NaiveDate, Option<f64>)],
    threshold: f64,
    min_days: usize,
) -> Vec<Heatwave> {
    let mut heatwaves = Vec::new();
    let mut run: Option<Heatwave> = None;

    for &(date, value) in days {
        let hot = value.is_some_and(|value| value >= threshold);
        run = match (run, hot) {
            (Some(current), true) => Some(Heatwave::new(current.start, date)),
            (None, true) => Some(Heatwave::new(date, date)),
            (Some(finished), false) => {
                if finished.length_days >= min_days {
                    heatwaves.push(finished);
                }
                None
            }
            (None, false) => None,
        };
    }
    if let Some(finished) = run.filter(|run| run.length_days >= min_days) {
        heatwaves.push(finished);
    }
    heatwaves
}

#[bon]
impl WeatherTable {
    /// Detects heatwaves in the daily mean of a temperature column.
    ///
    /// Rows sharing a day are averaged, and calendar days without data take
    /// the previous day's value. Unset parameters come from the table's
    /// [`crate::WeatherConfig`].
    ///
    /// # Errors
    ///
    /// Fails when the column is missing or not numeric, or when `min_days`
    /// is zero or the threshold is not a finite number.
    #[builder]
    pub fn try_heatwaves(
        &self,
        #[builder(into)] column: Option<String>,
        threshold_c: Option<f64>,
        min_days: Option<usize>,
    ) -> Result<Vec<Heatwave>, AnalysisError> {
        let column = column.unwrap_or_else(|| self.config.temperature_column.clone());
        let threshold = threshold_c.unwrap_or(self.config.heatwave_threshold_c);
        let min_days = min_days.unwrap_or(self.config.heatwave_min_days);
        if min_days == 0 {
            return Err(AnalysisError::InvalidParameter {
                name: "min_days",
                reason: "must be at least 1".to_string(),
            });
        }
        if !threshold.is_finite() {
            return Err(AnalysisError::InvalidParameter {
                name: "threshold_c",
                reason: format!("{threshold} is not a finite temperature"),
            });
        }

        let days = fill_calendar_gaps(daily_series(&self.frame, &column, DailyAggregate::Mean)?);
        let heatwaves = find_heatwaves(&days, threshold, min_days);
        debug!(
            "Found {} heatwave(s) in {} days of '{}' (>= {} for {}+ days)",
            heatwaves.len(),
            days.len(),
            column,
            threshold,
            min_days
        );
        Ok(heatwaves)
    }

    /// Best-effort [`WeatherTable::try_heatwaves`]: any failure is logged
    /// and yields no heatwaves.
    ///
    /// ```
    /// # use weather_store::{WeatherConfig, WeatherRecord, WeatherTable};
    /// # use chrono::{Days, NaiveDate};
    /// let mut table = WeatherTable::empty(WeatherConfig::default());
    /// let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    /// for (offset, temperature) in [29.0, 30.0, 31.0, 30.0, 28.0].into_iter().enumerate() {
    ///     let date = start.checked_add_days(Days::new(offset as u64)).unwrap();
    ///     table.add(&WeatherRecord::builder().date(date).avg_temp_c(temperature).build()).unwrap();
    /// }
    ///
    /// let heatwaves = table.heatwaves().call();
    /// assert_eq!(heatwaves.len(), 1);
    /// assert_eq!(heatwaves[0].length_days, 3);
    /// assert!(table.heatwaves().min_days(4).call().is_empty());
    /// ```
    #[builder]
    pub fn heatwaves(
        &self,
        #[builder(into)] column: Option<String>,
        threshold_c: Option<f64>,
        min_days: Option<usize>,
    ) -> Vec<Heatwave> {
        best_effort(
            "Heatwave detection",
            self.try_heatwaves()
                .maybe_column(column)
                .maybe_threshold_c(threshold_c)
                .maybe_min_days(min_days)
                .call(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{daily_table, day, TestResult};
    use crate::WeatherRecord;

    fn series(start: NaiveDate, values: &[f64]) -> Vec<(NaiveDate, Option<f64>)> {
        start
            .iter_days()
            .zip(values.iter().map(|value| Some(*value)))
            .collect()
    }

    #[test]
    fn run_in_the_middle() {
        let days = series(day(2024, 6, 1), &[29.0, 30.0, 31.0, 30.0, 28.0]);
        assert_eq!(
            find_heatwaves(&days, 30.0, 3),
            vec![Heatwave {
                start: day(2024, 6, 2),
                end: day(2024, 6, 4),
                length_days: 3,
            }]
        );
    }

    #[test]
    fn short_run_is_dropped() {
        let days = series(day(2024, 6, 1), &[30.0, 30.0]);
        assert!(find_heatwaves(&days, 30.0, 3).is_empty());
    }

    #[test]
    fn run_reaching_the_last_day_is_kept() {
        let days = series(day(2024, 6, 1), &[28.0, 31.0, 31.0, 31.0]);
        assert_eq!(
            find_heatwaves(&days, 30.0, 3),
            vec![Heatwave::new(day(2024, 6, 2), day(2024, 6, 4))]
        );
    }

    #[test]
    fn missing_values_break_a_run() {
        let mut days = series(day(2024, 6, 1), &[31.0, 31.0, 31.0, 31.0]);
        days[2].1 = None;
        assert!(find_heatwaves(&days, 30.0, 3).is_empty());
        assert_eq!(find_heatwaves(&days, 30.0, 2).len(), 1);
    }

    #[test]
    fn table_detection_uses_config_defaults() -> TestResult {
        let table = daily_table(
            day(2024, 6, 1),
            &[29.0, 30.0, 31.0, 30.0, 28.0],
            &[0.0; 5],
        )?;
        let heatwaves = table.try_heatwaves().call()?;
        assert_eq!(heatwaves, vec![Heatwave::new(day(2024, 6, 2), day(2024, 6, 4))]);

        let hotter = table.try_heatwaves().threshold_c(31.0).min_days(1).call()?;
        assert_eq!(hotter, vec![Heatwave::new(day(2024, 6, 3), day(2024, 6, 3))]);
        Ok(())
    }

    #[test]
    fn calendar_gaps_carry_the_previous_day() -> TestResult {
        let mut table = daily_table(day(2024, 6, 1), &[31.0, 32.0], &[0.0, 0.0])?;
        table.add(&WeatherRecord::builder().date(day(2024, 6, 4)).avg_temp_c(30.5).build())?;

        assert_eq!(
            table.try_heatwaves().call()?,
            vec![Heatwave::new(day(2024, 6, 1), day(2024, 6, 4))]
        );
        Ok(())
    }

    #[test]
    fn same_day_rows_are_averaged() -> TestResult {
        let mut table = daily_table(day(2024, 6, 1), &[31.0, 31.0, 31.0], &[0.0; 3])?;
        table.add(&WeatherRecord::builder().date(day(2024, 6, 2)).avg_temp_c(20.0).build())?;

        // 2024-06-02 now averages 25.5, splitting the run.
        assert!(table.try_heatwaves().call()?.is_empty());
        Ok(())
    }

    #[test]
    fn failures_become_empty_results() -> TestResult {
        let table = daily_table(day(2024, 6, 1), &[35.0; 4], &[0.0; 4])?;

        assert!(matches!(
            table.try_heatwaves().column("day_maxtemp_c").call(),
            Err(AnalysisError::MissingColumn { .. })
        ));
        assert!(table.heatwaves().column("day_maxtemp_c").call().is_empty());

        assert!(matches!(
            table.try_heatwaves().min_days(0).call(),
            Err(AnalysisError::InvalidParameter { name: "min_days", .. })
        ));
        assert_eq!(table.heatwaves().call().len(), 1);
        Ok(())
    }
}
