//! Grouped means and medians of a measurement column.

use crate::analysis::daily_series::{daily_series, DailyAggregate};
use crate::analysis::error::AnalysisError;
use crate::analysis::{best_effort, numeric_values, require_numeric};
use crate::store::weather_table::WeatherTable;
use crate::types::columns::MONTH;
use bon::bon;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use polars::prelude::*;
use serde::Serialize;
use std::cmp::Reverse;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DailyValue {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MonthlyValue {
    /// Month number, 1 to 12, pooled across years.
    pub month: u32,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionValue {
    pub region: String,
    pub median: f64,
}

/// Size of a table (or a period of it) and the mean of one column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodSummary {
    pub rows: usize,
    /// Rows where the column has a value.
    pub observed: usize,
    pub mean: Option<f64>,
}

#[bon]
impl WeatherTable {
    /// Mean of `column` per calendar day, ascending. Defaults to the
    /// configured temperature column.
    #[builder]
    pub fn try_daily_mean(
        &self,
        #[builder(into)] column: Option<String>,
    ) -> Result<Vec<DailyValue>, AnalysisError> {
        let column = column.unwrap_or_else(|| self.config.temperature_column.clone());
        Ok(daily_series(&self.frame, &column, DailyAggregate::Mean)?
            .into_iter()
            .map(|(date, value)| DailyValue { date, value })
            .collect())
    }

    #[builder]
    pub fn daily_mean(&self, #[builder(into)] column: Option<String>) -> Vec<DailyValue> {
        best_effort(
            "Daily mean",
            self.try_daily_mean().maybe_column(column).call(),
        )
    }

    /// Mean of `column` per month number across all years, ascending by
    /// month.
    #[builder]
    pub fn try_monthly_mean(
        &self,
        #[builder(into)] column: Option<String>,
    ) -> Result<Vec<MonthlyValue>, AnalysisError> {
        let column = column.unwrap_or_else(|| self.config.temperature_column.clone());
        require_numeric(&self.frame, &column)?;

        let monthly = self
            .frame
            .clone()
            .lazy()
            .filter(col(MONTH).is_not_null())
            .group_by([col(MONTH)])
            .agg([col(column.as_str()).cast(DataType::Float64).mean()])
            .sort([MONTH], SortMultipleOptions::default())
            .collect()?;

        let months = monthly.column(MONTH)?.cast(&DataType::Int64)?;
        let values = monthly.column(&column)?.f64()?.clone();
        Ok(months
            .i64()?
            .into_iter()
            .zip(values.into_iter())
            .filter_map(|(month, value)| {
                month.map(|month| MonthlyValue {
                    month: month as u32,
                    value,
                })
            })
            .collect())
    }

    #[builder]
    pub fn monthly_mean(&self, #[builder(into)] column: Option<String>) -> Vec<MonthlyValue> {
        best_effort(
            "Monthly mean",
            self.try_monthly_mean().maybe_column(column).call(),
        )
    }

    /// Median of `column` per region, highest median first. Rows without a
    /// region, and regions without any value, are left out.
    #[builder]
    pub fn try_region_median(
        &self,
        #[builder(into)] column: Option<String>,
        #[builder(into)] region_column: Option<String>,
    ) -> Result<Vec<RegionValue>, AnalysisError> {
        let column = column.unwrap_or_else(|| self.config.temperature_column.clone());
        let region_column = region_column.unwrap_or_else(|| self.config.region_column.clone());
        require_numeric(&self.frame, &column)?;
        if !self.has_column(&region_column) {
            return Err(AnalysisError::MissingColumn {
                column: region_column,
            });
        }

        let grouped = self
            .frame
            .clone()
            .lazy()
            .select([
                col(region_column.as_str()).cast(DataType::String),
                col(column.as_str()).cast(DataType::Float64),
            ])
            .filter(col(region_column.as_str()).is_not_null())
            .group_by([col(region_column.as_str())])
            .agg([col(column.as_str()).median()])
            .collect()?;

        let regions = grouped.column(&region_column)?.str()?.clone();
        let medians = grouped.column(&column)?.f64()?.clone();
        let mut result: Vec<RegionValue> = regions
            .into_iter()
            .zip(medians.into_iter())
            .filter_map(|(region, median)| {
                Some(RegionValue {
                    region: region?.to_string(),
                    median: median?,
                })
            })
            .collect();
        result.sort_by(|a, b| {
            Reverse(OrderedFloat(a.median))
                .cmp(&Reverse(OrderedFloat(b.median)))
                .then_with(|| a.region.cmp(&b.region))
        });
        Ok(result)
    }

    #[builder]
    pub fn region_median(
        &self,
        #[builder(into)] column: Option<String>,
        #[builder(into)] region_column: Option<String>,
    ) -> Vec<RegionValue> {
        best_effort(
            "Region median",
            self.try_region_median()
                .maybe_column(column)
                .maybe_region_column(region_column)
                .call(),
        )
    }

    /// Row count and mean of `column`. Combine with
    /// [`WeatherTable::for_month`] or [`WeatherTable::for_year`] to
    /// summarise a single period.
    #[builder]
    pub fn try_period_summary(
        &self,
        #[builder(into)] column: Option<String>,
    ) -> Result<PeriodSummary, AnalysisError> {
        let column = column.unwrap_or_else(|| self.config.temperature_column.clone());
        let present: Vec<f64> = numeric_values(&self.frame, &column)?
            .into_iter()
            .flatten()
            .collect();
        let mean = (!present.is_empty()).then(|| present.iter().sum::<f64>() / present.len() as f64);
        Ok(PeriodSummary {
            rows: self.len(),
            observed: present.len(),
            mean,
        })
    }

    #[builder]
    pub fn period_summary(&self, #[builder(into)] column: Option<String>) -> PeriodSummary {
        best_effort(
            "Period summary",
            self.try_period_summary().maybe_column(column).call(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{day, sample_table, TestResult};
    use crate::types::period::Month;
    use crate::WeatherConfig;

    fn multi_year_table() -> TestResult<WeatherTable> {
        let raw = df!(
            "date" => ["2023-01-10", "2024-01-20", "2024-02-01", "2023-02-15", "2024-03-05"],
            "location_region" => ["North", "North", "Central", "North", "Central"],
            "day_avgtemp_c" => [10.0, 14.0, 20.0, 12.0, 26.0],
        )?;
        Ok(WeatherTable::from_raw(raw, WeatherConfig::default())?)
    }

    #[test]
    fn daily_mean_is_sorted_by_day() -> TestResult {
        let table = sample_table()?;
        let daily = table.daily_mean().call();
        assert_eq!(daily.len(), 4);
        assert_eq!(
            daily[0],
            DailyValue {
                date: day(2024, 5, 31),
                value: Some(27.5),
            }
        );
        assert!(daily.windows(2).all(|pair| pair[0].date < pair[1].date));
        Ok(())
    }

    #[test]
    fn monthly_mean_pools_years() -> TestResult {
        let table = multi_year_table()?;
        assert_eq!(
            table.try_monthly_mean().call()?,
            vec![
                MonthlyValue { month: 1, value: Some(12.0) },
                MonthlyValue { month: 2, value: Some(16.0) },
                MonthlyValue { month: 3, value: Some(26.0) },
            ]
        );
        Ok(())
    }

    #[test]
    fn region_median_is_ordered_highest_first() -> TestResult {
        let table = multi_year_table()?;
        assert_eq!(
            table.try_region_median().call()?,
            vec![
                RegionValue { region: "Central".into(), median: 23.0 },
                RegionValue { region: "North".into(), median: 12.0 },
            ]
        );
        assert!(matches!(
            table.try_region_median().region_column("province").call(),
            Err(AnalysisError::MissingColumn { .. })
        ));
        assert!(table.region_median().region_column("province").call().is_empty());
        Ok(())
    }

    #[test]
    fn period_summary_for_a_month() -> TestResult {
        let table = sample_table()?;
        let june = table.for_month(Month::new(6, 2024))?;
        let summary = june.try_period_summary().call()?;
        assert_eq!(summary.rows, 3);
        assert_eq!(summary.observed, 3);
        assert_eq!(summary.mean, Some((29.0 + 30.5 + 31.0) / 3.0));

        let rain = june.period_summary().column("day_totalprecip_mm").call();
        assert_eq!(rain.mean, Some((120.0 + 0.5 + 0.0) / 3.0));
        Ok(())
    }

    #[test]
    fn empty_and_invalid_inputs_are_neutral() -> TestResult {
        let empty = sample_table()?.for_month(Month::new(1, 1999))?;
        let summary = empty.try_period_summary().call()?;
        assert_eq!(summary, PeriodSummary::default());
        assert!(empty.try_daily_mean().call()?.is_empty());

        let table = sample_table()?;
        assert_eq!(
            table.period_summary().column("location_name").call(),
            PeriodSummary::default()
        );
        assert!(table.monthly_mean().column("missing").call().is_empty());
        Ok(())
    }
}
