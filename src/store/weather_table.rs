//! The `WeatherTable` record store.

use crate::cleaning;
use crate::cleaning::dates::{derive_month_year, parse_dates};
use crate::config::WeatherConfig;
use crate::store::error::StoreError;
use crate::types::columns::{DATE, MONTH, YEAR};
use crate::types::field_value::FieldValue;
use crate::types::period::{Month, Period, Year};
use crate::utils::date_values;
use chrono::{Datelike, NaiveDate};
use log::debug;
use polars::prelude::*;
use std::collections::BTreeMap;

/// An in-memory table of daily weather observations.
///
/// The table is always sorted ascending by `date` (rows without a date
/// last, ties in insertion order), rows are addressed by their dense
/// position `0..len()`, and `month` / `year` always agree with `date`.
/// Every mutating method re-establishes these properties before it
/// returns, so positions are only meaningful until the next mutation.
///
/// The table is a single-owner value: mutations take `&mut self`, analytics
/// take `&self`, and nothing is shared behind the caller's back.
///
/// # Examples
///
/// ```
/// use weather_store::{RecordIdentifier, WeatherConfig, WeatherRecord, WeatherTable};
/// use chrono::NaiveDate;
///
/// # fn main() -> Result<(), weather_store::WeatherStoreError> {
/// let mut table = WeatherTable::empty(WeatherConfig::default());
/// let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
///
/// table.add(&WeatherRecord::builder().date(day).avg_temp_c(31.0).build())?;
/// let updated = table.update(
///     &RecordIdentifier::ByDate(day),
///     &WeatherRecord::builder().total_precip_mm(12.5).build(),
/// )?;
/// assert_eq!(updated, 1);
/// assert_eq!(table.len(), 1);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WeatherTable {
    pub(crate) frame: DataFrame,
    pub(crate) config: WeatherConfig,
}

impl WeatherTable {
    /// A table with no rows and only the `date`, `month` and `year` columns.
    pub fn empty(config: WeatherConfig) -> Self {
        let schema = Schema::from_iter([
            (PlSmallStr::from_static(DATE), DataType::Date),
            (PlSmallStr::from_static(MONTH), DataType::Int64),
            (PlSmallStr::from_static(YEAR), DataType::Int64),
        ]);
        Self {
            frame: DataFrame::empty_with_schema(&schema),
            config,
        }
    }

    /// Runs the cleaning pipeline over a raw frame (using the configured fill
    /// strategy) and wraps the result.
    pub fn from_raw(raw: DataFrame, config: WeatherConfig) -> Result<Self, StoreError> {
        let cleaned = cleaning::prepare(raw, config.fill_strategy)?;
        Self::from_frame(cleaned, config)
    }

    /// Wraps an already cleaned frame. A `date` column that is not yet a
    /// real date column is parsed first.
    pub fn from_frame(frame: DataFrame, config: WeatherConfig) -> Result<Self, StoreError> {
        let date_dtype = frame.column(DATE).ok().map(|c| c.dtype().clone());
        let frame = match date_dtype {
            Some(DataType::Date) => frame,
            _ => parse_dates(frame)?,
        };
        Ok(Self {
            frame: restore_invariants(frame)?,
            config,
        })
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn into_frame(self) -> DataFrame {
        self.frame
    }

    pub fn config(&self) -> &WeatherConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.frame.height()
    }

    pub fn is_empty(&self) -> bool {
        self.frame.height() == 0
    }

    pub fn column_names(&self) -> Vec<String> {
        self.frame
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.frame.column(name).is_ok()
    }

    /// The date of every row, in row order.
    pub fn dates(&self) -> Result<Vec<Option<NaiveDate>>, StoreError> {
        Ok(date_values(self.frame.column(DATE)?.date()?).collect())
    }

    /// Each calendar day present in the table once, ascending.
    pub fn distinct_dates(&self) -> Result<Vec<NaiveDate>, StoreError> {
        let mut dates: Vec<NaiveDate> = self.dates()?.into_iter().flatten().collect();
        dates.dedup();
        Ok(dates)
    }

    /// Each year present in the table once, ascending.
    pub fn years(&self) -> Result<Vec<i32>, StoreError> {
        let mut years: Vec<i32> = self
            .distinct_dates()?
            .into_iter()
            .map(|d| d.year())
            .collect();
        years.dedup();
        Ok(years)
    }

    /// The row at `position` as column/value pairs, or `None` when out of range.
    pub fn row(&self, position: usize) -> Result<Option<BTreeMap<String, FieldValue>>, StoreError> {
        if position >= self.len() {
            return Ok(None);
        }
        let mut row = BTreeMap::new();
        for column in self.frame.get_columns() {
            row.insert(
                column.name().to_string(),
                FieldValue::from_cell(&column.get(position)?),
            );
        }
        Ok(Some(row))
    }

    /// A new table holding only the rows dated within `period`, in order.
    /// Rows without a date are never included.
    pub fn for_period(&self, period: &impl Period) -> Result<WeatherTable, StoreError> {
        let Some(span) = period.date_span() else {
            debug!("Period does not resolve to a date range; selecting nothing");
            return Ok(Self {
                frame: self.frame.clear(),
                config: self.config.clone(),
            });
        };
        let frame = self
            .frame
            .clone()
            .lazy()
            .filter(
                col(DATE)
                    .gt_eq(lit(span.start))
                    .and(col(DATE).lt_eq(lit(span.end))),
            )
            .collect()?;
        Ok(Self {
            frame,
            config: self.config.clone(),
        })
    }

    pub fn for_year(&self, year: Year) -> Result<WeatherTable, StoreError> {
        self.for_period(&year)
    }

    pub fn for_month(&self, month: Month) -> Result<WeatherTable, StoreError> {
        self.for_period(&month)
    }
}

/// Re-derives `month` / `year` and sorts by date, stable, missing dates last.
pub(crate) fn restore_invariants(mut frame: DataFrame) -> PolarsResult<DataFrame> {
    derive_month_year(&mut frame)?;
    frame.sort(
        [DATE],
        SortMultipleOptions::default()
            .with_maintain_order(true)
            .with_nulls_last(true),
    )
}
