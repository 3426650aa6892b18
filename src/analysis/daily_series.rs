//! Resampling a column to one value per calendar day.

use crate::analysis::error::AnalysisError;
use crate::analysis::require_numeric;
use crate::types::columns::DATE;
use crate::utils::date_values;
use chrono::NaiveDate;
use polars::prelude::*;

pub(crate) type DailySeries = Vec<(NaiveDate, Option<f64>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum DailyAggregate {
    Mean,
    Sum,
}

/// One entry per date present in `frame`, ascending, with the rows of each
/// day combined by `aggregate`. Rows without a date are skipped.
pub(crate) fn daily_series(
    frame: &DataFrame,
    column: &str,
    aggregate: DailyAggregate,
) -> Result<DailySeries, AnalysisError> {
    require_numeric(frame, column)?;

    let value = col(column).cast(DataType::Float64);
    let value = match aggregate {
        DailyAggregate::Mean => value.mean(),
        DailyAggregate::Sum => value.sum(),
    };
    let daily = frame
        .clone()
        .lazy()
        .filter(col(DATE).is_not_null())
        .group_by([col(DATE)])
        .agg([value])
        .sort([DATE], SortMultipleOptions::default())
        .collect()?;

    let dates = date_values(daily.column(DATE)?.date()?);
    let values = daily.column(column)?.f64()?.into_iter();
    Ok(dates
        .zip(values)
        .filter_map(|(date, value)| date.map(|date| (date, value)))
        .collect())
}

/// Inserts the calendar days missing between consecutive entries and
/// forward-fills missing values from the previous day.
pub(crate) fn fill_calendar_gaps(days: DailySeries) -> DailySeries {
    let mut filled: DailySeries = Vec::with_capacity(days.len());
    let mut carried = None;
    for (date, value) in days {
        if let Some(&(previous, _)) = filled.last() {
            filled.extend(days_between(previous, date).map(|gap| (gap, carried)));
        }
        carried = value.or(carried);
        filled.push((date, carried));
    }
    filled
}

/// Inserts the calendar days missing between consecutive entries with a
/// total of zero, the way a daily sum counts a day without observations.
pub(crate) fn zero_calendar_gaps(days: DailySeries) -> DailySeries {
    let mut filled: DailySeries = Vec::with_capacity(days.len());
    for (date, value) in days {
        if let Some(&(previous, _)) = filled.last() {
            filled.extend(days_between(previous, date).map(|gap| (gap, Some(0.0))));
        }
        filled.push((date, value));
    }
    filled
}

/// The days strictly between `after` and `before`.
fn days_between(after: NaiveDate, before: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    after
        .iter_days()
        .skip(1)
        .take_while(move |day| *day < before)
}
