//! Date coercion and the derived `month` / `year` columns.

use crate::cleaning::error::CleaningError;
use crate::types::columns::{DATE, MONTH, YEAR};
use crate::utils::{date_series, date_values, parse_date};
use chrono::Datelike;
use polars::prelude::*;

/// Converts the `date` column to a real `Date` column and (re)derives
/// `month` and `year` for every row.
///
/// Text that is not a recognisable date becomes a missing date rather than
/// an error, and its row gets missing `month` / `year`.
///
/// # Errors
///
/// Returns [`CleaningError::MissingDateColumn`] when there is no `date`
/// column at all.
pub fn parse_dates(mut frame: DataFrame) -> Result<DataFrame, CleaningError> {
    let column = frame
        .column(DATE)
        .map_err(|_| CleaningError::MissingDateColumn)?;

    let parsed = match column.dtype() {
        DataType::Date => None,
        DataType::Datetime(_, _) => Some(
            column
                .cast(&DataType::Date)
                .map_err(CleaningError::DateParsing)?
                .as_materialized_series()
                .clone(),
        ),
        _ => {
            let text = column
                .cast(&DataType::String)
                .map_err(CleaningError::DateParsing)?;
            let dates: Vec<_> = text
                .str()
                .map_err(CleaningError::DateParsing)?
                .into_iter()
                .map(|raw| raw.and_then(parse_date))
                .collect();
            Some(date_series(DATE.into(), dates).map_err(CleaningError::DateParsing)?)
        }
    };

    if let Some(parsed) = parsed {
        frame.with_column(parsed)?;
    }
    derive_month_year(&mut frame)?;
    Ok(frame)
}

/// Overwrites `month` and `year` from the (already parsed) `date` column.
pub(crate) fn derive_month_year(frame: &mut DataFrame) -> PolarsResult<()> {
    let (months, years): (Vec<Option<i64>>, Vec<Option<i64>>) = date_values(frame.column(DATE)?.date()?)
        .map(|date| {
            (
                date.map(|d| d.month() as i64),
                date.map(|d| d.year() as i64),
            )
        })
        .unzip();
    frame.with_column(Series::new(MONTH.into(), months))?;
    frame.with_column(Series::new(YEAR.into(), years))?;
    Ok(())
}
