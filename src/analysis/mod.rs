//! Read-only analytics over a [`crate::WeatherTable`].
//!
//! Every analysis comes in two forms: `try_*`, which reports failures as
//! [`AnalysisError`], and a best-effort form that logs the failure and
//! returns an empty result instead.

pub mod aggregates;
pub mod correlation;
pub(crate) mod daily_series;
pub mod error;
pub mod heatwave;
pub mod heavy_rain;

use crate::analysis::error::AnalysisError;
use crate::cleaning::missing::is_numeric;
use log::warn;
use polars::prelude::*;

/// Unwraps an analysis result, logging and replacing a failure with the
/// empty value.
pub(crate) fn best_effort<T: Default>(analysis: &str, result: Result<T, AnalysisError>) -> T {
    result.unwrap_or_else(|err| {
        warn!("{} failed, returning an empty result: {}", analysis, err);
        T::default()
    })
}

/// Fails unless `column` exists and holds numbers.
pub(crate) fn require_numeric(frame: &DataFrame, column: &str) -> Result<(), AnalysisError> {
    let found = frame
        .column(column)
        .map_err(|_| AnalysisError::MissingColumn {
            column: column.to_string(),
        })?;
    if !is_numeric(found.dtype()) {
        return Err(AnalysisError::NotNumeric {
            column: column.to_string(),
            dtype: found.dtype().to_string(),
        });
    }
    Ok(())
}

/// The values of a numeric column as floats, in row order.
pub(crate) fn numeric_values(
    frame: &DataFrame,
    column: &str,
) -> Result<Vec<Option<f64>>, AnalysisError> {
    require_numeric(frame, column)?;
    let values = frame.column(column)?.cast(&DataType::Float64)?;
    Ok(values.f64()?.into_iter().collect())
}
