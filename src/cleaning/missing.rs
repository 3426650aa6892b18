//! Filling of missing numeric values.

use crate::cleaning::error::CleaningError;
use crate::types::fill_strategy::FillStrategy;
use log::{debug, warn};
use polars::prelude::*;

pub(crate) fn is_numeric(dtype: &DataType) -> bool {
    dtype.is_integer() || dtype.is_float()
}

/// Fills missing values in every numeric column using `strategy`.
///
/// Statistics are computed per column over that column's present values.
/// Non-numeric columns are left exactly as they are, missing values
/// included. A numeric column with no present values at all stays missing
/// under the `mean` / `median` strategies.
pub fn fill_missing(mut frame: DataFrame, strategy: FillStrategy) -> Result<DataFrame, CleaningError> {
    let targets: Vec<PlSmallStr> = frame
        .get_columns()
        .iter()
        .filter(|column| is_numeric(column.dtype()) && column.null_count() > 0)
        .map(|column| column.name().clone())
        .collect();

    for name in targets {
        let filled = fill_series(frame.column(&name)?.as_materialized_series(), strategy)
            .map_err(|source| CleaningError::Fill {
                column: name.to_string(),
                source,
            })?;
        debug!("Filled missing values in '{}' using {}", name, strategy);
        frame.with_column(filled)?;
    }
    Ok(frame)
}

/// Like [`fill_missing`], but takes the strategy by name. An unrecognised
/// name leaves the table unchanged.
pub fn fill_missing_named(frame: DataFrame, strategy: &str) -> Result<DataFrame, CleaningError> {
    match strategy.parse::<FillStrategy>() {
        Ok(strategy) => fill_missing(frame, strategy),
        Err(unknown) => {
            warn!("{}; leaving missing values untouched", unknown);
            Ok(frame)
        }
    }
}

fn fill_series(series: &Series, strategy: FillStrategy) -> PolarsResult<Series> {
    match strategy {
        FillStrategy::Mean | FillStrategy::Median => {
            let values = series.cast(&DataType::Float64)?;
            let statistic = match strategy {
                FillStrategy::Mean => values.mean(),
                _ => values.median(),
            };
            match statistic {
                Some(statistic) => Ok(values.f64()?.fill_null_with_values(statistic)?.into_series()),
                None => Ok(series.clone()),
            }
        }
        FillStrategy::ForwardThenBackward => series
            .fill_null(FillNullStrategy::Forward(None))?
            .fill_null(FillNullStrategy::Backward(None)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(frame: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, PolarsError> {
        Ok(frame
            .column(name)?
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .collect())
    }

    #[test]
    fn mean_uses_column_own_values() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "temp" => [Some(10.0), None, Some(30.0)],
            "uv" => [Some(1.0), Some(3.0), None],
        )?;
        let filled = fill_missing(frame, FillStrategy::Mean)?;
        assert_eq!(values(&filled, "temp")?, vec![Some(10.0), Some(20.0), Some(30.0)]);
        assert_eq!(values(&filled, "uv")?, vec![Some(1.0), Some(3.0), Some(2.0)]);
        Ok(())
    }

    #[test]
    fn median_fill() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("rain" => [Some(1.0), None, Some(2.0), Some(100.0)])?;
        let filled = fill_missing(frame, FillStrategy::Median)?;
        assert_eq!(
            values(&filled, "rain")?,
            vec![Some(1.0), Some(2.0), Some(2.0), Some(100.0)]
        );
        Ok(())
    }

    #[test]
    fn forward_then_backward_covers_leading_gap() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("humidity" => [None, Some(5.0), None, Some(10.0)])?;
        let filled = fill_missing(frame, FillStrategy::ForwardThenBackward)?;
        assert_eq!(
            values(&filled, "humidity")?,
            vec![Some(5.0), Some(5.0), Some(5.0), Some(10.0)]
        );
        Ok(())
    }

    #[test]
    fn text_columns_keep_their_gaps() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "location_name" => [Some("Hue"), None],
            "temp" => [Some(20.0), None],
        )?;
        let filled = fill_missing(frame, FillStrategy::ForwardThenBackward)?;
        assert_eq!(filled.column("location_name")?.null_count(), 1);
        assert_eq!(filled.column("temp")?.null_count(), 0);
        Ok(())
    }

    #[test]
    fn integer_columns_without_gaps_keep_their_type() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "year" => [2024i64, 2024],
            "temp" => [Some(20.0), None],
        )?;
        let filled = fill_missing(frame, FillStrategy::Mean)?;
        assert_eq!(filled.column("year")?.dtype(), &DataType::Int64);
        Ok(())
    }

    #[test]
    fn unknown_strategy_name_changes_nothing() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!("temp" => [Some(10.0), None, Some(30.0)])?;
        let filled = fill_missing_named(frame.clone(), "interpolate")?;
        assert!(filled.equals_missing(&frame));

        let filled = fill_missing_named(frame, "ffill")?;
        assert_eq!(values(&filled, "temp")?, vec![Some(10.0), Some(10.0), Some(30.0)]);
        Ok(())
    }
}
