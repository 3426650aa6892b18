//! Turns a raw, freshly read table into a clean one: duplicate rows
//! dropped, column names canonical, dates parsed, numeric gaps filled.

pub mod dates;
pub mod error;
pub mod missing;
pub mod normalize;

use crate::cleaning::error::CleaningError;
use crate::types::fill_strategy::FillStrategy;
use log::info;
use polars::prelude::DataFrame;

/// Runs the full cleaning pipeline over a raw frame.
///
/// Order: duplicate removal, column-name normalization, date parsing with
/// `month` / `year` derivation, missing-value filling. Sorting is left to
/// [`crate::WeatherTable`], which owns the ordering invariant.
///
/// # Errors
///
/// Fails when the frame has no `date` column (after normalization), when
/// normalized column names collide, or when polars rejects an operation.
pub fn prepare(raw: DataFrame, strategy: FillStrategy) -> Result<DataFrame, CleaningError> {
    let raw_rows = raw.height();
    let frame = normalize::remove_duplicate_rows(raw)?;
    let frame = normalize::normalize_columns(frame)?;
    let frame = dates::parse_dates(frame)?;
    let frame = missing::fill_missing(frame, strategy)?;
    info!(
        "Prepared weather table: {} raw rows, {} after cleaning, {} columns, missing values filled by {}",
        raw_rows,
        frame.height(),
        frame.width(),
        strategy
    );
    Ok(frame)
}
