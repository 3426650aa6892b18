//! Add / update / delete on a [`WeatherTable`].
//!
//! Each operation builds the new frame completely before replacing the old
//! one, so a failed call leaves the table as it was.

use crate::cleaning::missing::is_numeric;
use crate::store::error::StoreError;
use crate::store::weather_table::{restore_invariants, WeatherTable};
use crate::types::field_value::FieldValue;
use crate::types::identifier::RecordIdentifier;
use crate::types::record::WeatherRecord;
use log::{debug, info};
use polars::prelude::*;
use std::collections::BTreeMap;

const SELECTED: &str = "__selected";

impl WeatherTable {
    /// Appends a row, then re-sorts by date.
    ///
    /// Columns the record does not set are missing in the new row; columns
    /// the table does not have yet are created (missing for older rows).
    /// Dates are not unique: several rows may share a day.
    ///
    /// # Errors
    ///
    /// Text bound for an existing numeric or date column that cannot be
    /// read as that type is [`StoreError::InvalidNumber`] or
    /// [`StoreError::InvalidDate`]; the table is left unchanged.
    pub fn add(&mut self, record: &WeatherRecord) -> Result<(), StoreError> {
        let height = self.frame.height();
        let mut values: BTreeMap<String, FieldValue> = record.fields().into_iter().collect();
        let mut columns = Vec::with_capacity(self.frame.width() + values.len());

        for column in self.frame.get_columns() {
            let value = match values.remove(column.name().as_str()) {
                Some(value) => coerce_input(column.name().as_str(), &value, column.dtype())?,
                None => FieldValue::Null,
            };
            let incoming = value.to_series(column.name().clone(), 1)?;
            columns.push(append(column.as_materialized_series().clone(), incoming)?);
        }
        for (name, value) in values {
            let existing = Series::full_null(name.as_str().into(), height, &value.dtype());
            let incoming = value.to_series(name.as_str().into(), 1)?;
            columns.push(append(existing, incoming)?);
        }

        let frame = DataFrame::new(columns.into_iter().map(Series::into_column).collect())?;
        self.frame = restore_invariants(frame)?;
        info!("Added weather record ({} rows)", self.frame.height());
        Ok(())
    }

    /// Overwrites the fields set in `updates` on every selected row, then
    /// re-sorts by date. Returns the number of rows changed; `0` means
    /// nothing matched and the table is untouched.
    pub fn update(
        &mut self,
        identifier: &RecordIdentifier,
        updates: &WeatherRecord,
    ) -> Result<usize, StoreError> {
        let selection = self.select(identifier)?;
        let matched = selection.iter().filter(|selected| **selected).count();
        if matched == 0 {
            debug!("Update matched no rows for {:?}", identifier);
            return Ok(0);
        }

        let mut frame = self.frame.clone();
        frame.with_column(Series::new(SELECTED.into(), selection))?;

        let assignments = updates
            .fields()
            .into_iter()
            .map(|(name, value)| {
                let (value, current, target) = match frame.column(&name) {
                    Ok(existing) => {
                        let value = coerce_input(&name, &value, existing.dtype())?;
                        let target = common_dtype(existing.dtype(), &value.dtype());
                        (value, col(name.as_str()), target)
                    }
                    Err(_) => {
                        let target = value.dtype();
                        (value, lit(NULL), target)
                    }
                };
                Ok(when(col(SELECTED))
                    .then(value.to_lit().cast(target.clone()))
                    .otherwise(current.cast(target))
                    .alias(name.as_str()))
            })
            .collect::<Result<Vec<_>, StoreError>>()?;

        let frame = frame
            .lazy()
            .with_columns(assignments)
            .collect()?
            .drop(SELECTED)?;
        self.frame = restore_invariants(frame)?;
        info!("Updated {} weather record(s)", matched);
        Ok(matched)
    }

    /// Removes every selected row. Returns the number of rows removed; `0`
    /// means nothing matched and the table is untouched.
    pub fn delete(&mut self, identifier: &RecordIdentifier) -> Result<usize, StoreError> {
        let selection = self.select(identifier)?;
        let keep: Vec<bool> = selection.iter().map(|selected| !selected).collect();
        let removed = keep.iter().filter(|kept| !**kept).count();
        if removed == 0 {
            debug!("Delete matched no rows for {:?}", identifier);
            return Ok(0);
        }

        let frame = self
            .frame
            .filter(&BooleanChunked::from_slice(SELECTED.into(), &keep))?;
        self.frame = restore_invariants(frame)?;
        info!("Deleted {} weather record(s)", removed);
        Ok(removed)
    }

    /// One flag per row telling whether `identifier` selects it.
    pub(crate) fn select(&self, identifier: &RecordIdentifier) -> Result<Vec<bool>, StoreError> {
        let height = self.frame.height();
        match identifier {
            RecordIdentifier::ByPosition(position) => {
                Ok((0..height).map(|row| row == *position).collect())
            }
            RecordIdentifier::ByDate(date) => Ok(self
                .dates()?
                .into_iter()
                .map(|row_date| row_date == Some(*date))
                .collect()),
            RecordIdentifier::ByPredicate(predicate) => {
                let mut selection = vec![true; height];
                for (name, expected) in predicate {
                    let Ok(column) = self.frame.column(name) else {
                        continue;
                    };
                    let Some(expected) = expected.coerce_to(column.dtype()) else {
                        // Not readable as the column's type, so no row can equal it.
                        selection.fill(false);
                        break;
                    };
                    for (row, selected) in selection.iter_mut().enumerate() {
                        if *selected {
                            *selected = expected.matches(&column.get(row)?);
                        }
                    }
                }
                Ok(selection)
            }
        }
    }
}

/// Reads a caller-supplied value as the type of the column it is written
/// to, so form text never turns a numeric or date column into text.
fn coerce_input(column: &str, value: &FieldValue, dtype: &DataType) -> Result<FieldValue, StoreError> {
    value.coerce_to(dtype).ok_or_else(|| {
        let raw = match value {
            FieldValue::Text(raw) => raw.clone(),
            other => other.to_string(),
        };
        match dtype {
            DataType::Date => StoreError::InvalidDate { value: raw },
            _ => StoreError::InvalidNumber {
                column: column.to_string(),
                value: raw,
            },
        }
    })
}

/// The type both sides are cast to before they are combined: numbers widen
/// to float, a column of only missing values takes the incoming type, and
/// anything else that disagrees falls back to text.
fn common_dtype(existing: &DataType, incoming: &DataType) -> DataType {
    match (existing, incoming) {
        (a, b) if a == b => a.clone(),
        (a, DataType::Null) => a.clone(),
        (DataType::Null, b) => b.clone(),
        (a, b) if a.is_integer() && b.is_integer() => DataType::Int64,
        (a, b) if is_numeric(a) && is_numeric(b) => DataType::Float64,
        _ => DataType::String,
    }
}

fn append(existing: Series, incoming: Series) -> PolarsResult<Series> {
    let target = common_dtype(existing.dtype(), incoming.dtype());
    let mut combined = existing.cast(&target)?;
    combined.append(&incoming.cast(&target)?)?;
    Ok(combined)
}
