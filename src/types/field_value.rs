//! A single cell value as supplied by callers when adding, updating or
//! selecting rows.

use crate::cleaning::missing::is_numeric;
use crate::utils::{date_series, date_to_days, days_to_date, parse_date};
use chrono::NaiveDate;
use polars::prelude::*;
use std::fmt;

/// A loosely typed cell value.
///
/// Values handed to the store are converted to polars columns with
/// [`FieldValue::to_series`] and compared against stored cells with
/// [`FieldValue::matches`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Explicit missing value.
    Null,
    /// A floating point measurement.
    Number(f64),
    /// An integer value.
    Integer(i64),
    /// Free text such as a location name.
    Text(String),
    /// A calendar date.
    Date(NaiveDate),
}

impl FieldValue {
    /// Interprets raw text the way a form field would be read: numbers
    /// become numbers, everything else stays text.
    pub fn parse(raw: &str) -> FieldValue {
        let trimmed = raw.trim();
        if let Ok(integer) = trimmed.parse::<i64>() {
            return FieldValue::Integer(integer);
        }
        match trimmed.parse::<f64>() {
            Ok(number) if number.is_finite() => FieldValue::Number(number),
            _ => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    pub(crate) fn dtype(&self) -> DataType {
        match self {
            FieldValue::Null => DataType::Null,
            FieldValue::Number(_) => DataType::Float64,
            FieldValue::Integer(_) => DataType::Int64,
            FieldValue::Text(_) => DataType::String,
            FieldValue::Date(_) => DataType::Date,
        }
    }

    /// This value as it should be stored in, or compared against, a column
    /// of `dtype`. Text headed for a numeric or date column is parsed, and
    /// numbers compared against a text column become text. Returns `None`
    /// when text cannot be read as the column's type.
    pub(crate) fn coerce_to(&self, dtype: &DataType) -> Option<FieldValue> {
        match (self, dtype) {
            (FieldValue::Text(raw), dtype) if is_numeric(dtype) => match FieldValue::parse(raw) {
                FieldValue::Text(_) => None,
                number => Some(number),
            },
            (FieldValue::Text(raw), DataType::Date) => parse_date(raw).map(FieldValue::Date),
            (FieldValue::Integer(value), DataType::String) => Some(FieldValue::Text(value.to_string())),
            (FieldValue::Number(value), DataType::String) => Some(FieldValue::Text(value.to_string())),
            (other, _) => Some(other.clone()),
        }
    }

    /// Builds a column holding `len` copies of this value.
    pub(crate) fn to_series(&self, name: PlSmallStr, len: usize) -> PolarsResult<Series> {
        Ok(match self {
            FieldValue::Null => Series::full_null(name, len, &DataType::Null),
            FieldValue::Number(value) => Series::new(name, vec![*value; len]),
            FieldValue::Integer(value) => Series::new(name, vec![*value; len]),
            FieldValue::Text(value) => Series::new(name, vec![value.as_str(); len]),
            FieldValue::Date(date) => date_series(name, std::iter::repeat(Some(*date)).take(len))?,
        })
    }

    pub(crate) fn to_lit(&self) -> Expr {
        match self {
            FieldValue::Null => lit(NULL),
            FieldValue::Number(value) => lit(*value),
            FieldValue::Integer(value) => lit(*value),
            FieldValue::Text(value) => lit(value.clone()),
            FieldValue::Date(date) => lit(*date),
        }
    }

    /// Reads a stored cell back into a value.
    pub(crate) fn from_cell(cell: &AnyValue) -> FieldValue {
        match cell {
            AnyValue::Null => FieldValue::Null,
            AnyValue::String(text) => FieldValue::Text(text.to_string()),
            AnyValue::StringOwned(text) => FieldValue::Text(text.to_string()),
            AnyValue::Date(days) => days_to_date(*days)
                .map(FieldValue::Date)
                .unwrap_or(FieldValue::Null),
            AnyValue::Float64(value) => FieldValue::Number(*value),
            AnyValue::Float32(value) => FieldValue::Number(*value as f64),
            AnyValue::Boolean(value) => FieldValue::Text(value.to_string()),
            other => other
                .extract::<i64>()
                .map(FieldValue::Integer)
                .unwrap_or_else(|| FieldValue::Text(other.to_string())),
        }
    }

    /// Exact equality against a stored cell. Missing values never match,
    /// numbers compare by value regardless of integer/float storage.
    pub(crate) fn matches(&self, cell: &AnyValue) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Number(expected) => numeric_cell(cell) == Some(*expected),
            FieldValue::Integer(expected) => numeric_cell(cell) == Some(*expected as f64),
            FieldValue::Text(expected) => text_cell(cell) == Some(expected.as_str()),
            FieldValue::Date(expected) => {
                matches!(cell, AnyValue::Date(days) if *days == date_to_days(*expected))
            }
        }
    }
}

fn numeric_cell(cell: &AnyValue) -> Option<f64> {
    match cell {
        AnyValue::Null
        | AnyValue::Boolean(_)
        | AnyValue::String(_)
        | AnyValue::StringOwned(_)
        | AnyValue::Date(_)
        | AnyValue::Datetime(..) => None,
        other => other.extract::<f64>(),
    }
}

fn text_cell<'a>(cell: &'a AnyValue) -> Option<&'a str> {
    match cell {
        AnyValue::String(text) => Some(*text),
        AnyValue::StringOwned(text) => Some(text.as_str()),
        _ => None,
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => write!(f, "null"),
            FieldValue::Number(value) => write!(f, "{value}"),
            FieldValue::Integer(value) => write!(f, "{value}"),
            FieldValue::Text(value) => write!(f, "{value:?}"),
            FieldValue::Date(date) => write!(f, "{}", date.format("%Y-%m-%d")),
        }
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        FieldValue::Date(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}
