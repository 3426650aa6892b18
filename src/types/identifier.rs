//! Row selection for updates and deletions.

use crate::store::error::StoreError;
use crate::types::columns;
use crate::types::field_value::FieldValue;
use crate::types::record::WeatherRecord;
use crate::utils::parse_date;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Selects the rows an update or delete applies to.
///
/// Exactly one selection mode applies. When an identifier is parsed from raw
/// keys ([`RecordIdentifier::from_fields`]) the modes are tried in the order
/// the variants are declared.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordIdentifier {
    /// The row at this position in the current, date-sorted table.
    ByPosition(usize),
    /// Every row observed on this calendar day.
    ByDate(NaiveDate),
    /// Every row whose value equals the given value for each listed column.
    ///
    /// Columns that do not exist in the table are ignored, so a predicate
    /// made only of unknown columns selects every row.
    ByPredicate(BTreeMap<String, FieldValue>),
}

impl RecordIdentifier {
    /// Parses raw key/value pairs.
    ///
    /// An `index` key selects by position, otherwise a `Date` key selects
    /// by day, otherwise all pairs form an equality predicate. Predicate
    /// values stay text until they meet a column: against a numeric column
    /// they compare as numbers, against a text column as the exact text.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidPosition`] or [`StoreError::InvalidDate`]
    /// when the selecting key is present but its value cannot be read.
    pub fn from_fields<I, K, V>(pairs: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: AsRef<str>,
    {
        let pairs: BTreeMap<String, String> = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), v.as_ref().to_string()))
            .collect();

        if let Some(raw) = pairs.get(columns::POSITION_KEY) {
            let position = raw
                .trim()
                .parse::<usize>()
                .map_err(|_| StoreError::InvalidPosition { value: raw.clone() })?;
            return Ok(RecordIdentifier::ByPosition(position));
        }

        if let Some(raw) = pairs.get(columns::DATE_KEY_ALT) {
            let date = parse_date(raw).ok_or_else(|| StoreError::InvalidDate { value: raw.clone() })?;
            return Ok(RecordIdentifier::ByDate(date));
        }

        let predicate = pairs
            .into_iter()
            .map(|(key, raw)| {
                let value = if key == columns::DATE {
                    parse_date(&raw)
                        .map(FieldValue::Date)
                        .unwrap_or(FieldValue::Text(raw))
                } else {
                    FieldValue::Text(raw)
                };
                (key, value)
            })
            .collect();
        Ok(RecordIdentifier::ByPredicate(predicate))
    }

    /// A predicate matching exactly the populated fields of `record`.
    pub fn matching(record: &WeatherRecord) -> Self {
        RecordIdentifier::ByPredicate(record.fields().into_iter().collect())
    }
}

impl From<usize> for RecordIdentifier {
    fn from(position: usize) -> Self {
        RecordIdentifier::ByPosition(position)
    }
}

impl From<NaiveDate> for RecordIdentifier {
    fn from(date: NaiveDate) -> Self {
        RecordIdentifier::ByDate(date)
    }
}
