//! Typed input for inserting or updating a row.

use crate::store::error::StoreError;
use crate::types::columns;
use crate::types::field_value::FieldValue;
use crate::utils::parse_date;
use bon::Builder;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// The fields of a single daily observation.
///
/// Every field is optional: a record passed to
/// [`crate::WeatherTable::add`] leaves unset columns missing, and a record
/// passed to [`crate::WeatherTable::update`] only touches the columns it
/// sets. Columns outside the documented schema go in `extra`.
///
/// # Examples
///
/// ```
/// use weather_store::WeatherRecord;
/// use chrono::NaiveDate;
///
/// let record = WeatherRecord::builder()
///     .date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
///     .location_name("Hanoi".to_string())
///     .avg_temp_c(31.5)
///     .build();
/// assert_eq!(record.fields().len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Builder)]
pub struct WeatherRecord {
    pub date: Option<NaiveDate>,
    pub location_name: Option<String>,
    pub location_region: Option<String>,
    pub avg_temp_c: Option<f64>,
    pub avg_humidity: Option<f64>,
    pub total_precip_mm: Option<f64>,
    pub max_wind_kph: Option<f64>,
    pub uv_index: Option<f64>,
    pub avg_visibility_km: Option<f64>,
    pub chance_of_rain: Option<f64>,
    #[builder(default)]
    pub extra: BTreeMap<String, FieldValue>,
}

impl WeatherRecord {
    /// Builds a record from raw text pairs, as a data-entry form supplies them.
    ///
    /// Blank values are skipped. The date may be given as `date` or `Date`
    /// and must be a recognisable date. The measurement columns must hold
    /// numbers; anything else is stored as text under its own column name.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::InvalidDate`] or [`StoreError::InvalidNumber`]
    /// when a value cannot be coerced to the column's type.
    pub fn from_fields<I, K, V>(pairs: I) -> Result<Self, StoreError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut record = WeatherRecord::default();
        for (key, value) in pairs {
            let key = key.as_ref();
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key {
                columns::DATE | columns::DATE_KEY_ALT => {
                    record.date = Some(parse_date(value).ok_or_else(|| StoreError::InvalidDate {
                        value: value.to_string(),
                    })?);
                }
                columns::LOCATION_NAME => record.location_name = Some(value.to_string()),
                columns::LOCATION_REGION => record.location_region = Some(value.to_string()),
                name if columns::is_measurement(name) => {
                    let number = value.parse::<f64>().map_err(|_| StoreError::InvalidNumber {
                        column: name.to_string(),
                        value: value.to_string(),
                    })?;
                    record.set_measurement(name, number);
                }
                other => {
                    record
                        .extra
                        .insert(other.to_string(), FieldValue::Text(value.to_string()));
                }
            }
        }
        Ok(record)
    }

    fn set_measurement(&mut self, column: &str, value: f64) {
        let slot = match column {
            columns::AVG_TEMP_C => &mut self.avg_temp_c,
            columns::AVG_HUMIDITY => &mut self.avg_humidity,
            columns::TOTAL_PRECIP_MM => &mut self.total_precip_mm,
            columns::MAX_WIND_KPH => &mut self.max_wind_kph,
            columns::UV_INDEX => &mut self.uv_index,
            columns::AVG_VISIBILITY_KM => &mut self.avg_visibility_km,
            columns::CHANCE_OF_RAIN => &mut self.chance_of_rain,
            _ => return,
        };
        *slot = Some(value);
    }

    /// The populated fields as `(column, value)` pairs, typed fields first.
    pub fn fields(&self) -> Vec<(String, FieldValue)> {
        let typed: [(&str, Option<FieldValue>); 10] = [
            (columns::DATE, self.date.map(FieldValue::Date)),
            (
                columns::LOCATION_NAME,
                self.location_name.clone().map(FieldValue::Text),
            ),
            (
                columns::LOCATION_REGION,
                self.location_region.clone().map(FieldValue::Text),
            ),
            (columns::AVG_TEMP_C, self.avg_temp_c.map(FieldValue::Number)),
            (columns::AVG_HUMIDITY, self.avg_humidity.map(FieldValue::Number)),
            (
                columns::TOTAL_PRECIP_MM,
                self.total_precip_mm.map(FieldValue::Number),
            ),
            (columns::MAX_WIND_KPH, self.max_wind_kph.map(FieldValue::Number)),
            (columns::UV_INDEX, self.uv_index.map(FieldValue::Number)),
            (
                columns::AVG_VISIBILITY_KM,
                self.avg_visibility_km.map(FieldValue::Number),
            ),
            (
                columns::CHANCE_OF_RAIN,
                self.chance_of_rain.map(FieldValue::Number),
            ),
        ];

        typed
            .into_iter()
            .filter_map(|(name, value)| value.map(|v| (name.to_string(), v)))
            .chain(self.extra.iter().map(|(k, v)| (k.clone(), v.clone())))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.fields().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_fields_coerces_known_columns() -> Result<(), Box<dyn std::error::Error>> {
        let record = WeatherRecord::from_fields([
            ("Date", "2024-06-01"),
            ("location_name", "Da Nang"),
            ("day_avgtemp_c", "31.4"),
            ("day_uv", ""),
            ("condition_text", "Sunny"),
        ])?;

        assert_eq!(record.date, NaiveDate::from_ymd_opt(2024, 6, 1));
        assert_eq!(record.location_name.as_deref(), Some("Da Nang"));
        assert_eq!(record.avg_temp_c, Some(31.4));
        assert_eq!(record.uv_index, None);
        assert_eq!(
            record.extra.get("condition_text"),
            Some(&FieldValue::Text("Sunny".into()))
        );
        Ok(())
    }

    #[test]
    fn from_fields_rejects_non_numeric_measurement() {
        let err = WeatherRecord::from_fields([("day_totalprecip_mm", "lots")]).unwrap_err();
        assert!(matches!(
            err,
            StoreError::InvalidNumber { ref column, .. } if column == "day_totalprecip_mm"
        ));
    }

    #[test]
    fn from_fields_rejects_bad_date() {
        let err = WeatherRecord::from_fields([("date", "tomorrow")]).unwrap_err();
        assert!(matches!(err, StoreError::InvalidDate { .. }));
    }

    #[test]
    fn fields_lists_only_populated_values() {
        let record = WeatherRecord::builder()
            .total_precip_mm(120.0)
            .location_region("North".to_string())
            .build();
        let fields = record.fields();
        assert_eq!(
            fields,
            vec![
                (
                    "location_region".to_string(),
                    FieldValue::Text("North".into())
                ),
                ("day_totalprecip_mm".to_string(), FieldValue::Number(120.0)),
            ]
        );
        assert!(WeatherRecord::default().is_empty());
    }
}
