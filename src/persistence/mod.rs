//! Moving a [`WeatherTable`] to and from a delimited file.

pub mod csv_file;
pub mod error;

use crate::config::WeatherConfig;
use crate::error::WeatherStoreError;
use crate::persistence::error::PersistenceError;
use crate::store::weather_table::WeatherTable;
use std::path::Path;

impl WeatherTable {
    /// Loads a CSV export and runs the cleaning pipeline over it.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or parsed, or when the cleaning
    /// pipeline rejects its contents (for example, no date column).
    pub fn open(path: impl AsRef<Path>, config: WeatherConfig) -> Result<Self, WeatherStoreError> {
        let raw = csv_file::load_csv(path)?;
        Ok(WeatherTable::from_raw(raw, config)?)
    }

    /// Writes the whole table to `path`, overwriting any existing file. The
    /// header holds the normalized column names and dates are `YYYY-MM-DD`.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
        csv_file::save(&self.frame, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{day, sample_table, TestResult};
    use crate::types::identifier::RecordIdentifier;
    use crate::types::record::WeatherRecord;

    #[test]
    fn save_then_open_restores_the_table() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("weather.csv");
        let mut table = sample_table()?;
        table.add(
            &WeatherRecord::builder()
                .date(day(2024, 6, 4))
                .location_name("Hue".to_string())
                .avg_temp_c(33.0)
                .build(),
        )?;
        table.save(&path)?;

        let reopened = WeatherTable::open(&path, WeatherConfig::default())?;

        assert_eq!(reopened.len(), 5);
        assert_eq!(reopened.column_names(), table.column_names());
        assert_eq!(reopened.dates()?, table.dates()?);
        let header = std::fs::read_to_string(&path)?;
        assert!(header.starts_with("date,location_name,location_region,day_avgtemp_c"));
        Ok(())
    }

    #[test]
    fn saving_again_replaces_the_file() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("weather.csv");
        let mut table = sample_table()?;
        table.save(&path)?;

        table.delete(&RecordIdentifier::ByDate(day(2024, 6, 1)))?;
        table.save(&path)?;

        let reopened = WeatherTable::open(&path, WeatherConfig::default())?;
        assert_eq!(reopened.len(), 3);
        Ok(())
    }

    #[test]
    fn open_without_date_column_fails() -> TestResult {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("no_dates.csv");
        std::fs::write(&path, "station,temperature\nA,21.0\n")?;

        let result = WeatherTable::open(&path, WeatherConfig::default());
        assert!(matches!(result, Err(WeatherStoreError::Store(_))));
        Ok(())
    }
}
