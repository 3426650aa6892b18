//! Delimited-file reading and writing.

use crate::persistence::error::PersistenceError;
use log::info;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Writes `frame` as a headered CSV file, replacing whatever was at `path`.
/// Dates are written as `YYYY-MM-DD`.
///
/// There is no partial-write recovery: a failure half way through can leave
/// a truncated file behind.
pub fn save(frame: &DataFrame, path: impl AsRef<Path>) -> Result<(), PersistenceError> {
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|e| PersistenceError::Create(path.to_path_buf(), e))?;
    let mut frame = frame.clone();
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_date_format(Some(DATE_FORMAT.to_string()))
        .finish(&mut frame)
        .map_err(|e| PersistenceError::CsvWrite(path.to_path_buf(), e))?;
    info!("Saved {} rows to {}", frame.height(), path.display());
    Ok(())
}

/// Reads a headered CSV file into a raw frame. Dates are left as text for
/// the cleaning pipeline to parse.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame, PersistenceError> {
    let path = path.as_ref();
    let frame = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .map_err(|e| PersistenceError::CsvRead(path.to_path_buf(), e))?;
    info!(
        "Loaded {} rows and {} columns from {}",
        frame.height(),
        frame.width(),
        path.display()
    );
    Ok(frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date_series;
    use chrono::NaiveDate;
    use std::io::Write;

    #[test]
    fn load_keeps_dates_as_text() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = tempfile::NamedTempFile::new()?;
        writeln!(file, "Date,Day AvgTemp C,Location Name")?;
        writeln!(file, "2024-06-01,31.5,Hanoi")?;
        writeln!(file, "2024-06-02,,Hue")?;

        let frame = load_csv(file.path())?;

        assert_eq!(frame.shape(), (2, 3));
        assert_eq!(frame.column("Date")?.dtype(), &DataType::String);
        assert_eq!(frame.column("Day AvgTemp C")?.null_count(), 1);
        Ok(())
    }

    #[test]
    fn save_overwrites_with_header_and_iso_dates() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("weather.csv");
        std::fs::write(&path, "stale contents that must disappear\n")?;

        let dates = date_series("date".into(), [NaiveDate::from_ymd_opt(2024, 6, 1)])?;
        let frame = DataFrame::new(vec![
            dates.into_column(),
            Series::new("day_avgtemp_c".into(), [31.5]).into_column(),
        ])?;
        save(&frame, &path)?;

        let written = std::fs::read_to_string(&path)?;
        assert_eq!(written, "date,day_avgtemp_c\n2024-06-01,31.5\n");
        Ok(())
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let result = load_csv("/definitely/not/here/weather.csv");
        assert!(matches!(result, Err(PersistenceError::CsvRead(..))));
    }

    #[test]
    fn unwritable_path_is_a_create_error() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let frame = df!("date" => ["2024-06-01"])?;
        let result = save(&frame, dir.path().join("missing").join("weather.csv"));
        assert!(matches!(result, Err(PersistenceError::Create(..))));
        Ok(())
    }
}
