//! Column-name canonicalisation and duplicate-row removal.

use crate::cleaning::error::CleaningError;
use log::debug;
use once_cell::sync::Lazy;
use polars::prelude::*;
use regex::Regex;
use std::collections::HashSet;

static NON_WORD_RUN: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"[^\w]+").expect("Hard-coded regex pattern should be valid")
});

/// Canonical form of a single column name: trimmed, lower-cased, every run
/// of non-word characters collapsed to `_`, no leading or trailing `_`.
///
/// ```
/// use weather_store::normalize_column_name;
///
/// assert_eq!(normalize_column_name(" Day AvgTemp (C) "), "day_avgtemp_c");
/// assert_eq!(normalize_column_name("day_avgtemp_c"), "day_avgtemp_c");
/// ```
pub fn normalize_column_name(name: &str) -> String {
    let lowered = name.trim().to_lowercase();
    NON_WORD_RUN
        .replace_all(&lowered, "_")
        .trim_matches('_')
        .to_string()
}

/// Renames every column to its canonical form. Row data is untouched and
/// applying this twice gives the same names as applying it once.
///
/// # Errors
///
/// Returns [`CleaningError::DuplicateColumn`] when two source names collapse
/// to the same canonical name.
pub fn normalize_columns(mut frame: DataFrame) -> Result<DataFrame, CleaningError> {
    let names: Vec<String> = frame
        .get_column_names()
        .iter()
        .map(|name| normalize_column_name(name.as_str()))
        .collect();

    let mut seen = HashSet::with_capacity(names.len());
    if let Some(duplicate) = names.iter().find(|name| !seen.insert(name.as_str())) {
        return Err(CleaningError::DuplicateColumn {
            name: duplicate.clone(),
        });
    }

    frame
        .set_column_names(names.iter().map(String::as_str))
        .map_err(CleaningError::ColumnRename)?;
    Ok(frame)
}

/// Drops rows that are identical in every column, keeping the first
/// occurrence and the original row order. Missing values compare equal.
pub fn remove_duplicate_rows(frame: DataFrame) -> Result<DataFrame, CleaningError> {
    let before = frame.height();
    let deduplicated = frame
        .lazy()
        .unique_stable(None, UniqueKeepStrategy::First)
        .collect()?;
    debug!(
        "Removed {} duplicate rows ({} remain)",
        before - deduplicated.height(),
        deduplicated.height()
    );
    Ok(deduplicated)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_messy_headers() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "  Date " => ["2024-06-01"],
            "Location Name" => ["Hanoi"],
            "Day--AvgTemp (C)" => [31.0],
            "__UV__" => [7.0],
        )?;

        let normalized = normalize_columns(frame)?;
        let names: Vec<&str> = normalized
            .get_column_names()
            .iter()
            .map(|n| n.as_str())
            .collect();
        assert_eq!(names, ["date", "location_name", "day_avgtemp_c", "uv"]);
        Ok(())
    }

    #[test]
    fn normalization_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "Wind Speed/kph" => [10.0],
            "Chance Of Rain %" => [40.0],
        )?;
        let once = normalize_columns(frame)?;
        let twice = normalize_columns(once.clone())?;
        assert_eq!(once.get_column_names(), twice.get_column_names());
        assert!(once.equals_missing(&twice));
        Ok(())
    }

    #[test]
    fn colliding_names_are_rejected() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "Day UV" => [1.0],
            "day_uv" => [2.0],
        )?;
        let err = normalize_columns(frame).unwrap_err();
        assert!(matches!(err, CleaningError::DuplicateColumn { ref name } if name == "day_uv"));
        Ok(())
    }

    #[test]
    fn duplicate_rows_keep_first_occurrence_in_order() -> Result<(), Box<dyn std::error::Error>> {
        let frame = df!(
            "date" => ["2024-06-02", "2024-06-01", "2024-06-02", "2024-06-03"],
            "day_uv" => [Some(5.0), None, Some(5.0), Some(6.0)],
        )?;
        let deduplicated = remove_duplicate_rows(frame)?;
        assert_eq!(deduplicated.height(), 3);
        let dates: Vec<Option<&str>> = deduplicated.column("date")?.str()?.into_iter().collect();
        assert_eq!(
            dates,
            [Some("2024-06-02"), Some("2024-06-01"), Some("2024-06-03")]
        );
        Ok(())
    }
}
